//! Cosmetic node-separation pass.
//!
//! Purely a layout nicety for the external visualizer: nodes sitting
//! inside each other's bounding box are nudged apart along summed
//! repulsion vectors. Topology is never touched, and an already
//! non-overlapping layout is a fixed point.

use gg_common::{Graph, Vec2};

// Two nodes overlap when both axis offsets are inside this box.
const OVERLAP_X: f32 = 150.0;
const OVERLAP_Y: f32 = 200.0;
const STEP: f32 = 1.3;

/// Nudges overlapping nodes apart until no overlaps remain or
/// `max_iterations` passes have run.
pub(crate) fn separate_nodes(graph: &mut Graph, max_iterations: usize) {
    let mut remaining = max_iterations;

    while has_overlaps(graph) && remaining > 0 {
        let ids = graph.node_ids();
        let positions: Vec<Vec2> = ids
            .iter()
            .filter_map(|&id| graph.node(id).map(|n| n.position))
            .collect();

        let pushes: Vec<Vec2> = positions
            .iter()
            .map(|&pos| {
                let mut push = Vec2::ZERO;
                for &other in &positions {
                    if other == pos {
                        continue;
                    }
                    if overlapping(pos, other) {
                        push += pos - other;
                    }
                }
                push.normalized()
            })
            .collect();

        for (id, push) in ids.iter().zip(pushes) {
            if let Some(node) = graph.node_mut(*id) {
                node.position += push * STEP;
            }
        }

        remaining -= 1;
    }
}

fn overlapping(a: Vec2, b: Vec2) -> bool {
    (a.x - b.x).abs() < OVERLAP_X && (a.y - b.y).abs() < OVERLAP_Y
}

fn has_overlaps(graph: &Graph) -> bool {
    let positions: Vec<Vec2> = graph.nodes().map(|n| n.position).collect();
    positions
        .iter()
        .enumerate()
        .any(|(i, &a)| {
            positions
                .iter()
                .enumerate()
                .any(|(j, &b)| i != j && overlapping(a, b))
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use gg_common::{Node, Symbol};

    fn graph_at(positions: &[(f32, f32)]) -> Graph {
        let mut graph = Graph::new();
        for &(x, y) in positions {
            graph.add_node(Node::new(Symbol::asterisk(), Vec2::new(x, y)));
        }
        graph
    }

    fn layout(graph: &Graph) -> Vec<Vec2> {
        graph.nodes().map(|n| n.position).collect()
    }

    #[test]
    fn non_overlapping_layout_is_a_fixed_point() {
        let mut graph = graph_at(&[(0.0, 0.0), (500.0, 0.0), (0.0, 500.0)]);
        let before = layout(&graph);

        separate_nodes(&mut graph, 100);
        assert_eq!(layout(&graph), before);

        // Running it again still moves nothing.
        separate_nodes(&mut graph, 100);
        assert_eq!(layout(&graph), before);
    }

    #[test]
    fn overlapping_nodes_are_pushed_apart() {
        let mut graph = graph_at(&[(0.0, 0.0), (10.0, 0.0)]);
        separate_nodes(&mut graph, 1000);
        assert!(!has_overlaps(&graph));
    }

    #[test]
    fn iteration_bound_is_respected() {
        // Identical positions produce zero repulsion vectors, so the pass
        // can never converge; the bound must stop it.
        let mut graph = graph_at(&[(0.0, 0.0), (0.0, 0.0)]);
        separate_nodes(&mut graph, 5);
        assert!(has_overlaps(&graph));
    }
}

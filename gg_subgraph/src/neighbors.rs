//! Recursive neighbourhood compatibility.
//!
//! Beyond the local checks in `compat`, a tentative pairing must extend
//! into the surrounding structure: every pattern neighbour needs some
//! compatible target neighbour whose own neighbourhood recursively checks
//! out. Visited sets are tracked per direction and copied at each
//! recursion level so cycles terminate; the copies keep sibling branches
//! independent.

use gg_common::{Graph, NodeId};

use crate::compat::compatible;
use crate::mapping::Mapping;

/// Whether the neighbourhoods of `p_node` and `t_node` are compatible.
pub(crate) fn compatible_neighbors(
    pattern: &Graph,
    target: &Graph,
    p_node: NodeId,
    t_node: NodeId,
    mapping: &Mapping,
) -> bool {
    check_neighbor(
        pattern,
        target,
        p_node,
        t_node,
        mapping,
        &mut Vec::new(),
        &mut Vec::new(),
    )
}

fn check_neighbor(
    pattern: &Graph,
    target: &Graph,
    p_node: NodeId,
    t_node: NodeId,
    mapping: &Mapping,
    visited_in: &mut Vec<NodeId>,
    visited_out: &mut Vec<NodeId>,
) -> bool {
    for p_neighbor in pattern.neighbours_in(p_node) {
        if visited_in.contains(&p_neighbor) {
            continue;
        }
        visited_in.push(p_neighbor);

        let found = target.neighbours_in(t_node).into_iter().any(|t_neighbor| {
            compatible(pattern, target, p_neighbor, t_neighbor, mapping)
                && check_neighbor(
                    pattern,
                    target,
                    p_neighbor,
                    t_neighbor,
                    mapping,
                    &mut visited_in.clone(),
                    &mut visited_out.clone(),
                )
        });

        if !found {
            return false;
        }
    }

    for p_neighbor in pattern.neighbours_out(p_node) {
        if visited_out.contains(&p_neighbor) {
            continue;
        }
        visited_out.push(p_neighbor);

        let found = target.neighbours_out(t_node).into_iter().any(|t_neighbor| {
            compatible(pattern, target, p_neighbor, t_neighbor, mapping)
                && check_neighbor(
                    pattern,
                    target,
                    p_neighbor,
                    t_neighbor,
                    mapping,
                    &mut visited_in.clone(),
                    &mut visited_out.clone(),
                )
        });

        if !found {
            return false;
        }
    }

    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use gg_common::{Node, Symbol, Vec2};

    fn add(graph: &mut Graph, symbol: Symbol) -> NodeId {
        graph.add_node(Node::new(symbol, Vec2::ZERO))
    }

    #[test]
    fn chain_neighbourhood_must_exist_in_target() {
        // Pattern: a -> b -> c. Target: a -> b (no c successor).
        let mut pattern = Graph::new();
        let pa = add(&mut pattern, Symbol::terminal("a"));
        let pb = add(&mut pattern, Symbol::terminal("b"));
        let pc = add(&mut pattern, Symbol::terminal("c"));
        pattern.add_edge(pa, pb, Symbol::asterisk());
        pattern.add_edge(pb, pc, Symbol::asterisk());

        let mut target = Graph::new();
        let ta = add(&mut target, Symbol::terminal("a"));
        let tb = add(&mut target, Symbol::terminal("b"));
        target.add_edge(ta, tb, Symbol::asterisk());

        let mapping = Mapping::new();
        assert!(!compatible_neighbors(&pattern, &target, pa, ta, &mapping));
    }

    #[test]
    fn cycles_terminate() {
        // Identical 2-cycles on both sides; the visited sets must stop the
        // recursion.
        let mut pattern = Graph::new();
        let pa = add(&mut pattern, Symbol::terminal("a"));
        let pb = add(&mut pattern, Symbol::terminal("b"));
        pattern.add_edge(pa, pb, Symbol::asterisk());
        pattern.add_edge(pb, pa, Symbol::asterisk());

        let mut target = Graph::new();
        let ta = add(&mut target, Symbol::terminal("a"));
        let tb = add(&mut target, Symbol::terminal("b"));
        target.add_edge(ta, tb, Symbol::asterisk());
        target.add_edge(tb, ta, Symbol::asterisk());

        let mapping = Mapping::new();
        assert!(compatible_neighbors(&pattern, &target, pa, ta, &mapping));
    }
}

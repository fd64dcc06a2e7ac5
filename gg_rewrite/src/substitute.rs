//! Substitution of a matched pattern by a replacement graph.
//!
//! Three ordered phases over the working graph; the order is load-bearing:
//! slot alignment set up in phase 1 drives node substitution in phase 2,
//! and reconnection in phase 3 resolves endpoints against the slots the
//! earlier phases left behind.

use std::collections::HashMap;

use gg_common::{Graph, NodeId, Vec2};
use gg_subgraph::Mapping;
use tracing::debug;

use crate::error::RewriteError;

/// Replaces the matched pattern occurrence inside `working` with
/// `replacement`.
///
/// `pattern` must be the instantiated left graph the `mapping` was found
/// with; `replacement` is the (possibly group-selected) right graph.
pub(crate) fn substitute(
    mapping: &Mapping,
    pattern: &Graph,
    working: &mut Graph,
    replacement: &Graph,
    rule_name: &str,
) -> Result<(), RewriteError> {
    remove_pattern_edges(mapping, pattern, working);
    substitute_nodes(mapping, working, replacement);
    connect_and_clear_slots(working, replacement, rule_name)
}

/// Phase 1: copy each pattern node's correlation slot onto its image, then
/// drop every working edge running between two images. Those edges are the
/// pattern's internal structure, replaced wholesale in phase 3.
fn remove_pattern_edges(mapping: &Mapping, pattern: &Graph, working: &mut Graph) {
    for (p_node, t_node) in mapping.pairs() {
        let slot = pattern.node(p_node).and_then(|n| n.slot);
        if let Some(node) = working.node_mut(t_node) {
            node.slot = slot;
        }
    }

    for (edge_id, edge) in working.edges_with_ids() {
        if mapping.is_target_mapped(edge.start) && mapping.is_target_mapped(edge.end) {
            working.remove_edge_id(edge_id);
        }
    }
}

/// Phase 2: align matched and replacement nodes by slot; update matched
/// nodes in place, insert replacement nodes with no counterpart, delete
/// matched nodes the replacement has no slot for.
fn substitute_nodes(mapping: &Mapping, working: &mut Graph, replacement: &Graph) {
    let left_by_slot = slot_index(mapping.targets().filter_map(|t| {
        working.node(t).and_then(|n| n.slot.map(|s| (s, t)))
    }));
    let right_by_slot = slot_index(
        replacement
            .nodes()
            .filter_map(|n| n.slot.map(|s| (s, n.id()))),
    );

    // Centers are computed over the full slotted sets, before any excess
    // node is deleted; the translation preserves the replacement's
    // relative layout around the match site.
    let left_positions: Vec<Vec2> = left_by_slot
        .iter()
        .flatten()
        .filter_map(|&id| working.node(id).map(|n| n.position))
        .collect();
    let right_positions: Vec<Vec2> = right_by_slot
        .iter()
        .flatten()
        .filter_map(|&id| replacement.node(id).map(|n| n.position))
        .collect();
    let left_center = Vec2::bbox_center(&left_positions);
    let right_center = Vec2::bbox_center(&right_positions);

    if left_by_slot.len() > right_by_slot.len() {
        for slot in right_by_slot.len()..left_by_slot.len() {
            if let Some(excess) = left_by_slot[slot] {
                debug!(slot, "removing matched node without replacement counterpart");
                working.remove_node(excess);
            }
        }
    }

    for (slot, entry) in right_by_slot.iter().enumerate() {
        let Some(replacement_id) = *entry else {
            continue;
        };
        let Some(replacement_node) = replacement.node(replacement_id) else {
            continue;
        };

        let new_position = left_center + (replacement_node.position - right_center);
        let counterpart = left_by_slot.get(slot).copied().flatten();

        if let Some(matched) = counterpart {
            let Some(old_symbol) = working.node(matched).map(|n| n.symbol.clone()) else {
                continue;
            };

            // Edges still labeled with the node's symbol follow the node's
            // new identity.
            let touching: Vec<_> = working
                .edge_ids_with(matched)
                .into_iter()
                .filter_map(|id| working.edge(id).map(|e| (id, e.symbol.clone())))
                .collect();
            for (edge_id, symbol) in touching {
                if symbol == old_symbol {
                    working.set_edge_symbol(edge_id, replacement_node.symbol.clone());
                }
            }

            if let Some(node) = working.node_mut(matched) {
                node.slot = Some(slot);
                node.position = new_position;
                // A wildcard replacement never erases a more specific
                // symbol.
                if !replacement_node.symbol.is_asterisk() {
                    node.symbol = replacement_node.symbol.clone();
                }
            }
        } else {
            let mut fresh = replacement_node.reidentified();
            fresh.slot = Some(slot);
            fresh.position = new_position;
            working.add_node(fresh);
        }
    }
}

/// Phase 3: materialize the replacement's edges by resolving their
/// endpoints' slots against the working graph, then retire all slots.
fn connect_and_clear_slots(
    working: &mut Graph,
    replacement: &Graph,
    rule_name: &str,
) -> Result<(), RewriteError> {
    // Built in node order so later (freshly inserted) nodes win over any
    // stale slot left on the working graph.
    let mut by_slot: HashMap<usize, NodeId> = HashMap::new();
    for node in working.nodes() {
        if let Some(slot) = node.slot {
            by_slot.insert(slot, node.id());
        }
    }

    let resolve = |slot: usize| -> Option<NodeId> { by_slot.get(&slot).copied() };

    for edge in replacement.edges() {
        let start_slot = replacement
            .node(edge.start)
            .and_then(|n| n.slot)
            .ok_or_else(|| RewriteError::unslotted_endpoint(rule_name))?;
        let end_slot = replacement
            .node(edge.end)
            .and_then(|n| n.slot)
            .ok_or_else(|| RewriteError::unslotted_endpoint(rule_name))?;

        let start = resolve(start_slot)
            .ok_or_else(|| RewriteError::unresolved_slot(start_slot, rule_name))?;
        let end =
            resolve(end_slot).ok_or_else(|| RewriteError::unresolved_slot(end_slot, rule_name))?;

        working.add_edge(start, end, edge.symbol.clone());
    }

    working.clear_slots();
    Ok(())
}

/// Slot-indexed node array: `result[slot] == Some(node)`.
fn slot_index(entries: impl Iterator<Item = (usize, NodeId)>) -> Vec<Option<NodeId>> {
    let mut index: Vec<Option<NodeId>> = Vec::new();
    for (slot, id) in entries {
        if slot >= index.len() {
            index.resize(slot + 1, None);
        }
        index[slot] = Some(id);
    }
    index
}


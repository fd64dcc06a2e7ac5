//! Node-level compatibility checks.
//!
//! A pattern node is compatible with a target node when its symbol accepts
//! the target's, the target's edge counts bound (or, under exact flags,
//! equal) the pattern's, and every edge touching the pattern node finds a
//! distinct structurally-equivalent counterpart among the target node's
//! edges.
//!
//! The primary symbol test compares names only, with the wildcard absorbed
//! on the pattern side; edge and endpoint equivalence compares full
//! symbols. The asymmetry is deliberate: node symbol names are unique per
//! kind in practice.

use gg_common::{Edge, Graph, NodeId, Symbol};
use itertools::Itertools;
use tracing::trace;

use crate::mapping::Mapping;

/// Full compatibility check between a pattern node and a target node.
pub(crate) fn compatible(
    pattern: &Graph,
    target: &Graph,
    p_node: NodeId,
    t_node: NodeId,
    mapping: &Mapping,
) -> bool {
    let (Some(p), Some(t)) = (pattern.node(p_node), target.node(t_node)) else {
        return false;
    };

    if !p.symbol.is_asterisk() && p.symbol.name != t.symbol.name {
        return false;
    }

    if !check_edge_count(pattern, target, p_node, t_node) {
        trace!(pattern = %p.symbol, target = %t.symbol, "edge-count check failed");
        return false;
    }

    let pattern_edges = pattern.edges_with(p_node);
    let target_edges = target.edges_with(t_node);

    // Every pattern edge consumes a distinct equivalent target edge.
    let mut target_bag = target_edges.clone();
    for p_edge in &pattern_edges {
        let found = target_bag
            .iter()
            .position(|t_edge| check_edge(pattern, p_node, p_edge, target, t_node, t_edge));
        match found {
            Some(idx) => {
                target_bag.swap_remove(idx);
            }
            None => return false,
        }
    }

    // Conversely: target edges into already-mapped neighbours must each
    // consume a distinct pattern edge, or the embedding would drop them.
    let mut pattern_bag = pattern_edges;
    for t_edge in &target_edges {
        let Some(other) = t_edge.other_endpoint(t_node) else {
            continue;
        };
        if !mapping.is_target_mapped(other) {
            continue;
        }

        let found = pattern_bag
            .iter()
            .position(|p_edge| check_edge(target, t_node, t_edge, pattern, p_node, p_edge));
        match found {
            Some(idx) => {
                pattern_bag.swap_remove(idx);
            }
            None => return false,
        }
    }

    true
}

/// Direction-aware structural equivalence of two edges relative to the
/// nodes being matched: same side, equivalent edge symbol, pairwise
/// equivalent endpoint symbols.
pub(crate) fn check_edge(
    a_graph: &Graph,
    a_node: NodeId,
    a_edge: &Edge,
    b_graph: &Graph,
    b_node: NodeId,
    b_edge: &Edge,
) -> bool {
    let same_direction = if a_edge.starts_at(a_node) {
        b_edge.starts_at(b_node)
    } else if a_edge.ends_at(a_node) {
        b_edge.ends_at(b_node)
    } else {
        false
    };
    if !same_direction {
        return false;
    }

    let symbol_of = |graph: &Graph, id: NodeId| graph.node(id).map(|n| n.symbol.clone());
    let (Some(a_start), Some(a_end)) = (symbol_of(a_graph, a_edge.start), symbol_of(a_graph, a_edge.end))
    else {
        return false;
    };
    let (Some(b_start), Some(b_end)) = (symbol_of(b_graph, b_edge.start), symbol_of(b_graph, b_edge.end))
    else {
        return false;
    };

    Symbol::are_equivalent(&a_edge.symbol, &b_edge.symbol)
        && Symbol::are_equivalent(&a_start, &b_start)
        && Symbol::are_equivalent(&a_end, &b_end)
}

/// Per-direction, per-symbol edge-count admissibility.
///
/// Without exact flags the target must have at least as many edges as the
/// pattern overall and per distinct non-wildcard symbol; with an exact
/// flag the corresponding direction switches to equality on the total.
fn check_edge_count(pattern: &Graph, target: &Graph, p_node: NodeId, t_node: NodeId) -> bool {
    let p = match pattern.node(p_node) {
        Some(p) => p,
        None => return false,
    };

    if p.exact_input || p.exact_output {
        return exact_edge_count(pattern, target, p_node, t_node);
    }

    let p_in = pattern.edges_to(p_node);
    let p_out = pattern.edges_from(p_node);
    let t_in = target.edges_to(t_node);
    let t_out = target.edges_from(t_node);

    if p_out.len() > t_out.len() || p_in.len() > t_in.len() {
        return false;
    }

    for symbol in distinct_labeled_symbols(&p_in) {
        if count_with_symbol(&t_in, symbol) < count_with_symbol(&p_in, symbol) {
            return false;
        }
    }
    for symbol in distinct_labeled_symbols(&p_out) {
        if count_with_symbol(&t_out, symbol) < count_with_symbol(&p_out, symbol) {
            return false;
        }
    }

    true
}

/// Exact-count policy for nodes flagged `exact_input` / `exact_output`.
///
/// The flagged direction requires the target total to equal the pattern
/// total; per distinct non-wildcard symbol the target may exceed the
/// pattern only by the pattern's own wildcard-edge count on that side.
fn exact_edge_count(pattern: &Graph, target: &Graph, p_node: NodeId, t_node: NodeId) -> bool {
    let p = match pattern.node(p_node) {
        Some(p) => p,
        None => return false,
    };

    let p_in = pattern.edges_to(p_node);
    let p_out = pattern.edges_from(p_node);
    let t_in = target.edges_to(t_node);
    let t_out = target.edges_from(t_node);

    if p.exact_input && p_in.len() != t_in.len() {
        return false;
    }
    if p.exact_output && p_out.len() != t_out.len() {
        return false;
    }

    let wildcards_in = p_in.iter().filter(|e| e.symbol.is_asterisk()).count();
    let wildcards_out = p_out.iter().filter(|e| e.symbol.is_asterisk()).count();

    for symbol in distinct_labeled_symbols(&p_in) {
        let p_count = count_with_symbol(&p_in, symbol);
        let t_count = count_with_symbol(&t_in, symbol);
        if t_count < p_count {
            return false;
        }
        if p.exact_input && p_count + wildcards_in < t_count {
            return false;
        }
    }

    for symbol in distinct_labeled_symbols(&p_out) {
        let p_count = count_with_symbol(&p_out, symbol);
        let t_count = count_with_symbol(&t_out, symbol);
        if t_count < p_count {
            return false;
        }
        if p.exact_output && p_count + wildcards_out < t_count {
            return false;
        }
    }

    true
}

/// Distinct non-wildcard symbols among `edges`, in first-seen order.
fn distinct_labeled_symbols(edges: &[Edge]) -> impl Iterator<Item = &Symbol> {
    edges
        .iter()
        .map(|e| &e.symbol)
        .filter(|s| !s.is_asterisk())
        .unique()
}

fn count_with_symbol(edges: &[Edge], symbol: &Symbol) -> usize {
    edges.iter().filter(|e| &e.symbol == symbol).count()
}

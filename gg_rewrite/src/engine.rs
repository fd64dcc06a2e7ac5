//! The rule-application loop.

use gg_common::{Config, Graph, Group, RuleData, SymbolKind};
use gg_subgraph::SubgraphMatcher;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::{debug, info, warn};

use crate::error::RewriteError;
use crate::select::pick_weighted;
use crate::separate::separate_nodes;
use crate::substitute::substitute;

// Degree sanity bounds. A node this entangled makes the downstream
// consumers (room/corridor layout) degenerate, so the whole derivation is
// re-rolled.
const MAX_IN_DEGREE: usize = 4;
const MAX_OUT_DEGREE: usize = 4;
const MAX_LABELED_OUT: usize = 3;

/// Derives a graph from an ordered rule list.
///
/// The seed is the instantiated left graph of the first rule. Returns
/// `Ok(None)` iff `rules` is empty; contract violations inside a rule's
/// slot wiring surface as [`RewriteError`].
pub fn derive(rules: &[RuleData], max_nodes: usize) -> Result<Option<Graph>, RewriteError> {
    derive_with(rules, &Config::with_max_nodes(max_nodes))
}

/// [`derive`] with full control over budgets, retries, and the RNG seed.
pub fn derive_with(rules: &[RuleData], config: &Config) -> Result<Option<Graph>, RewriteError> {
    let mut rng = match config.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    derive_with_rng(rules, config, &mut rng)
}

/// [`derive_with`] against a caller-owned RNG.
pub fn derive_with_rng<R: Rng>(
    rules: &[RuleData],
    config: &Config,
    rng: &mut R,
) -> Result<Option<Graph>, RewriteError> {
    if rules.is_empty() {
        return Ok(None);
    }

    let mut graph = run_session(rules, config, rng)?;

    // Re-roll derivations whose node degrees the consumers downstream
    // cannot lay out. The retry count is capped; the last derivation wins
    // regardless.
    let mut retries = 0;
    while !degrees_acceptable(&graph) {
        if retries >= config.max_retries {
            warn!(retries, "degree check still failing, returning last derivation");
            break;
        }
        retries += 1;
        info!(retries, "derivation failed degree check, re-rolling");
        graph = run_session(rules, config, rng)?;
    }

    Ok(Some(graph))
}

/// One full pass of the rule list over a fresh working graph.
fn run_session<R: Rng>(
    rules: &[RuleData],
    config: &Config,
    rng: &mut R,
) -> Result<Graph, RewriteError> {
    let mut working = Graph::instantiate(&rules[0].left);

    let mut i = 0;
    let mut budget = config.max_nodes as i64;

    while i < rules.len() {
        let applied = apply_rule(&rules[i], &mut working, config, rng)?;

        if applied && budget > 0 {
            // The same rule gets another go, on a shrinking budget, so a
            // repeatedly-applicable rule cannot grow the graph forever.
            budget -= 1;
        } else {
            i += 1;
            // Later rules get a larger allowance; they are the ones
            // expected to close out the remaining non-terminals.
            budget = (config.max_nodes + i) as i64;
        }
    }

    info!(
        nodes = working.node_count(),
        edges = working.edge_count(),
        "rewriting session complete"
    );

    Ok(working)
}

/// Attempts one application of `rule` against the working graph.
///
/// Both rule graphs are freshly instantiated from their templates, so slot
/// and position mutation during substitution never leaks into later
/// attempts.
pub fn apply_rule<R: Rng>(
    rule: &RuleData,
    working: &mut Graph,
    config: &Config,
    rng: &mut R,
) -> Result<bool, RewriteError> {
    let left = Graph::instantiate(&rule.left);
    let right = Graph::instantiate(&rule.right);

    let mapping = match config.max_match_steps {
        Some(max) => SubgraphMatcher::find_first_bounded(&left, working, max),
        None => SubgraphMatcher::find_first(&left, working),
    };
    let Some(mapping) = mapping else {
        debug!(rule = %rule.name, "rule does not apply");
        return Ok(false);
    };

    // A grouped right-hand side substitutes exactly one weighted
    // alternative; ungrouped rules substitute the whole graph.
    let replacement = if rule.right.groups.is_empty() {
        right
    } else {
        let groups = Group::collect(&right, &rule.right.groups);
        match pick_weighted(&groups, rng) {
            Some(group) => group.to_graph(&right),
            None => right,
        }
    };

    substitute(&mapping, &left, working, &replacement, &rule.name)?;
    separate_nodes(working, config.separation_iterations);

    info!(rule = %rule.name, nodes = working.node_count(), "rule applied");
    Ok(true)
}

fn degrees_acceptable(graph: &Graph) -> bool {
    graph.nodes().all(|node| {
        let out_edges = graph.edges_from(node.id());
        let labeled_out = out_edges
            .iter()
            .filter(|e| e.symbol.kind != SymbolKind::Edge)
            .count();

        graph.edges_to(node.id()).len() <= MAX_IN_DEGREE
            && out_edges.len() <= MAX_OUT_DEGREE
            && labeled_out <= MAX_LABELED_OUT
    })
}

//! First-match constrained subgraph embedding search.

use gg_common::Graph;
use tracing::{debug, info};

use crate::compat::compatible;
use crate::mapping::Mapping;
use crate::neighbors::compatible_neighbors;
use crate::state::MatchState;

/// Entry point for constrained subgraph-embedding searches.
///
/// The search maps every pattern node onto a distinct target node and
/// stops at the first complete mapping; it never enumerates further
/// embeddings. Absence of a match is the normal "rule does not apply"
/// signal, not an error.
pub struct SubgraphMatcher<'p, 't> {
    pattern: &'p Graph,
    target: &'t Graph,
    max_steps: Option<u64>,
}

impl<'p, 't> SubgraphMatcher<'p, 't> {
    /// Finds the first embedding of `pattern` in `target`, if any.
    pub fn find_first(pattern: &'p Graph, target: &'t Graph) -> Option<Mapping> {
        SubgraphMatcher {
            pattern,
            target,
            max_steps: None,
        }
        .run()
    }

    /// Like [`find_first`](Self::find_first), but gives up after
    /// `max_steps` candidate trials. Budget exhaustion reports "no match".
    pub fn find_first_bounded(
        pattern: &'p Graph,
        target: &'t Graph,
        max_steps: u64,
    ) -> Option<Mapping> {
        SubgraphMatcher {
            pattern,
            target,
            max_steps: Some(max_steps),
        }
        .run()
    }

    fn run(self) -> Option<Mapping> {
        info!(
            pattern_nodes = self.pattern.node_count(),
            target_nodes = self.target.node_count(),
            "starting subgraph search"
        );

        let mut state = MatchState::new(self.pattern, self.target, self.max_steps);
        let result = Self::backtrack(&mut state);

        match &result {
            Some(mapping) => info!(
                mapped = mapping.len(),
                steps = state.steps(),
                "embedding found"
            ),
            None => debug!(steps = state.steps(), "no embedding"),
        }

        result
    }

    fn backtrack(state: &mut MatchState<'_, '_>) -> Option<Mapping> {
        if state.is_complete() {
            return Some(state.mapping.clone());
        }

        let p_node = state.next_pattern_node()?;

        for t_node in state.unmatched_targets() {
            if !state.consume_step() {
                debug!("step budget exhausted, giving up");
                return None;
            }

            if !compatible(state.pattern, state.target, p_node, t_node, &state.mapping) {
                continue;
            }
            if !compatible_neighbors(state.pattern, state.target, p_node, t_node, &state.mapping) {
                continue;
            }

            state.add_mapping(p_node, t_node);
            if let Some(found) = Self::backtrack(state) {
                return Some(found);
            }
            state.remove_mapping(p_node, t_node);
        }

        None
    }
}

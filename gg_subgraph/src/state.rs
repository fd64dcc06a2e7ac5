//! Backtracking search state.

use gg_common::{Graph, NodeId};
use indexmap::IndexSet;

use crate::mapping::Mapping;

/// Mutable state of one `find_first` invocation: the mapping under
/// construction, the not-yet-matched node sets on both sides, and the
/// optional step budget.
pub(crate) struct MatchState<'p, 't> {
    pub(crate) pattern: &'p Graph,
    pub(crate) target: &'t Graph,
    pub(crate) mapping: Mapping,
    unmatched_pattern: IndexSet<NodeId>,
    unmatched_target: IndexSet<NodeId>,
    steps: u64,
    max_steps: Option<u64>,
}

impl<'p, 't> MatchState<'p, 't> {
    pub(crate) fn new(pattern: &'p Graph, target: &'t Graph, max_steps: Option<u64>) -> Self {
        MatchState {
            pattern,
            target,
            mapping: Mapping::new(),
            unmatched_pattern: pattern.node_ids().into_iter().collect(),
            unmatched_target: target.node_ids().into_iter().collect(),
            steps: 0,
            max_steps,
        }
    }

    /// All pattern nodes are mapped.
    pub(crate) fn is_complete(&self) -> bool {
        self.unmatched_pattern.is_empty()
    }

    /// The next pattern node to try, in graph insertion order.
    pub(crate) fn next_pattern_node(&self) -> Option<NodeId> {
        self.unmatched_pattern.first().copied()
    }

    /// Snapshot of the currently unmatched target nodes, in insertion
    /// order. A snapshot, because the set mutates while candidates are
    /// tried.
    pub(crate) fn unmatched_targets(&self) -> Vec<NodeId> {
        self.unmatched_target.iter().copied().collect()
    }

    pub(crate) fn add_mapping(&mut self, pattern: NodeId, target: NodeId) {
        self.mapping.insert(pattern, target);
        self.unmatched_pattern.shift_remove(&pattern);
        self.unmatched_target.shift_remove(&target);
    }

    pub(crate) fn remove_mapping(&mut self, pattern: NodeId, target: NodeId) {
        self.mapping.remove(pattern, target);
        self.unmatched_pattern.insert(pattern);
        self.unmatched_target.insert(target);
    }

    /// Charges one search step against the budget; `false` means the
    /// budget is exhausted and the search must give up.
    pub(crate) fn consume_step(&mut self) -> bool {
        self.steps += 1;
        match self.max_steps {
            Some(max) => self.steps <= max,
            None => true,
        }
    }

    /// Steps consumed so far.
    pub(crate) fn steps(&self) -> u64 {
        self.steps
    }
}

//! The injective pattern-to-target node mapping built up during search.

use std::collections::HashMap;

use gg_common::NodeId;

/// A partial (or, once the search completes, total) injective mapping from
/// pattern nodes to target nodes.
///
/// Both directions are indexed so "is this target node taken?" stays O(1)
/// during backtracking.
#[derive(Debug, Clone, Default)]
pub struct Mapping {
    pattern_to_target: HashMap<NodeId, NodeId>,
    target_to_pattern: HashMap<NodeId, NodeId>,
}

impl Mapping {
    /// An empty mapping.
    pub fn new() -> Self {
        Mapping::default()
    }

    /// Number of mapped pairs.
    pub fn len(&self) -> usize {
        debug_assert_eq!(self.pattern_to_target.len(), self.target_to_pattern.len());
        self.pattern_to_target.len()
    }

    /// Whether nothing is mapped yet.
    pub fn is_empty(&self) -> bool {
        self.pattern_to_target.is_empty()
    }

    /// Records `pattern -> target`.
    pub fn insert(&mut self, pattern: NodeId, target: NodeId) {
        self.pattern_to_target.insert(pattern, target);
        self.target_to_pattern.insert(target, pattern);
    }

    /// Forgets `pattern -> target`; the backtracking undo.
    pub fn remove(&mut self, pattern: NodeId, target: NodeId) {
        self.pattern_to_target.remove(&pattern);
        self.target_to_pattern.remove(&target);
    }

    /// The target node `pattern` maps to, if mapped.
    pub fn target_of(&self, pattern: NodeId) -> Option<NodeId> {
        self.pattern_to_target.get(&pattern).copied()
    }

    /// The pattern node mapped onto `target`, if any.
    pub fn pattern_of(&self, target: NodeId) -> Option<NodeId> {
        self.target_to_pattern.get(&target).copied()
    }

    /// Whether some pattern node already maps onto `target`.
    pub fn is_target_mapped(&self, target: NodeId) -> bool {
        self.target_to_pattern.contains_key(&target)
    }

    /// All mapped `(pattern, target)` pairs, in no particular order.
    pub fn pairs(&self) -> impl Iterator<Item = (NodeId, NodeId)> + '_ {
        self.pattern_to_target.iter().map(|(&p, &t)| (p, t))
    }

    /// All target nodes currently mapped onto.
    pub fn targets(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.target_to_pattern.keys().copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn insert_then_remove_is_identity() {
        let (p, t) = (NodeId::fresh(), NodeId::fresh());
        let mut m = Mapping::new();

        m.insert(p, t);
        assert_eq!(m.target_of(p), Some(t));
        assert_eq!(m.pattern_of(t), Some(p));
        assert!(m.is_target_mapped(t));

        m.remove(p, t);
        assert!(m.is_empty());
        assert!(!m.is_target_mapped(t));
    }
}

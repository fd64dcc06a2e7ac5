//! Graph nodes and their identities.

use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::geometry::Vec2;
use crate::symbol::Symbol;

/// Unique identity of a node.
///
/// Two nodes are the same node iff their ids are equal; symbols, positions
/// and flags never participate in identity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct NodeId(Uuid);

impl NodeId {
    /// Mints a fresh, globally unique id.
    pub fn fresh() -> Self {
        NodeId(Uuid::new_v4())
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// A node of a grammar graph.
#[derive(Debug, Clone, PartialEq)]
pub struct Node {
    id: NodeId,
    /// The node's typed label.
    pub symbol: Symbol,
    /// Transient correlation slot aligning pattern nodes with replacement
    /// nodes during one substitution step. Cleared afterwards.
    pub slot: Option<usize>,
    /// Layout hint; no topological meaning.
    pub position: Vec2,
    /// Id of the right-hand-side group this node belongs to, if any.
    pub group: Option<String>,
    /// Require the target's in-edge count to match exactly during search.
    pub exact_input: bool,
    /// Require the target's out-edge count to match exactly during search.
    pub exact_output: bool,
}

impl Node {
    /// Creates a node with a fresh id and no slot, group, or exact flags.
    pub fn new(symbol: Symbol, position: Vec2) -> Self {
        Node {
            id: NodeId::fresh(),
            symbol,
            slot: None,
            position,
            group: None,
            exact_input: false,
            exact_output: false,
        }
    }

    /// The node's identity.
    pub fn id(&self) -> NodeId {
        self.id
    }

    /// Returns a copy of this node under a freshly minted id.
    pub fn reidentified(&self) -> Node {
        let mut copy = self.clone();
        copy.id = NodeId::fresh();
        copy
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fresh_ids_are_unique() {
        let a = NodeId::fresh();
        let b = NodeId::fresh();
        assert_ne!(a, b);
    }

    #[test]
    fn reidentified_copies_everything_but_the_id() {
        let mut n = Node::new(Symbol::terminal("k"), Vec2::new(1.0, 2.0));
        n.slot = Some(3);
        let copy = n.reidentified();
        assert_ne!(copy.id(), n.id());
        assert_eq!(copy.symbol, n.symbol);
        assert_eq!(copy.slot, n.slot);
        assert_eq!(copy.position, n.position);
    }
}

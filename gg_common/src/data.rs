//! Serialized rule templates.
//!
//! This is the read-only contract the editor/persistence layer hands the
//! engine: flat records with string node ids. The engine never mutates a
//! template; [`Graph::instantiate`](crate::Graph::instantiate) deep-copies
//! one into a live graph per application attempt, so slot and position
//! mutation during substitution cannot leak between applications.

use serde::{Deserialize, Serialize};

use crate::geometry::Vec2;
use crate::symbol::Symbol;

/// An ordered production rule: match `left`, replace it with `right`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RuleData {
    /// Human-readable rule name, for diagnostics only.
    pub name: String,
    /// The pattern graph searched for in the working graph.
    pub left: GraphData,
    /// The replacement graph, optionally partitioned into weighted groups.
    pub right: GraphData,
}

/// A serialized graph.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct GraphData {
    /// Template id, for diagnostics only.
    #[serde(default)]
    pub id: String,
    /// Serialized nodes.
    #[serde(default)]
    pub nodes: Vec<NodeData>,
    /// Serialized edges, referring to nodes by their template ids.
    #[serde(default)]
    pub edges: Vec<EdgeData>,
    /// Weighted alternative outcomes, if this is a right-hand side.
    #[serde(default)]
    pub groups: Vec<GroupData>,
}

/// A serialized node.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NodeData {
    /// Template-local id edges refer to.
    pub id: String,
    /// The node's symbol.
    pub symbol: Symbol,
    /// Correlation slot aligning left- and right-hand nodes of one rule.
    #[serde(default)]
    pub slot: Option<usize>,
    /// Id of the group this node belongs to, if any.
    #[serde(default)]
    pub group: Option<String>,
    /// Layout hint.
    #[serde(default)]
    pub position: Vec2,
    /// Exact in-edge-count matching flag.
    #[serde(default)]
    pub exact_input: bool,
    /// Exact out-edge-count matching flag.
    #[serde(default)]
    pub exact_output: bool,
}

impl NodeData {
    /// Builds a node record with no slot, group, or exact flags.
    pub fn new(id: impl Into<String>, symbol: Symbol) -> Self {
        NodeData {
            id: id.into(),
            symbol,
            slot: None,
            group: None,
            position: Vec2::ZERO,
            exact_input: false,
            exact_output: false,
        }
    }

    /// Same record with the correlation slot set.
    pub fn with_slot(mut self, slot: usize) -> Self {
        self.slot = Some(slot);
        self
    }

    /// Same record tagged with a group id.
    pub fn with_group(mut self, group: impl Into<String>) -> Self {
        self.group = Some(group.into());
        self
    }

    /// Same record at the given position.
    pub fn at(mut self, x: f32, y: f32) -> Self {
        self.position = Vec2::new(x, y);
        self
    }
}

/// A serialized edge between two template node ids.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EdgeData {
    /// Template id of the source node.
    pub start: String,
    /// Template id of the destination node.
    pub end: String,
    /// The edge's symbol.
    #[serde(default)]
    pub symbol: Symbol,
}

impl EdgeData {
    /// Builds an edge record.
    pub fn new(start: impl Into<String>, end: impl Into<String>, symbol: Symbol) -> Self {
        EdgeData {
            start: start.into(),
            end: end.into(),
            symbol,
        }
    }
}

/// A serialized weighted group of a right-hand-side graph.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GroupData {
    /// Group id node records refer to.
    pub id: String,
    /// Human-readable name, for diagnostics only.
    #[serde(default)]
    pub name: String,
    /// Selection weight; non-negative.
    #[serde(default = "default_weight")]
    pub weight: f32,
    /// Layout hint for the editor's group box.
    #[serde(default)]
    pub position: Vec2,
}

fn default_weight() -> f32 {
    1.0
}

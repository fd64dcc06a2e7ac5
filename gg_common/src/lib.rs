//! Common types for the GG workspace.
//!
//! This crate provides the typed-symbol vocabulary, the mutable directed
//! multigraph that rules are matched against and rewritten into, weighted
//! right-hand-side groups, the serialized rule-template contract, and the
//! engine configuration shared across the workspace.

mod config;
mod data;
mod edge;
mod geometry;
mod graph;
mod group;
mod node;
mod symbol;

pub use crate::config::Config;
pub use crate::data::{EdgeData, GraphData, GroupData, NodeData, RuleData};
pub use crate::edge::{Edge, EdgeId};
pub use crate::geometry::Vec2;
pub use crate::graph::Graph;
pub use crate::group::Group;
pub use crate::node::{Node, NodeId};
pub use crate::symbol::{Symbol, SymbolKind, SymbolKindParseError};

//! Constrained subgraph-isomorphism search for grammar graphs.
//!
//! Given a pattern graph and a target graph, the matcher looks for a total
//! injective mapping from pattern nodes to target nodes under symbol
//! compatibility, per-direction edge-count admissibility, one-to-one local
//! edge correspondence, and recursive neighbourhood checks. It is a
//! first-match backtracking search: the first complete mapping wins and
//! the search stops there.

mod compat;
mod mapping;
mod matcher;
mod neighbors;
mod state;

pub use crate::mapping::Mapping;
pub use crate::matcher::SubgraphMatcher;

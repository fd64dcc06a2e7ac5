//! Graph-grammar rewriting engine.
//!
//! Drives procedural generation by repeatedly matching each rule's left
//! graph inside a single mutable working graph (via [`gg_subgraph`]) and
//! substituting the rule's right graph — or one weighted group of it — in
//! place of the match. The session ends when every rule has stopped
//! applying; the working graph is the derived result.
//!
//! The whole engine is synchronous and single-threaded: one session owns
//! the working graph exclusively from seed to result.

mod engine;
mod error;
mod select;
mod separate;
mod substitute;

pub use crate::engine::{apply_rule, derive, derive_with, derive_with_rng};
pub use crate::error::RewriteError;

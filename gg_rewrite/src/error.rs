//! Error types for rule application.
//!
//! Only contract violations surface as errors. A rule that does not match
//! is normal control flow, and an empty rule list yields "no result" at
//! the entry point; neither goes through this type.

use thiserror::Error;

/// Errors raised while substituting a replacement graph into the working
/// graph.
#[derive(Debug, Error)]
pub enum RewriteError {
    /// A replacement edge referred to a correlation slot that resolved to
    /// no working-graph node. The rule's left/right slot assignments are
    /// inconsistent.
    #[error("replacement edge refers to unresolved slot {slot} in rule {rule:?}")]
    UnresolvedSlot {
        /// The slot index that failed to resolve.
        slot: usize,
        /// Name of the offending rule.
        rule: String,
    },

    /// A replacement edge's endpoint carries no correlation slot, so it
    /// cannot be wired into the working graph.
    #[error("replacement edge endpoint without a slot in rule {rule:?}")]
    UnslottedEndpoint {
        /// Name of the offending rule.
        rule: String,
    },
}

impl RewriteError {
    /// Create an unresolved-slot error.
    pub fn unresolved_slot(slot: usize, rule: impl Into<String>) -> Self {
        Self::UnresolvedSlot {
            slot,
            rule: rule.into(),
        }
    }

    /// Create an unslotted-endpoint error.
    pub fn unslotted_endpoint(rule: impl Into<String>) -> Self {
        Self::UnslottedEndpoint { rule: rule.into() }
    }
}

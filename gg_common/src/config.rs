//! Engine configuration.

use serde::{Deserialize, Serialize};

/// Tuning knobs for a rewriting session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Seed for the per-rule iteration budget: a rule may re-fire at most
    /// `max_nodes + rule_index` times before the engine moves on.
    pub max_nodes: usize,
    /// RNG seed for reproducible derivations. `None` seeds from entropy.
    pub seed: Option<u64>,
    /// Upper bound on matcher search steps per invocation. `None` leaves
    /// the search unbounded.
    pub max_match_steps: Option<u64>,
    /// How many times a derivation failing the degree sanity check is
    /// re-rolled before the last result is returned anyway.
    pub max_retries: usize,
    /// Iteration cap for the cosmetic node-separation pass.
    pub separation_iterations: usize,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            max_nodes: 10,
            seed: None,
            max_match_steps: None,
            max_retries: 8,
            separation_iterations: 100,
        }
    }
}

impl Config {
    /// Default configuration with the given iteration-budget seed.
    pub fn with_max_nodes(max_nodes: usize) -> Self {
        Config {
            max_nodes,
            ..Config::default()
        }
    }

    /// Same configuration with a fixed RNG seed.
    pub fn seeded(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_values() {
        let config = Config::default();
        assert_eq!(config.max_nodes, 10);
        assert_eq!(config.separation_iterations, 100);
        assert!(config.max_match_steps.is_none());
    }

    #[test]
    fn seeded_sets_only_the_seed() {
        let config = Config::with_max_nodes(4).seeded(7);
        assert_eq!(config.max_nodes, 4);
        assert_eq!(config.seed, Some(7));
    }
}

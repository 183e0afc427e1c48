//! n-max search configuration parameters.

use serde::{Deserialize, Serialize};

/// n-max search configuration parameters.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct NMaxConfig {
    /// Plies to search below the root (default: 2).
    /// At depth 0 the root is evaluated directly.
    pub depth: u32,

    /// Maximum branches explored per interior node (`None` = all).
    pub width: Option<usize>,

    /// Probability that a pruned node keeps a random sample of its moves
    /// instead of the heuristically best ones (default: 1.0).
    /// Clamped to `[0, 1]`; 0 always ranks by lookahead.
    pub temperature: f64,

    /// Plies of the full-width search used to rank moves when pruning.
    pub lookahead_depth: u32,

    /// Random seed for pruning decisions.
    /// Same seed produces deterministic searches.
    pub seed: u64,
}

impl Default for NMaxConfig {
    fn default() -> Self {
        Self {
            depth: 2,
            width: None,
            temperature: 1.0,
            lookahead_depth: 1,
            seed: 42,
        }
    }
}

impl NMaxConfig {
    /// Create a new config with custom depth.
    pub fn with_depth(mut self, depth: u32) -> Self {
        self.depth = depth;
        self
    }

    /// Create a new config with a branch limit.
    pub fn with_width(mut self, width: usize) -> Self {
        self.width = Some(width);
        self
    }

    /// Create a new config with custom temperature.
    pub fn with_temperature(mut self, temperature: f64) -> Self {
        self.temperature = temperature;
        self
    }

    /// Create a new config with custom lookahead depth.
    pub fn with_lookahead_depth(mut self, depth: u32) -> Self {
        self.lookahead_depth = depth;
        self
    }

    /// Create a new config with custom seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = NMaxConfig::default();
        assert_eq!(config.depth, 2);
        assert_eq!(config.width, None);
        assert_eq!(config.temperature, 1.0);
        assert_eq!(config.lookahead_depth, 1);
        assert_eq!(config.seed, 42);
    }

    #[test]
    fn test_builder_pattern() {
        let config = NMaxConfig::default()
            .with_depth(4)
            .with_width(3)
            .with_temperature(0.25)
            .with_seed(7);

        assert_eq!(config.depth, 4);
        assert_eq!(config.width, Some(3));
        assert_eq!(config.temperature, 0.25);
        assert_eq!(config.seed, 7);
    }

    #[test]
    fn test_serialization() {
        let config = NMaxConfig::default().with_width(5);
        let json = serde_json::to_string(&config).unwrap();
        let deserialized: NMaxConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(config, deserialized);
    }
}

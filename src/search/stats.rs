//! n-max search statistics for diagnostics and tuning.

use serde::{Deserialize, Serialize};

/// Statistics collected during one n-max search.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchStats {
    /// Nodes visited, leaves included.
    pub nodes: u64,

    /// Leaves evaluated.
    pub leaves: u64,

    /// Nodes pruned by lookahead ranking.
    pub heuristic_prunes: u64,

    /// Nodes pruned by random sampling.
    pub random_prunes: u64,

    /// Lookahead searches run to rank moves.
    pub lookahead_searches: u64,

    /// Deepest ply reached.
    pub max_depth: u32,

    /// Total time spent searching (microseconds).
    pub time_us: u64,
}

impl SearchStats {
    /// Create new empty statistics.
    pub fn new() -> Self {
        Self::default()
    }

    /// Reset all statistics to zero.
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Calculate nodes visited per second.
    #[must_use]
    pub fn nodes_per_second(&self) -> f64 {
        if self.time_us == 0 {
            0.0
        } else {
            self.nodes as f64 / (self.time_us as f64 / 1_000_000.0)
        }
    }
}

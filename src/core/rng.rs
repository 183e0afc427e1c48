//! Deterministic, injectable randomness for search pruning.
//!
//! The search owns exactly one `SearchRng`; there is no global random
//! state. Equal seeds give equal pruning decisions, streams can be forked
//! for a second search, and the position in a stream can be saved.
//!
//! ```
//! use rule_engine::core::SearchRng;
//!
//! let mut a = SearchRng::new(7);
//! let mut b = SearchRng::new(7);
//! assert_eq!(a.sample_indices(10, 3), b.sample_indices(10, 3));
//! ```

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};

/// Seedable RNG consumed by the n-max search.
///
/// Uses ChaCha8 for speed while keeping streams reproducible across platforms.
#[derive(Clone, Debug)]
pub struct SearchRng {
    inner: ChaCha8Rng,
    seed: u64,
    fork_counter: u64,
}

impl SearchRng {
    #[must_use]
    pub fn new(seed: u64) -> Self {
        Self {
            inner: ChaCha8Rng::seed_from_u64(seed),
            seed,
            fork_counter: 0,
        }
    }

    /// Fork this RNG to create an independent, deterministic stream.
    #[must_use]
    pub fn fork(&mut self) -> Self {
        self.fork_counter += 1;
        let fork_seed = self.seed.wrapping_add(self.fork_counter.wrapping_mul(0x9E3779B97F4A7C15));
        Self::new(fork_seed)
    }

    /// Generate a random boolean that is true with `probability`.
    ///
    /// Probabilities outside `[0, 1]` are clamped, so `0.0` never and `1.0`
    /// always returns true.
    pub fn gen_bool(&mut self, probability: f64) -> bool {
        let p = if probability.is_nan() { 0.0 } else { probability.clamp(0.0, 1.0) };
        self.inner.gen_bool(p)
    }

    /// Sample `amount` distinct indices from `0..length` without replacement.
    ///
    /// The result is sorted ascending so callers can keep the sampled items
    /// in their original order. `amount` is capped at `length`.
    pub fn sample_indices(&mut self, length: usize, amount: usize) -> Vec<usize> {
        let amount = amount.min(length);
        let mut picked = rand::seq::index::sample(&mut self.inner, length, amount).into_vec();
        picked.sort_unstable();
        picked
    }

    /// Get the current state for checkpointing.
    #[must_use]
    pub fn state(&self) -> SearchRngState {
        SearchRngState {
            seed: self.seed,
            word_pos: self.inner.get_word_pos(),
            fork_counter: self.fork_counter,
        }
    }

    /// Restore from a saved state.
    #[must_use]
    pub fn from_state(state: &SearchRngState) -> Self {
        let mut inner = ChaCha8Rng::seed_from_u64(state.seed);
        inner.set_word_pos(state.word_pos);
        Self {
            inner,
            seed: state.seed,
            fork_counter: state.fork_counter,
        }
    }
}

/// Saved position in a `SearchRng` stream.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchRngState {
    pub seed: u64,
    pub word_pos: u128,
    pub fork_counter: u64,
}

//! Deterministic random number generation for self-play.
//!
//! The rules themselves never draw randomness; only move-selection
//! policies do. A game played from a given seed is reproducible move for
//! move, which makes self-play trajectories replayable and testable.
//!
//! ## Usage
//!
//! ```
//! use bagchal::core::GameRng;
//!
//! let mut rng = GameRng::new(42);
//!
//! // One independent stream per side
//! let mut goat_rng = rng.fork();
//! let mut tiger_rng = rng.fork();
//! assert_ne!(goat_rng.seed(), tiger_rng.seed());
//!
//! // Same seed, same forks
//! let mut again = GameRng::new(42);
//! assert_eq!(again.fork().seed(), goat_rng.seed());
//! # let _ = (goat_rng.choose(&[1, 2]), tiger_rng.choose(&[1, 2]));
//! ```

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Deterministic ChaCha8 RNG with forking.
#[derive(Clone, Debug)]
pub struct GameRng {
    inner: ChaCha8Rng,
    seed: u64,
    fork_counter: u64,
}

impl GameRng {
    /// Create a new RNG with the given seed.
    #[must_use]
    pub fn new(seed: u64) -> Self {
        Self {
            inner: ChaCha8Rng::seed_from_u64(seed),
            seed,
            fork_counter: 0,
        }
    }

    /// The seed this stream was created from.
    #[must_use]
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Fork an independent, deterministic stream.
    ///
    /// The n-th fork of a given seed always has the same seed.
    #[must_use]
    pub fn fork(&mut self) -> Self {
        self.fork_counter += 1;
        let fork_seed = self
            .seed
            .wrapping_add(self.fork_counter.wrapping_mul(0x9E37_79B9_7F4A_7C15));
        Self::new(fork_seed)
    }

    /// Choose a random element from a slice.
    #[must_use]
    pub fn choose<'a, T>(&mut self, slice: &'a [T]) -> Option<&'a T> {
        use rand::seq::SliceRandom;
        slice.choose(&mut self.inner)
    }

    /// Choose an index with probability proportional to its weight.
    ///
    /// Weights need not sum to 1. Returns `None` if the weights are empty
    /// or sum to zero.
    pub fn choose_weighted(&mut self, weights: &[f32]) -> Option<usize> {
        let total: f32 = weights.iter().sum();
        if weights.is_empty() || total <= 0.0 {
            return None;
        }

        let mut threshold = self.inner.gen::<f32>() * total;
        for (i, &weight) in weights.iter().enumerate() {
            threshold -= weight;
            if threshold <= 0.0 && weight > 0.0 {
                return Some(i);
            }
        }

        // Rounding left a sliver; fall back to the last positive weight.
        weights.iter().rposition(|&w| w > 0.0)
    }
}

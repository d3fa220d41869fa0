//! Deterministic random number generation.
//!
//! PCG (Permuted Congruential Generator) with partitioned seeds, so every
//! widget on a page gets its own reproducible stream.
//!
//! # Reproducibility Guarantee
//!
//! Given the same master seed, a session produces the same canned outputs
//! and the same simulated latencies on every run and every platform.

use rand::prelude::*;
use rand_pcg::Pcg64;
use serde::{Deserialize, Serialize};

/// Deterministic, reproducible random number generator.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimRng {
    /// Master seed for reproducibility.
    master_seed: u64,
    /// Current stream index for partitioning.
    stream: u64,
    /// Internal PCG state.
    rng: Pcg64,
}

impl SimRng {
    /// Create a new RNG with the given master seed.
    #[must_use]
    pub fn new(master_seed: u64) -> Self {
        Self {
            master_seed,
            stream: 0,
            rng: Pcg64::seed_from_u64(master_seed),
        }
    }

    /// Get the master seed.
    #[must_use]
    pub const fn master_seed(&self) -> u64 {
        self.master_seed
    }

    /// Get current stream index.
    #[must_use]
    pub const fn stream(&self) -> u64 {
        self.stream
    }

    /// Create `n` independent child streams.
    ///
    /// Each partition gets a stream derived from the master seed, so adding
    /// a consumer later does not shift the sequences of earlier ones.
    ///
    /// # Example
    ///
    /// ```rust
    /// use landing_sim::engine::rng::SimRng;
    ///
    /// let mut rng = SimRng::new(42);
    /// let partitions = rng.partition(2);
    /// assert_eq!(partitions.len(), 2);
    /// ```
    #[must_use]
    pub fn partition(&mut self, n: usize) -> Vec<Self> {
        let partitions: Vec<Self> = (0..n)
            .map(|i| {
                let stream = self.stream + i as u64 + 1;
                let seed = self
                    .master_seed
                    .wrapping_add(stream.wrapping_mul(0x9E37_79B9_7F4A_7C15));
                Self {
                    master_seed: self.master_seed,
                    stream,
                    rng: Pcg64::seed_from_u64(seed),
                }
            })
            .collect();

        self.stream += n as u64;
        partitions
    }

    /// Generate a random u64.
    pub fn gen_u64(&mut self) -> u64 {
        self.rng.gen()
    }

    /// Uniform index in `0..len`, or `None` when `len == 0`.
    pub fn gen_index(&mut self, len: usize) -> Option<usize> {
        (len > 0).then(|| self.rng.gen_range(0..len))
    }

    /// Uniform integer in the inclusive range `[lo, hi]`.
    ///
    /// Bounds are swapped if given in the wrong order.
    pub fn gen_range_u64(&mut self, lo: u64, hi: u64) -> u64 {
        let (lo, hi) = if lo <= hi { (lo, hi) } else { (hi, lo) };
        self.rng.gen_range(lo..=hi)
    }

    /// Uniformly choose one element of `items`.
    pub fn choose<'a, T>(&mut self, items: &'a [T]) -> Option<&'a T> {
        self.gen_index(items.len()).map(|i| &items[i])
    }
}

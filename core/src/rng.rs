//! Deterministic random number generation.
//!
//! RULE: Nothing in the pipeline may call any platform RNG.
//! All randomness flows through a SalesRng seeded from the run's
//! master seed, so the same seed always replays the same dataset.
//!
//! The draw helpers mirror the shapes the generator needs: uniform
//! integers, uniform floats over a range, and weighted choice over a
//! fixed probability table.

use rand::{RngCore, SeedableRng};
use rand_pcg::Pcg64Mcg;

/// The single deterministic RNG stream for one generation run.
pub struct SalesRng {
    inner: Pcg64Mcg,
}

impl SalesRng {
    pub fn seeded(seed: u64) -> Self {
        Self {
            inner: Pcg64Mcg::seed_from_u64(seed),
        }
    }

    /// Roll a float in [0.0, 1.0).
    pub fn next_f64(&mut self) -> f64 {
        let bits = self.inner.next_u64();
        (bits >> 11) as f64 * (1.0 / (1u64 << 53) as f64)
    }

    /// Roll a u64 in [0, n).
    pub fn next_u64_below(&mut self, n: u64) -> u64 {
        assert!(n > 0, "n must be > 0");
        self.inner.next_u64() % n
    }

    /// Roll a u32 in [lo, hi] (both ends inclusive).
    pub fn int_in(&mut self, lo: u32, hi: u32) -> u32 {
        assert!(lo <= hi, "empty range");
        lo + self.next_u64_below((hi - lo + 1) as u64) as u32
    }

    /// Roll a float uniformly in [lo, hi).
    pub fn float_in(&mut self, lo: f64, hi: f64) -> f64 {
        lo + self.next_f64() * (hi - lo)
    }

    /// Weighted choice: returns an index into `weights`, where each
    /// index is selected with probability weights[i] / sum(weights).
    /// The caller guarantees weights are non-negative and not all zero.
    pub fn weighted_choice(&mut self, weights: &[f64]) -> usize {
        let total: f64 = weights.iter().sum();
        assert!(total > 0.0, "weights must sum to a positive value");
        let mut roll = self.next_f64() * total;
        for (i, w) in weights.iter().enumerate() {
            if roll < *w {
                return i;
            }
            roll -= w;
        }
        // Floating-point underflow on the last subtraction lands here.
        weights.len() - 1
    }
}

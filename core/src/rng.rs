//! Injectable random source.
//!
//! RULE: hazard primitives and the `random` activation model never touch a
//! global RNG directly — they take `&mut dyn RandomSource`. This keeps the
//! stochastic core pure with respect to its parameters and the random
//! source (spec law: identical parameters + a seeded source produce
//! identical boolean sequences across runs and platforms).

use rand::{Rng, RngCore, SeedableRng};
use rand_pcg::Pcg64Mcg;

/// A uniform `[0.0, 1.0)` float source plus a uniform inclusive integer
/// range source, the two primitives every hazard function and the
/// `random` activation model need.
pub trait RandomSource: Send {
    /// Uniform sample in `[0.0, 1.0)`.
    fn next_f64(&mut self) -> f64;

    /// Uniform integer in the inclusive range `[low, high]`.
    /// Panics if `low > high`.
    fn next_range_inclusive(&mut self, low: i64, high: i64) -> i64;
}

/// Production randomness: a freshly seeded `rand_pcg::Pcg64Mcg` drawn from
/// the system entropy source. Not reproducible across runs — that is what
/// `SeededRandomSource` is for.
pub struct SystemRandomSource {
    inner: Pcg64Mcg,
}

impl SystemRandomSource {
    pub fn new() -> Self {
        Self {
            inner: Pcg64Mcg::from_entropy(),
        }
    }
}

impl Default for SystemRandomSource {
    fn default() -> Self {
        Self::new()
    }
}

impl RandomSource for SystemRandomSource {
    fn next_f64(&mut self) -> f64 {
        let bits = self.inner.next_u64();
        (bits >> 11) as f64 * (1.0 / (1u64 << 53) as f64)
    }

    fn next_range_inclusive(&mut self, low: i64, high: i64) -> i64 {
        self.inner.gen_range(low..=high)
    }
}

/// A deterministically seeded random source, for tests that must assert
/// exact firing sequences. Two instances built from the same seed draw
/// identical sequences.
pub struct SeededRandomSource {
    inner: Pcg64Mcg,
}

impl SeededRandomSource {
    pub fn new(seed: u64) -> Self {
        Self {
            inner: Pcg64Mcg::seed_from_u64(seed),
        }
    }
}

impl RandomSource for SeededRandomSource {
    fn next_f64(&mut self) -> f64 {
        let bits = self.inner.next_u64();
        (bits >> 11) as f64 * (1.0 / (1u64 << 53) as f64)
    }

    fn next_range_inclusive(&mut self, low: i64, high: i64) -> i64 {
        self.inner.gen_range(low..=high)
    }
}


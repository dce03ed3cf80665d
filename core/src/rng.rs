//! Random number generation for spins.
//!
//! RULE: Nothing in the wheel calls a platform RNG directly.
//! Every draw flows through a WheelRng, which is either seeded
//! (replayable, used by tests and the batch runner) or seeded once
//! from OS entropy for interactive use.

use rand::{RngCore, SeedableRng};
use rand_pcg::Pcg64Mcg;

pub struct WheelRng {
    seed:  Option<u64>,
    inner: Pcg64Mcg,
}

impl WheelRng {
    /// Deterministic stream. Same seed, same spins.
    pub fn new(seed: u64) -> Self {
        Self {
            seed:  Some(seed),
            inner: Pcg64Mcg::seed_from_u64(seed),
        }
    }

    /// Non-reproducible stream seeded from the operating system.
    pub fn from_entropy() -> Self {
        Self {
            seed:  None,
            inner: Pcg64Mcg::from_entropy(),
        }
    }

    /// The seed this stream was built from, if it is replayable.
    pub fn seed(&self) -> Option<u64> {
        self.seed
    }

    /// Roll a float in [0.0, 1.0).
    pub fn next_f64(&mut self) -> f64 {
        let bits = self.inner.next_u64();
        (bits >> 11) as f64 * (1.0 / (1u64 << 53) as f64)
    }
}

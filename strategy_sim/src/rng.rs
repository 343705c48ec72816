//! Randomness seam for the simulation.
//!
//! The lap loop and the finishing-position draw never reach for a global
//! generator; callers hand one in. Any `rand` generator works, so production
//! passes `rand::thread_rng()` and tests pass a seeded `ChaCha8Rng` or their
//! own scripted source.

use rand::{Rng, RngCore};

pub trait RandomSource {
    /// Uniform draw from the closed interval `[low, high]`.
    fn uniform(&mut self, low: f64, high: f64) -> f64;

    /// Uniform integer from the closed interval `[low, high]`.
    fn pick(&mut self, low: u32, high: u32) -> u32;
}

impl<R: RngCore> RandomSource for R {
    fn uniform(&mut self, low: f64, high: f64) -> f64 {
        self.gen_range(low..=high)
    }

    fn pick(&mut self, low: u32, high: u32) -> u32 {
        self.gen_range(low..=high)
    }
}

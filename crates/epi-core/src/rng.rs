//! Deterministic simulation RNG.
//!
//! # Determinism strategy
//!
//! One generator per run, owned by the engine and passed down by `&mut`.
//! Every consumer draws from it in a fixed traversal order (population
//! creation, then per day: infector-major / susceptible-minor pairwise
//! trials, Bernoulli rules in rank order, movement in ascending agent index),
//! so a seeded run is reproducible end-to-end.  Nothing in the workspace
//! touches a thread-local or global generator.

use std::f64::consts::TAU;

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use rand_distr::Distribution;

/// Simulation-level RNG.
///
/// Used only in single-threaded contexts.
pub struct SimRng(SmallRng);

impl SimRng {
    pub fn new(seed: u64) -> Self {
        SimRng(SmallRng::seed_from_u64(seed))
    }

    #[inline]
    pub fn random<T>(&mut self) -> T
    where
        rand::distributions::Standard: rand::distributions::Distribution<T>,
    {
        self.0.r#gen()
    }

    /// One Bernoulli trial with success probability `p`.
    ///
    /// `p <= 0` fails without consuming randomness, so pairs the kernel
    /// rules out never shift the stream.  Otherwise a single uniform draw
    /// `u ∈ [0, 1)` succeeds iff `u < p`.
    #[inline]
    pub fn trial(&mut self, p: f64) -> bool {
        if p <= 0.0 {
            return false;
        }
        self.0.r#gen::<f64>() < p
    }

    /// A heading drawn uniformly from `[0, 2π)`.
    #[inline]
    pub fn heading(&mut self) -> f64 {
        self.0.gen_range(0.0..TAU)
    }

    /// Draw one value from any `f64` distribution (e.g. a validated `Normal`).
    #[inline]
    pub fn sample<D: Distribution<f64>>(&mut self, dist: &D) -> f64 {
        dist.sample(&mut self.0)
    }
}

//! Population construction: draws every agent's static attributes once.
//!
//! # Usage
//!
//! ```rust
//! use epi_agent::{PopulationBuilder, PopulationParams, RadiusDistribution};
//! use epi_core::SimRng;
//!
//! let params = PopulationParams {
//!     high_transmission_prob: 0.1,
//!     kernel_radius:          RadiusDistribution::normal(2.0, 0.5),
//!     move_radius:            RadiusDistribution::fixed(0.0),
//! };
//! let mut rng = SimRng::new(42);
//! let store = PopulationBuilder::new(1_000, 50.0)
//!     .params(params)
//!     .build(&mut rng)
//!     .unwrap();
//!
//! assert_eq!(store.count, 1_000);
//! ```

use rand_distr::Normal;

use epi_core::{validate, EpiError, EpiResult, Position, SimRng};

use crate::AgentStore;

// ── RadiusDistribution ────────────────────────────────────────────────────────

/// Normal distribution a per-agent radius is drawn from at creation.
///
/// `std_dev = 0` gives every agent exactly `mean`.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RadiusDistribution {
    pub mean:    f64,
    pub std_dev: f64,
}

impl RadiusDistribution {
    pub const fn fixed(radius: f64) -> Self {
        Self { mean: radius, std_dev: 0.0 }
    }

    pub const fn normal(mean: f64, std_dev: f64) -> Self {
        Self { mean, std_dev }
    }

    /// Validate and build the sampling distribution.
    pub fn to_normal(self, mean_name: &'static str, std_name: &'static str) -> EpiResult<Normal<f64>> {
        validate::non_negative(mean_name, self.mean)?;
        validate::non_negative(std_name, self.std_dev)?;
        Normal::new(self.mean, self.std_dev).map_err(|e| EpiError::Config(format!("{std_name}: {e}")))
    }
}

impl Default for RadiusDistribution {
    fn default() -> Self {
        Self::fixed(0.0)
    }
}

// ── PopulationParams ──────────────────────────────────────────────────────────

/// Distributional parameters for the static agent attributes.
#[derive(Copy, Clone, Debug, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PopulationParams {
    /// Probability that an agent is flagged high-transmission.
    pub high_transmission_prob: f64,
    /// Personal infection radius distribution.
    pub kernel_radius: RadiusDistribution,
    /// Personal movement radius distribution.
    pub move_radius: RadiusDistribution,
}

impl PopulationParams {
    pub fn validate(&self) -> EpiResult<()> {
        validate::probability("high_transmission_prob", self.high_transmission_prob)?;
        self.kernel_radius.to_normal("kernel_radius.mean", "kernel_radius.std_dev")?;
        self.move_radius.to_normal("move_radius.mean", "move_radius.std_dev")?;
        Ok(())
    }
}

// ── PopulationBuilder ─────────────────────────────────────────────────────────

/// Fluent builder for [`AgentStore`].
///
/// All arrays are pre-allocated and filled in one pass.  Draw order is
/// fixed: every x coordinate, every y coordinate, then per agent the
/// high-transmission trial, kernel radius and movement radius.
pub struct PopulationBuilder {
    count:      usize,
    plane_size: f64,
    params:     PopulationParams,
}

impl PopulationBuilder {
    /// Create a builder for `count` agents placed uniformly on a square plane
    /// of side `plane_size`.
    pub fn new(count: usize, plane_size: f64) -> Self {
        Self {
            count,
            plane_size,
            params: PopulationParams::default(),
        }
    }

    pub fn params(mut self, params: PopulationParams) -> Self {
        self.params = params;
        self
    }

    /// Validate parameters, then draw the population from `rng`.
    pub fn build(self, rng: &mut SimRng) -> EpiResult<AgentStore> {
        validate::non_negative("plane_size", self.plane_size)?;
        self.params.validate()?;
        let kernel_radius = self.params.kernel_radius.to_normal("kernel_radius.mean", "kernel_radius.std_dev")?;
        let move_radius = self.params.move_radius.to_normal("move_radius.mean", "move_radius.std_dev")?;

        let xs: Vec<f64> = (0..self.count).map(|_| self.uniform_coord(rng)).collect();
        let ys: Vec<f64> = (0..self.count).map(|_| self.uniform_coord(rng)).collect();

        let mut store = AgentStore::with_capacity(self.count);
        for (x, y) in xs.into_iter().zip(ys) {
            let ss = rng.trial(self.params.high_transmission_prob);
            let r0 = rng.sample(&kernel_radius);
            let rm = rng.sample(&move_radius);
            store.push(Position::new(x, y), ss, r0, rm);
        }
        Ok(store)
    }

    fn uniform_coord(&self, rng: &mut SimRng) -> f64 {
        rng.random::<f64>() * self.plane_size
    }
}

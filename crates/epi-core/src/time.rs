//! Simulation time model.
//!
//! # Design
//!
//! Time is a discrete day counter.  Day 0 is the initial configuration and is
//! never re-evaluated; days `1..=horizon` each run the full transition
//! pipeline once.  There is no wall-clock mapping: one tick is one day.

use std::fmt;

// ── Day ───────────────────────────────────────────────────────────────────────

/// An absolute simulation day.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Day(pub u32);

impl Day {
    pub const ZERO: Day = Day(0);

    /// The following day.
    #[inline]
    pub fn next(self) -> Day {
        Day(self.0 + 1)
    }

    #[inline(always)]
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for Day {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "day {}", self.0)
    }
}

// ── SimConfig ─────────────────────────────────────────────────────────────────

/// Top-level run configuration.
///
/// Typically loaded from a JSON scenario by the application crate and passed
/// to the simulation builder.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SimConfig {
    /// Horizon: days `1..=days` are simulated after the day-0 configuration.
    pub days: u32,

    /// Master RNG seed.  The same seed and configuration always produce
    /// identical series and ledgers.
    pub seed: u64,

    /// Side length of the square plane agents are confined to.
    pub plane_size: f64,
}

impl SimConfig {
    /// The last simulated day (inclusive).
    #[inline]
    pub fn horizon(&self) -> Day {
        Day(self.days)
    }

    /// Reject a non-finite or negative plane size.
    pub fn validate(&self) -> crate::EpiResult<()> {
        crate::validate::non_negative("plane_size", self.plane_size)
    }
}

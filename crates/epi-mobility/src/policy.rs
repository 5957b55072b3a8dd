//! Movement policy trait and the three built-in policies.
//!
//! # Pluggability
//!
//! [`MobilityEngine`][crate::MobilityEngine] is generic over
//! [`MovementPolicy`], so a variant picks its movement model at compile time
//! with no dynamic dispatch in the movement pass.  Every policy returns a
//! position clamped per axis to `[0, plane_size]`.

use std::f64::consts::{FRAC_PI_2, TAU};

use rand_distr::{Normal, StandardNormal};

use epi_core::{validate, EpiError, EpiResult, Position, SimRng};

use crate::MotionState;

/// Default number of days per orbit.
pub const DEFAULT_ORBIT_DIVISOR: f64 = 5.0;

/// Default standard deviation of the daily angle increment.
pub const DEFAULT_ORBIT_STD_DEV: f64 = FRAC_PI_2;

// ── MovementPolicy trait ──────────────────────────────────────────────────────

pub trait MovementPolicy: Send + Sync {
    /// `true` if positions never change.  The engine then skips the movement
    /// pass and records a single day-0 position snapshot.
    fn is_static(&self) -> bool {
        false
    }

    /// Initial motion state for an agent created at `position`.
    fn init_motion(&self, position: Position, move_radius: f64, rng: &mut SimRng) -> MotionState;

    /// One day of movement.  Returns the new, clamped position.
    fn step(
        &self,
        position:    Position,
        state:       &mut MotionState,
        move_radius: f64,
        plane_size:  f64,
        rng:         &mut SimRng,
    ) -> Position;
}

// ── Static ────────────────────────────────────────────────────────────────────

/// Agents never move.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct Static;

impl MovementPolicy for Static {
    fn is_static(&self) -> bool {
        true
    }

    fn init_motion(&self, _position: Position, _move_radius: f64, _rng: &mut SimRng) -> MotionState {
        MotionState::default()
    }

    fn step(&self, position: Position, _: &mut MotionState, _: f64, _: f64, _: &mut SimRng) -> Position {
        position
    }
}

// ── RandomWalk ────────────────────────────────────────────────────────────────

/// Each day: step length from `Normal(mean, std_dev)`, heading uniform on
/// `[0, 2π)`.
#[derive(Copy, Clone, Debug)]
pub struct RandomWalk {
    mean:    f64,
    std_dev: f64,
    step:    Normal<f64>,
}

impl RandomWalk {
    pub fn new(mean: f64, std_dev: f64) -> EpiResult<Self> {
        validate::non_negative("move_mean", mean)?;
        validate::non_negative("move_std_dev", std_dev)?;
        let step = Normal::new(mean, std_dev).map_err(|e| EpiError::Config(format!("move_std_dev: {e}")))?;
        Ok(Self { mean, std_dev, step })
    }

    pub fn mean(&self) -> f64 {
        self.mean
    }

    pub fn std_dev(&self) -> f64 {
        self.std_dev
    }
}

impl MovementPolicy for RandomWalk {
    fn init_motion(&self, _position: Position, _move_radius: f64, _rng: &mut SimRng) -> MotionState {
        MotionState::default()
    }

    fn step(
        &self,
        position:   Position,
        state:      &mut MotionState,
        _:          f64,
        plane_size: f64,
        rng:        &mut SimRng,
    ) -> Position {
        let length = rng.sample(&self.step);
        state.heading = rng.heading();
        position.offset_polar(length, state.heading).clamp_to_plane(plane_size)
    }
}

// ── PeriodicOrbit ─────────────────────────────────────────────────────────────

/// Agents circle a fixed center at their personal `move_radius`.
///
/// The angle advances by a `Normal(2π/k, σ)` draw each day and is never
/// reset, so orbits are quasi-periodic.  The initial angle is one draw from
/// the same distribution.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct PeriodicOrbit {
    divisor: f64,
    std_dev: f64,
}

impl PeriodicOrbit {
    /// `divisor` is `k`, the nominal number of days per revolution.
    pub fn new(divisor: f64, std_dev: f64) -> EpiResult<Self> {
        validate::non_negative("orbit_divisor", divisor)?;
        validate::non_negative("orbit_std_dev", std_dev)?;
        if divisor == 0.0 {
            return Err(EpiError::Config("orbit_divisor must be greater than 0".into()));
        }
        Ok(Self { divisor, std_dev })
    }

    pub fn divisor(&self) -> f64 {
        self.divisor
    }

    pub fn std_dev(&self) -> f64 {
        self.std_dev
    }

    /// One draw from `Normal(2π/k, σ)`.
    #[inline]
    fn angle_increment(&self, rng: &mut SimRng) -> f64 {
        let z: f64 = rng.sample(&StandardNormal);
        TAU / self.divisor + self.std_dev * z
    }
}

impl Default for PeriodicOrbit {
    fn default() -> Self {
        Self { divisor: DEFAULT_ORBIT_DIVISOR, std_dev: DEFAULT_ORBIT_STD_DEV }
    }
}

impl MovementPolicy for PeriodicOrbit {
    fn init_motion(&self, position: Position, move_radius: f64, rng: &mut SimRng) -> MotionState {
        let theta0 = self.angle_increment(rng);
        MotionState::orbit_through(position, move_radius, theta0)
    }

    fn step(
        &self,
        _:           Position,
        state:       &mut MotionState,
        move_radius: f64,
        plane_size:  f64,
        rng:         &mut SimRng,
    ) -> Position {
        state.heading += self.angle_increment(rng);
        state.orbit_point(move_radius).clamp_to_plane(plane_size)
    }
}

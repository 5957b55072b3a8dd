//! `epi-mobility`: movement policies and the daily movement pass.
//!
//! # Crate layout
//!
//! | Module     | Contents                                                       |
//! |------------|----------------------------------------------------------------|
//! | [`state`]  | `MotionState`: per-agent orbit angle and center               |
//! | [`policy`] | `MovementPolicy` trait, `Static`, `RandomWalk`, `PeriodicOrbit` |
//! | [`engine`] | `MobilityEngine<P>`: applies a policy to every agent          |
//!
//! # Movement model
//!
//! Positions live in the agent store, once per agent.  The engine moves
//! agents in ascending index order, drawing from the run's single
//! [`SimRng`][epi_core::SimRng], and clamps each axis to
//! `[0, plane_size]`.  Nothing wraps or reflects.

pub mod engine;
pub mod policy;
pub mod state;

#[cfg(test)]
mod tests;

pub use engine::MobilityEngine;
pub use policy::{
    MovementPolicy, PeriodicOrbit, RandomWalk, Static, DEFAULT_ORBIT_DIVISOR, DEFAULT_ORBIT_STD_DEV,
};
pub use state::MotionState;

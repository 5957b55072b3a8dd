//! `epi-core`: foundational types for the `epi_dt` epidemic engine.
//!
//! This crate is a dependency of every other `epi-*` crate.  It intentionally
//! has no `epi-*` dependencies and minimal external ones (`rand`,
//! `rand_distr` and `thiserror`, plus optional `serde`).
//!
//! # What lives here
//!
//! | Module          | Contents                                              |
//! |-----------------|-------------------------------------------------------|
//! | [`ids`]         | `AgentId`, `CompartmentId`                            |
//! | [`geo`]         | `Position`, distance, per-axis plane clamping         |
//! | [`time`]        | `Day`, `SimConfig`                                    |
//! | [`rng`]         | `SimRng` (the run's single generator)                 |
//! | [`validate`]    | finite / non-negative / probability checks            |
//! | [`error`]       | `EpiError`, `EpiResult`                               |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                     |
//! |---------|------------------------------------------------------------|
//! | `serde` | Adds `Serialize`/`Deserialize` to all public types.        |
//!           | Required to load JSON scenarios.                           |

pub mod error;
pub mod geo;
pub mod ids;
pub mod rng;
pub mod time;
pub mod validate;


// ── Re-exports ────────────────────────────────────────────────────────────────

pub use error::{EpiError, EpiResult};
pub use geo::Position;
pub use ids::{AgentId, CompartmentId};
pub use rng::SimRng;
pub use time::{Day, SimConfig};

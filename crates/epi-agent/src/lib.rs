//! `epi-agent`: Structure-of-Arrays agent records for the `epi_dt` engine.
//!
//! # Crate layout
//!
//! | Module          | Contents                                                  |
//! |-----------------|-----------------------------------------------------------|
//! | [`store`]       | `AgentStore` (SoA arrays), `Agent` (by-value record view) |
//! | [`builder`]     | `PopulationBuilder`, `PopulationParams`, `RadiusDistribution` |
//!
//! # Feature flags
//!
//! | Flag       | Effect                                                     |
//! |------------|------------------------------------------------------------|
//! | `serde`    | Derives `Serialize`/`Deserialize` on all public types.     |

pub mod builder;
pub mod store;

#[cfg(test)]
mod tests;

pub use builder::{PopulationBuilder, PopulationParams, RadiusDistribution};
pub use store::{Agent, AgentStore};

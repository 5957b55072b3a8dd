//! Framework error type.
//!
//! The variants follow the engine's failure taxonomy: type errors
//! (`NotFinite`), domain errors (`Negative`), probability-range errors
//! (`Probability`) and lookup errors (`AgentNotFound`, `DayOutOfRange`).
//! The first three are raised while validating a configuration, before
//! day 0; lookups fail at query time and never touch the log they read.
//!
//! Sub-crates may define their own error enums and convert `EpiError` into
//! them via `From` (see `epi-sim::SimError`).

use thiserror::Error;

use crate::{AgentId, Day};

/// The top-level error type for `epi-core` and a common base for sub-crates.
#[derive(Debug, Error, PartialEq)]
pub enum EpiError {
    #[error("{name} = {value} is not a finite number")]
    NotFinite { name: &'static str, value: f64 },

    #[error("{name} = {value} is negative when no negative values are allowed")]
    Negative { name: &'static str, value: f64 },

    #[error("{name} = {value} {}", probability_bound(.value))]
    Probability { name: &'static str, value: f64 },

    #[error("{agent} not found; agents range from 0 to {population} (exclusive)")]
    AgentNotFound { agent: AgentId, population: usize },

    #[error("{day} is out of range; days only go from 0 to {horizon}")]
    DayOutOfRange { day: Day, horizon: Day },

    #[error("configuration error: {0}")]
    Config(String),
}

fn probability_bound(value: &f64) -> &'static str {
    if *value > 1.0 {
        "> 1, which is too big for a probability"
    } else {
        "< 0, which is too small for a probability"
    }
}

/// Shorthand result type for all `epi-*` crates.
pub type EpiResult<T> = Result<T, EpiError>;

//! `epi-sim`: the daily transition engine of the epi_dt workspace.
//!
//! # Five-step day
//!
//! ```text
//! for day in 1..=config.days:
//!   ① Pairwise  : each infector draws against remaining susceptibles in
//!                  its kernel reach; first success per susceptible wins.
//!   ② Bernoulli : one trial per remaining source member, rule by rule in
//!                  rank order; earlier winners are invisible to later rules.
//!   ③ Commit    : set destinations, append state changes.
//!   ④ Move      : MovementPolicy::step per agent, append positions.
//!   ⑤ Aggregate : size(d) = size(d−1) ± transfer counts.
//! ```
//!
//! | Module       | Contents                                             |
//! |--------------|------------------------------------------------------|
//! | [`sim`]      | `Sim<K, P>` and the daily loop                       |
//! | [`builder`]  | `SimBuilder`: validation and day-0 setup             |
//! | [`series`]   | `CompartmentSeries`: per-day sizes                   |
//! | [`observer`] | `SimObserver` hooks, `NoopObserver`                  |
//! | [`error`]    | `SimError`, `SimResult<T>`                           |
//!
//! # Cargo features
//!
//! | Feature    | Effect                                                       |
//! |------------|--------------------------------------------------------------|
//! | `parallel` | Evaluates each infector's kernel row on Rayon's thread pool. |
//! | `fx-hash`  | FxHash for the compartment label index.                      |
//! | `serde`    | Serde derives on the configuration types.                    |
//!
//! # Quick-start
//!
//! ```rust,ignore
//! use epi_core::SimConfig;
//! use epi_kernel::HubKernel;
//! use epi_mobility::Static;
//! use epi_model::{Preset, Rates};
//! use epi_sim::{NoopObserver, SimBuilder};
//!
//! let config = SimConfig { days: 100, seed: 42, plane_size: 100.0 };
//! let variant = Preset::Sir.variant(&Rates { gamma: 0.1, ..Rates::default() })?;
//! let mut sim = SimBuilder::new(config, variant, HubKernel::with_radius(2.0)?, Static)
//!     .initial_sizes(&[("S", 999), ("I", 1)])
//!     .build()?;
//! let series = sim.run(&mut NoopObserver)?;
//! ```

pub mod builder;
pub mod error;
pub mod observer;
pub mod series;
pub mod sim;


pub use builder::SimBuilder;
pub use error::{SimError, SimResult};
pub use observer::{NoopObserver, SimObserver};
pub use series::CompartmentSeries;
pub use sim::Sim;

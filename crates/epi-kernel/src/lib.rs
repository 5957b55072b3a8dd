//! `epi-kernel`: infection kernels and contact lookup.
//!
//! # Crate layout
//!
//! | Module      | Contents                                                     |
//! |-------------|--------------------------------------------------------------|
//! | [`kernel`]  | `SpatialKernel` trait, `KernelParams`, `HubKernel`, `StrongInfectiousKernel`, `FlatRadiusKernel` |
//! | [`contact`] | `ContactIndex` (R-tree over susceptible positions)          |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                       |
//! |---------|--------------------------------------------------------------|
//! | `serde` | Derives `Serialize`/`Deserialize` on `KernelParams`.         |

pub mod contact;
pub mod kernel;

#[cfg(test)]
mod tests;

pub use contact::ContactIndex;
pub use kernel::{
    falloff, FlatRadiusKernel, HubKernel, KernelParams, SpatialKernel, StrongInfectiousKernel,
    DEFAULT_ALPHA, DEFAULT_HUB_CONSTANT,
};

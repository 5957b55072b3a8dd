//! `epi-model`: compartments, transition rules and model variants.
//!
//! # Crate layout
//!
//! | Module        | Contents                                                   |
//! |---------------|------------------------------------------------------------|
//! | [`registry`]  | `CompartmentRegistry`: one membership vector per compartment |
//! | [`rule`]      | `TransitionRule`, `RuleKind`, `evaluation_order`           |
//! | [`variant`]   | `ModelVariant`, `ModelVariantBuilder`                      |
//! | [`presets`]   | `Preset`, `Rates`, SIS … SEIRSDV and ICU-V as data         |
//!
//! # Feature flags
//!
//! | Flag      | Effect                                                    |
//! |-----------|-----------------------------------------------------------|
//! | `serde`   | Derives `Serialize`/`Deserialize` on rules, variants, presets. |
//! | `fx-hash` | FxHash for the registry's label index.                    |

pub mod presets;
pub mod registry;
pub mod rule;
pub mod variant;


pub use presets::{Preset, Rates};
pub use registry::CompartmentRegistry;
pub use rule::{evaluation_order, RuleKind, TransitionRule};
pub use variant::{ModelVariant, ModelVariantBuilder};

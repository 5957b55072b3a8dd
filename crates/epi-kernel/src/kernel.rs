//! Infection kernel trait and the three built-in policies.
//!
//! # Pluggability
//!
//! `epi-sim` evaluates pairs via the [`SpatialKernel`] trait, so a variant
//! can swap the distance profile without touching the engine.  All three
//! built-ins share one falloff:
//!
//! ```text
//! p(r) = 0                          if r >= r0
//!      = w0 · (1 − r / r0)^alpha    otherwise
//! ```
//!
//! The gate runs before the power, so `r0 = 0` never divides by zero and
//! `alpha = 0` still reaches exactly 0 at the radius.

use epi_agent::Agent;
use epi_core::{validate, EpiResult};

/// Default falloff exponent.
pub const DEFAULT_ALPHA: f64 = 2.0;

/// Default radius multiplier for high-transmission agents under [`HubKernel`].
pub const DEFAULT_HUB_CONSTANT: f64 = 2.449_489_742_783_178; // sqrt(6)

// ── SpatialKernel trait ───────────────────────────────────────────────────────

/// Pure map from an (infector, susceptible) pair to a transmission
/// probability in `[0, 1]`.
///
/// # Thread safety
///
/// Implementations must be `Send + Sync` so the engine can evaluate one
/// infector's candidate row across Rayon workers.
pub trait SpatialKernel: Send + Sync {
    fn probability(&self, infector: &Agent, susceptible: &Agent) -> f64;

    /// Distance beyond which [`probability`](Self::probability) is always 0
    /// for this infector.  The contact index only visits susceptibles
    /// inside this radius.
    fn reach(&self, infector: &Agent) -> f64;
}

impl<T: SpatialKernel + ?Sized> SpatialKernel for Box<T> {
    fn probability(&self, infector: &Agent, susceptible: &Agent) -> f64 {
        (**self).probability(infector, susceptible)
    }

    fn reach(&self, infector: &Agent) -> f64 {
        (**self).reach(infector)
    }
}

/// Power-law falloff with the distance gate applied first.
#[inline]
pub fn falloff(w0: f64, alpha: f64, r: f64, r0: f64) -> f64 {
    if !(r < r0) {
        return 0.0;
    }
    w0 * (1.0 - r / r0).powf(alpha)
}

// ── KernelParams ──────────────────────────────────────────────────────────────

/// Shared shape parameters.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct KernelParams {
    /// Probability at zero distance.
    pub w0: f64,
    /// Falloff exponent.
    pub alpha: f64,
    /// Radius for ordinary agents.  Ignored by [`FlatRadiusKernel`].
    pub base_radius: f64,
}

impl KernelParams {
    pub fn new(w0: f64, alpha: f64, base_radius: f64) -> Self {
        Self { w0, alpha, base_radius }
    }

    pub fn validate(&self) -> EpiResult<()> {
        validate::probability("w0", self.w0)?;
        validate::non_negative("alpha", self.alpha)?;
        validate::non_negative("base_radius", self.base_radius)?;
        Ok(())
    }
}

// ── HubKernel ─────────────────────────────────────────────────────────────────

/// High-transmission agents reach further: their radius is
/// `base_radius · hub_constant`.
#[derive(Clone, Debug, PartialEq)]
pub struct HubKernel {
    params:       KernelParams,
    hub_constant: f64,
}

impl HubKernel {
    pub fn new(params: KernelParams, hub_constant: f64) -> EpiResult<Self> {
        params.validate()?;
        validate::non_negative("hub_constant", hub_constant)?;
        Ok(Self { params, hub_constant })
    }

    /// `w0 = 1`, `alpha = 2`, `hub_constant = sqrt(6)`.
    pub fn with_radius(base_radius: f64) -> EpiResult<Self> {
        Self::new(KernelParams::new(1.0, DEFAULT_ALPHA, base_radius), DEFAULT_HUB_CONSTANT)
    }

    pub fn params(&self) -> &KernelParams {
        &self.params
    }
}

impl SpatialKernel for HubKernel {
    fn probability(&self, infector: &Agent, susceptible: &Agent) -> f64 {
        let r = infector.position.distance(susceptible.position);
        falloff(self.params.w0, self.params.alpha, r, self.reach(infector))
    }

    #[inline]
    fn reach(&self, infector: &Agent) -> f64 {
        if infector.high_transmission {
            self.params.base_radius * self.hub_constant
        } else {
            self.params.base_radius
        }
    }
}

// ── StrongInfectiousKernel ────────────────────────────────────────────────────

/// High-transmission agents infect with a flat `w0` anywhere inside the
/// base radius; everyone else falls off as usual.
#[derive(Clone, Debug, PartialEq)]
pub struct StrongInfectiousKernel {
    params: KernelParams,
}

impl StrongInfectiousKernel {
    pub fn new(params: KernelParams) -> EpiResult<Self> {
        params.validate()?;
        Ok(Self { params })
    }

    /// `w0 = 0.5`, `alpha = 2`.
    pub fn with_radius(base_radius: f64) -> EpiResult<Self> {
        Self::new(KernelParams::new(0.5, DEFAULT_ALPHA, base_radius))
    }

    pub fn params(&self) -> &KernelParams {
        &self.params
    }
}

impl SpatialKernel for StrongInfectiousKernel {
    fn probability(&self, infector: &Agent, susceptible: &Agent) -> f64 {
        let r = infector.position.distance(susceptible.position);
        let r0 = self.params.base_radius;
        if !(r < r0) {
            0.0
        } else if infector.high_transmission {
            self.params.w0
        } else {
            falloff(self.params.w0, self.params.alpha, r, r0)
        }
    }

    #[inline]
    fn reach(&self, _infector: &Agent) -> f64 {
        self.params.base_radius
    }
}

// ── FlatRadiusKernel ──────────────────────────────────────────────────────────

/// Falloff over the infector's personal `kernel_radius`; the
/// high-transmission flag is ignored.  Used with the movement models.
#[derive(Clone, Debug, PartialEq)]
pub struct FlatRadiusKernel {
    w0:    f64,
    alpha: f64,
}

impl FlatRadiusKernel {
    pub fn new(w0: f64, alpha: f64) -> EpiResult<Self> {
        validate::probability("w0", w0)?;
        validate::non_negative("alpha", alpha)?;
        Ok(Self { w0, alpha })
    }
}

impl SpatialKernel for FlatRadiusKernel {
    fn probability(&self, infector: &Agent, susceptible: &Agent) -> f64 {
        let r = infector.position.distance(susceptible.position);
        falloff(self.w0, self.alpha, r, infector.kernel_radius)
    }

    #[inline]
    fn reach(&self, infector: &Agent) -> f64 {
        infector.kernel_radius
    }
}

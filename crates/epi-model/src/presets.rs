//! The standard compartment combinations as data.
//!
//! Every preset takes its rates from one [`Rates`] value; rates a preset does
//! not use are ignored.  Rule ranks follow declaration order, which puts the
//! conditional pairs in the order their probabilities are defined:
//! `I → R` before `I → D`, `E → L` before `E → I`, `ICU → R` before
//! `ICU → D`.

use std::fmt;
use std::str::FromStr;

use epi_core::{EpiError, EpiResult};

use crate::ModelVariant;

/// Per-day transition probabilities.
#[derive(Copy, Clone, Debug, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct Rates {
    /// E → I (or E → L / E → I split in ICU-V).
    pub rho:   f64,
    /// I → R.
    pub gamma: f64,
    /// I → D.
    pub mu:    f64,
    /// R → S.
    pub kappa: f64,
    /// S → V.
    pub eta:   f64,
    /// ICU-V: fraction of E → · transfers that go to L.
    pub ioda:  f64,
    /// ICU-V: L → ICU.
    pub phi:   f64,
    /// ICU-V: ICU → R.
    pub chi:   f64,
    /// ICU-V: ICU → D.
    pub omega: f64,
    /// S → V is inert while `day <= vaccination_delay`.
    pub vaccination_delay: Option<u32>,
}

/// Named compartment combinations.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "UPPERCASE"))]
pub enum Preset {
    Sis,
    Sir,
    Sirs,
    Sird,
    Sirv,
    Sirsd,
    Sirsv,
    Sirvd,
    Seir,
    Seirs,
    Seird,
    Seirv,
    Seirsd,
    Seirsv,
    Seirvd,
    Sirsdv,
    Seirsdv,
    Icuv,
}

impl Preset {
    pub const ALL: [Preset; 18] = [
        Preset::Sis,
        Preset::Sir,
        Preset::Sirs,
        Preset::Sird,
        Preset::Sirv,
        Preset::Sirsd,
        Preset::Sirsv,
        Preset::Sirvd,
        Preset::Seir,
        Preset::Seirs,
        Preset::Seird,
        Preset::Seirv,
        Preset::Seirsd,
        Preset::Seirsv,
        Preset::Seirvd,
        Preset::Sirsdv,
        Preset::Seirsdv,
        Preset::Icuv,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Preset::Sis => "SIS",
            Preset::Sir => "SIR",
            Preset::Sirs => "SIRS",
            Preset::Sird => "SIRD",
            Preset::Sirv => "SIRV",
            Preset::Sirsd => "SIRSD",
            Preset::Sirsv => "SIRSV",
            Preset::Sirvd => "SIRVD",
            Preset::Seir => "SEIR",
            Preset::Seirs => "SEIRS",
            Preset::Seird => "SEIRD",
            Preset::Seirv => "SEIRV",
            Preset::Seirsd => "SEIRSD",
            Preset::Seirsv => "SEIRSV",
            Preset::Seirvd => "SEIRVD",
            Preset::Sirsdv => "SIRSDV",
            Preset::Seirsdv => "SEIRSDV",
            Preset::Icuv => "ICUV",
        }
    }

    /// Build the variant with `rates`.
    pub fn variant(self, rates: &Rates) -> EpiResult<ModelVariant> {
        match self {
            Preset::Sis => sis(rates),
            Preset::Sir => sir(rates),
            Preset::Sirs => sirs(rates),
            Preset::Sird => sird(rates),
            Preset::Sirv => sirv(rates),
            Preset::Sirsd => sirsd(rates),
            Preset::Sirsv => sirsv(rates),
            Preset::Sirvd => sirvd(rates),
            Preset::Seir => seir(rates),
            Preset::Seirs => seirs(rates),
            Preset::Seird => seird(rates),
            Preset::Seirv => seirv(rates),
            Preset::Seirsd => seirsd(rates),
            Preset::Seirsv => seirsv(rates),
            Preset::Seirvd => seirvd(rates),
            Preset::Sirsdv => sirsdv(rates),
            Preset::Seirsdv => seirsdv(rates),
            Preset::Icuv => icuv(rates),
        }
    }
}

impl fmt::Display for Preset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Preset {
    type Err = EpiError;

    fn from_str(s: &str) -> EpiResult<Self> {
        Preset::ALL
            .into_iter()
            .find(|p| p.name().eq_ignore_ascii_case(s))
            .ok_or_else(|| EpiError::Config(format!("unknown model variant {s:?}")))
    }
}

// ── Presets ───────────────────────────────────────────────────────────────────

pub fn sis(r: &Rates) -> EpiResult<ModelVariant> {
    ModelVariant::builder("SIS")
        .compartments(["S", "I"])
        .pairwise("S", "I", &["I"], 0)
        .bernoulli("I", "S", r.gamma, 1)
        .build()
}

pub fn sir(r: &Rates) -> EpiResult<ModelVariant> {
    ModelVariant::builder("SIR")
        .compartments(["S", "I", "R"])
        .pairwise("S", "I", &["I"], 0)
        .bernoulli("I", "R", r.gamma, 1)
        .build()
}

pub fn sirs(r: &Rates) -> EpiResult<ModelVariant> {
    ModelVariant::builder("SIRS")
        .compartments(["S", "I", "R"])
        .pairwise("S", "I", &["I"], 0)
        .bernoulli("I", "R", r.gamma, 1)
        .bernoulli("R", "S", r.kappa, 2)
        .build()
}

pub fn sird(r: &Rates) -> EpiResult<ModelVariant> {
    ModelVariant::builder("SIRD")
        .compartments(["S", "I", "R", "D"])
        .pairwise("S", "I", &["I"], 0)
        .bernoulli("I", "R", r.gamma, 1)
        .bernoulli("I", "D", r.mu, 2)
        .build()
}

pub fn sirv(r: &Rates) -> EpiResult<ModelVariant> {
    ModelVariant::builder("SIRV")
        .compartments(["S", "I", "R", "V"])
        .pairwise("S", "I", &["I"], 0)
        .bernoulli("I", "R", r.gamma, 1)
        .bernoulli_delayed("S", "V", r.eta, 2, r.vaccination_delay)
        .build()
}

pub fn sirsd(r: &Rates) -> EpiResult<ModelVariant> {
    ModelVariant::builder("SIRSD")
        .compartments(["S", "I", "R", "D"])
        .pairwise("S", "I", &["I"], 0)
        .bernoulli("I", "R", r.gamma, 1)
        .bernoulli("I", "D", r.mu, 2)
        .bernoulli("R", "S", r.kappa, 3)
        .build()
}

pub fn sirsv(r: &Rates) -> EpiResult<ModelVariant> {
    ModelVariant::builder("SIRSV")
        .compartments(["S", "I", "R", "V"])
        .pairwise("S", "I", &["I"], 0)
        .bernoulli("I", "R", r.gamma, 1)
        .bernoulli_delayed("S", "V", r.eta, 2, r.vaccination_delay)
        .bernoulli("R", "S", r.kappa, 3)
        .build()
}

pub fn sirvd(r: &Rates) -> EpiResult<ModelVariant> {
    ModelVariant::builder("SIRVD")
        .compartments(["S", "I", "R", "V", "D"])
        .pairwise("S", "I", &["I"], 0)
        .bernoulli("I", "R", r.gamma, 1)
        .bernoulli_delayed("S", "V", r.eta, 2, r.vaccination_delay)
        .bernoulli("I", "D", r.mu, 3)
        .build()
}

pub fn seir(r: &Rates) -> EpiResult<ModelVariant> {
    ModelVariant::builder("SEIR")
        .compartments(["S", "E", "I", "R"])
        .pairwise("S", "E", &["I"], 0)
        .bernoulli("E", "I", r.rho, 1)
        .bernoulli("I", "R", r.gamma, 2)
        .build()
}

pub fn seirs(r: &Rates) -> EpiResult<ModelVariant> {
    ModelVariant::builder("SEIRS")
        .compartments(["S", "E", "I", "R"])
        .pairwise("S", "E", &["I"], 0)
        .bernoulli("E", "I", r.rho, 1)
        .bernoulli("I", "R", r.gamma, 2)
        .bernoulli("R", "S", r.kappa, 3)
        .build()
}

pub fn seird(r: &Rates) -> EpiResult<ModelVariant> {
    ModelVariant::builder("SEIRD")
        .compartments(["S", "E", "I", "R", "D"])
        .pairwise("S", "E", &["I"], 0)
        .bernoulli("E", "I", r.rho, 1)
        .bernoulli("I", "R", r.gamma, 2)
        .bernoulli("I", "D", r.mu, 3)
        .build()
}

pub fn seirv(r: &Rates) -> EpiResult<ModelVariant> {
    ModelVariant::builder("SEIRV")
        .compartments(["S", "E", "I", "R", "V"])
        .pairwise("S", "E", &["I"], 0)
        .bernoulli("E", "I", r.rho, 1)
        .bernoulli("I", "R", r.gamma, 2)
        .bernoulli_delayed("S", "V", r.eta, 3, r.vaccination_delay)
        .build()
}

pub fn seirsd(r: &Rates) -> EpiResult<ModelVariant> {
    ModelVariant::builder("SEIRSD")
        .compartments(["S", "E", "I", "R", "D"])
        .pairwise("S", "E", &["I"], 0)
        .bernoulli("E", "I", r.rho, 1)
        .bernoulli("I", "R", r.gamma, 2)
        .bernoulli("I", "D", r.mu, 3)
        .bernoulli("R", "S", r.kappa, 4)
        .build()
}

pub fn seirsv(r: &Rates) -> EpiResult<ModelVariant> {
    ModelVariant::builder("SEIRSV")
        .compartments(["S", "E", "I", "R", "V"])
        .pairwise("S", "E", &["I"], 0)
        .bernoulli("E", "I", r.rho, 1)
        .bernoulli("I", "R", r.gamma, 2)
        .bernoulli_delayed("S", "V", r.eta, 3, r.vaccination_delay)
        .bernoulli("R", "S", r.kappa, 4)
        .build()
}

pub fn seirvd(r: &Rates) -> EpiResult<ModelVariant> {
    ModelVariant::builder("SEIRVD")
        .compartments(["S", "E", "I", "R", "V", "D"])
        .pairwise("S", "E", &["I"], 0)
        .bernoulli("E", "I", r.rho, 1)
        .bernoulli("I", "R", r.gamma, 2)
        .bernoulli_delayed("S", "V", r.eta, 3, r.vaccination_delay)
        .bernoulli("I", "D", r.mu, 4)
        .build()
}

pub fn sirsdv(r: &Rates) -> EpiResult<ModelVariant> {
    ModelVariant::builder("SIRSDV")
        .compartments(["S", "I", "R", "V", "D"])
        .pairwise("S", "I", &["I"], 0)
        .bernoulli("I", "R", r.gamma, 1)
        .bernoulli_delayed("S", "V", r.eta, 2, r.vaccination_delay)
        .bernoulli("I", "D", r.mu, 3)
        .bernoulli("R", "S", r.kappa, 4)
        .build()
}

pub fn seirsdv(r: &Rates) -> EpiResult<ModelVariant> {
    ModelVariant::builder("SEIRSDV")
        .compartments(["S", "E", "I", "R", "V", "D"])
        .pairwise("S", "E", &["I"], 0)
        .bernoulli("E", "I", r.rho, 1)
        .bernoulli("I", "R", r.gamma, 2)
        .bernoulli_delayed("S", "V", r.eta, 3, r.vaccination_delay)
        .bernoulli("I", "D", r.mu, 4)
        .bernoulli("R", "S", r.kappa, 5)
        .build()
}

/// S, E, I, L (lagged to ICU), ICU, R, D, V.  Both `I` and `L` infect.
pub fn icuv(r: &Rates) -> EpiResult<ModelVariant> {
    epi_core::validate::probability("ioda", r.ioda)?;
    epi_core::validate::probability("rho", r.rho)?;
    ModelVariant::builder("ICUV")
        .compartments(["S", "E", "I", "L", "ICU", "R", "D", "V"])
        .pairwise("S", "E", &["I", "L"], 0)
        .bernoulli_delayed("S", "V", r.eta, 1, r.vaccination_delay)
        .bernoulli("E", "L", r.rho * r.ioda, 2)
        .bernoulli("E", "I", r.rho * (1.0 - r.ioda), 3)
        .bernoulli("L", "ICU", r.phi, 4)
        .bernoulli("ICU", "R", r.chi, 5)
        .bernoulli("ICU", "D", r.omega, 6)
        .bernoulli("I", "R", r.gamma, 7)
        .bernoulli("I", "D", r.mu, 8)
        .bernoulli("R", "S", r.kappa, 9)
        .build()
}

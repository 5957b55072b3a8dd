//! JSON scenario file for the demo.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Deserialize;

use epi_agent::PopulationParams;
use epi_core::SimConfig;
use epi_kernel::{KernelParams, DEFAULT_HUB_CONSTANT};
use epi_model::Rates;

/// Bundled default, used when no path is given on the command line.
pub const DEFAULT_SCENARIO: &str = include_str!("../scenario.json");

#[derive(Debug, Deserialize)]
pub struct Scenario {
    pub config: SimConfig,

    /// Day-0 size per compartment label; unlisted compartments start empty.
    pub initial_sizes: BTreeMap<String, usize>,

    pub rates: Rates,

    pub kernel: KernelParams,

    #[serde(default = "default_hub_constant")]
    pub hub_constant: f64,

    #[serde(default)]
    pub population: PopulationParams,

    /// Log a progress line every this many days.
    #[serde(default = "default_log_interval")]
    pub log_interval: u32,

    #[serde(default = "default_output_dir")]
    pub output_dir: PathBuf,
}

impl Scenario {
    pub fn from_json(text: &str) -> Result<Self> {
        serde_json::from_str(text).context("parsing scenario JSON")
    }

    /// Read `path`, or the bundled scenario if `None`.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(p) => {
                let text = std::fs::read_to_string(p)
                    .with_context(|| format!("reading scenario {}", p.display()))?;
                Self::from_json(&text)
            }
            None => Self::from_json(DEFAULT_SCENARIO),
        }
    }

    /// Initial sizes in the borrowed form `SimBuilder::initial_sizes` takes.
    pub fn sizes(&self) -> Vec<(&str, usize)> {
        self.initial_sizes.iter().map(|(l, &n)| (l.as_str(), n)).collect()
    }
}

fn default_hub_constant() -> f64 {
    DEFAULT_HUB_CONSTANT
}

fn default_log_interval() -> u32 {
    10
}

fn default_output_dir() -> PathBuf {
    PathBuf::from("output/hub_icuv")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bundled_scenario_parses() {
        let s = Scenario::from_json(DEFAULT_SCENARIO).unwrap();
        assert_eq!(s.sizes(), vec![("I", 10), ("S", 1990)]);
        assert_eq!(s.rates.vaccination_delay, Some(30));
        assert!(s.population.validate().is_ok());
    }

    #[test]
    fn fractional_count_rejected() {
        let text = DEFAULT_SCENARIO.replace("\"I\": 10", "\"I\": 2.5");
        assert!(Scenario::from_json(&text).is_err());
    }
}

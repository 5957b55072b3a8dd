//! hub_icuv: ICU-V outbreak on a static population with the Hub kernel.
//!
//! Reads a JSON scenario (first argument, or the bundled `scenario.json`),
//! runs the engine to the horizon, logs progress through `tracing` and
//! writes the three history ledgers plus the aggregated series to the
//! scenario's output directory.
//!
//! ```text
//! RUST_LOG=debug cargo run -p hub_icuv -- demos/hub_icuv/scenario.json
//! ```

mod scenario;

use std::path::PathBuf;
use std::time::Instant;

use anyhow::{Context, Result};
use tracing::info;
use tracing_subscriber::EnvFilter;

use epi_core::Day;
use epi_history::CsvWriter;
use epi_kernel::HubKernel;
use epi_mobility::Static;
use epi_model::Preset;
use epi_sim::{CompartmentSeries, SimBuilder, SimObserver};

use scenario::Scenario;

// ── Progress observer ─────────────────────────────────────────────────────────

struct ProgressLogger<'a> {
    labels:   &'a [String],
    interval: u32,
    peak:     (Day, usize),
}

impl SimObserver for ProgressLogger<'_> {
    fn on_day_end(&mut self, day: Day, counts: &[usize]) {
        let infectious = self
            .labels
            .iter()
            .zip(counts)
            .filter(|(l, _)| matches!(l.as_str(), "I" | "L"))
            .map(|(_, &n)| n)
            .sum::<usize>();
        if infectious > self.peak.1 {
            self.peak = (day, infectious);
        }
        if self.interval > 0 && day.0 % self.interval == 0 {
            let summary: Vec<String> =
                self.labels.iter().zip(counts).map(|(l, n)| format!("{l}={n}")).collect();
            info!(day = day.0, infectious, "{}", summary.join(" "));
        }
    }

    fn on_sim_end(&mut self, final_day: Day, series: &CompartmentSeries) {
        let (peak_day, peak) = self.peak;
        info!(
            final_day = final_day.0,
            days      = series.days(),
            peak_day  = peak_day.0,
            peak,
            "outbreak finished"
        );
    }
}

// ── main ──────────────────────────────────────────────────────────────────────

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    // 1. Scenario.
    let path = std::env::args().nth(1).map(PathBuf::from);
    let scenario = Scenario::load(path.as_deref())?;
    info!(
        days       = scenario.config.days,
        seed       = scenario.config.seed,
        plane_size = scenario.config.plane_size,
        "scenario loaded"
    );

    // 2. Model, kernel and sim.
    let variant = Preset::Icuv.variant(&scenario.rates)?;
    let kernel = HubKernel::new(scenario.kernel, scenario.hub_constant)?;
    let mut sim = SimBuilder::new(scenario.config.clone(), variant, kernel, Static)
        .initial_sizes(&scenario.sizes())
        .population(scenario.population)
        .build()?;
    info!(
        agents            = sim.agents.count,
        high_transmission = sim.agents.high_transmission_count(),
        "population drawn"
    );

    // 3. Run.
    let labels = sim.registry.labels().to_vec();
    let mut progress = ProgressLogger { labels: &labels, interval: scenario.log_interval, peak: (Day::ZERO, 0) };
    let t0 = Instant::now();
    sim.run(&mut progress)?;
    info!(elapsed_s = t0.elapsed().as_secs_f64(), "run complete");

    // 4. Output.
    std::fs::create_dir_all(&scenario.output_dir)
        .with_context(|| format!("creating {}", scenario.output_dir.display()))?;
    let mut writer = CsvWriter::new(&scenario.output_dir)?;
    sim.history().export(&mut writer)?;

    let series: serde_json::Map<String, serde_json::Value> = labels
        .iter()
        .filter_map(|l| sim.series().get(l).map(|s| (l.clone(), serde_json::json!(s))))
        .collect();
    let series_path = scenario.output_dir.join("series.json");
    std::fs::write(&series_path, serde_json::to_string_pretty(&series)?)
        .with_context(|| format!("writing {}", series_path.display()))?;

    // 5. Summary.
    let ranking = sim.history().ranked_transmitters();
    println!("Total transmissions: {}", sim.history().total_transmissions());
    println!("{:<14} {:<8}", "Transmissions", "Agents");
    println!("{}", "-".repeat(24));
    for (count, agents) in ranking.iter().take(5) {
        println!("{:<14} {:<8}", count, agents.len());
    }
    println!();
    println!("{:<6} {:>8}", "State", "Final");
    println!("{}", "-".repeat(15));
    for (label, n) in labels.iter().zip(sim.series().latest()) {
        println!("{label:<6} {n:>8}");
    }
    println!("Output written to {}", scenario.output_dir.display());

    Ok(())
}

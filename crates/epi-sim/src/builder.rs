//! Fluent builder for constructing a [`Sim`].

use epi_agent::{AgentStore, PopulationBuilder, PopulationParams};
use epi_core::{AgentId, Day, EpiError, SimConfig, SimRng};
use epi_history::HistoryLog;
use epi_kernel::SpatialKernel;
use epi_mobility::{MobilityEngine, MovementPolicy};
use epi_model::{CompartmentRegistry, ModelVariant};
use tracing::info;

use crate::{CompartmentSeries, Sim, SimError, SimResult};

/// Fluent builder for [`Sim<K, P>`].
///
/// # Required inputs
///
/// - [`SimConfig`]: horizon, seed and plane size
/// - [`ModelVariant`]: compartments and transition rules
/// - `K: SpatialKernel`: e.g. [`epi_kernel::HubKernel`]
/// - `P: MovementPolicy`: e.g. [`epi_mobility::Static`]
///
/// # Optional inputs (have defaults)
///
/// | Method               | Default                                   |
/// |----------------------|-------------------------------------------|
/// | `.initial_sizes(v)`  | Every compartment empty                   |
/// | `.population(p)`     | `PopulationParams::default()`             |
/// | `.agents(store)`     | Drawn by `PopulationBuilder` from the seed |
///
/// # Example
///
/// ```rust,ignore
/// let variant = Preset::Sir.variant(&rates)?;
/// let mut sim = SimBuilder::new(config, variant, HubKernel::with_radius(2.0)?, Static)
///     .initial_sizes(&[("S", 999), ("I", 1)])
///     .build()?;
/// sim.run(&mut NoopObserver)?;
/// ```
pub struct SimBuilder<K: SpatialKernel, P: MovementPolicy> {
    config:     SimConfig,
    variant:    ModelVariant,
    kernel:     K,
    policy:     P,
    sizes:      Vec<(String, usize)>,
    population: PopulationParams,
    agents:     Option<AgentStore>,
}

impl<K: SpatialKernel, P: MovementPolicy> SimBuilder<K, P> {
    /// Create a builder with all required inputs.
    pub fn new(config: SimConfig, variant: ModelVariant, kernel: K, policy: P) -> Self {
        Self {
            config,
            variant,
            kernel,
            policy,
            sizes:      Vec::new(),
            population: PopulationParams::default(),
            agents:     None,
        }
    }

    /// Day-0 size per compartment label.  Unlisted compartments start empty.
    pub fn initial_sizes(mut self, sizes: &[(&str, usize)]) -> Self {
        self.sizes = sizes.iter().map(|&(l, n)| (l.to_owned(), n)).collect();
        self
    }

    /// Distributions for drawing the population's attributes.
    pub fn population(mut self, params: PopulationParams) -> Self {
        self.population = params;
        self
    }

    /// Use a prepared agent store instead of drawing one.  Its length must
    /// equal the sum of the initial sizes.
    pub fn agents(mut self, agents: AgentStore) -> Self {
        self.agents = Some(agents);
        self
    }

    /// Validate every input, draw the population and record day 0.
    ///
    /// Nothing is allocated for the run until all checks pass, so a bad
    /// configuration never yields a partial log.
    pub fn build(self) -> SimResult<Sim<K, P>> {
        // ── Validate ──────────────────────────────────────────────────────
        self.config.validate()?;
        self.variant.validate()?;
        self.population.validate()?;
        let sizes = self.resolve_sizes()?;
        let registry = CompartmentRegistry::with_initial_sizes(self.variant.labels(), &sizes)?;
        let population = registry.population();

        if let Some(agents) = &self.agents {
            if agents.count != population {
                return Err(SimError::AgentCountMismatch {
                    expected: population,
                    got:      agents.count,
                    what:     "agent store",
                });
            }
            agents.validate(self.config.plane_size)?;
        }

        // ── Draw agents and motion state ──────────────────────────────────
        let mut rng = SimRng::new(self.config.seed);
        let agents = match self.agents {
            Some(a) => a,
            None => PopulationBuilder::new(population, self.config.plane_size)
                .params(self.population)
                .build(&mut rng)?,
        };
        let mobility = MobilityEngine::new(self.policy, self.config.plane_size, &agents, &mut rng)?;

        // ── Day 0 ─────────────────────────────────────────────────────────
        let horizon = self.config.horizon();
        let labels = self.variant.labels().to_vec();
        let mut history = HistoryLog::new(horizon, population, labels.clone(), !mobility.is_static());
        for c in registry.compartment_ids() {
            for agent in registry.members(c) {
                history.record_state_change(agent, c, Day::ZERO);
            }
        }
        history.record_locations(Day::ZERO, &agents.position);
        let series = CompartmentSeries::new(labels, &sizes, horizon);

        info!(
            variant    = self.variant.name(),
            population,
            horizon    = self.config.days,
            seed       = self.config.seed,
            "simulation built"
        );

        Ok(Sim {
            rules: self.variant.ordered_rules(),
            config: self.config,
            agents,
            registry,
            variant: self.variant,
            kernel: self.kernel,
            mobility,
            history,
            series,
            rng,
            day: Day::ZERO,
        })
    }

    /// Initial sizes in declaration order.
    fn resolve_sizes(&self) -> SimResult<Vec<usize>> {
        let mut sizes = vec![None; self.variant.labels().len()];
        for (label, n) in &self.sizes {
            let c = self
                .variant
                .compartment(label)
                .ok_or_else(|| EpiError::Config(format!("unknown compartment label {label:?}")))?;
            if sizes[c.index()].replace(*n).is_some() {
                return Err(EpiError::Config(format!("initial size for {label:?} given twice")).into());
            }
        }
        let sizes: Vec<usize> = sizes.into_iter().map(Option::unwrap_or_default).collect();
        let total: usize = sizes.iter().sum();
        if AgentId::try_from(total).is_err() {
            return Err(EpiError::Config(format!("population {total} does not fit an AgentId")).into());
        }
        Ok(sizes)
    }
}

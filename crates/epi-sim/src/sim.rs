//! The `Sim` struct and its daily loop.

use epi_agent::AgentStore;
use epi_core::{AgentId, CompartmentId, Day, SimConfig, SimRng};
use epi_history::HistoryLog;
use epi_kernel::{ContactIndex, SpatialKernel};
use epi_mobility::{MobilityEngine, MovementPolicy};
use epi_model::{CompartmentRegistry, ModelVariant, RuleKind, TransitionRule};
use tracing::{debug, info, trace};

use crate::{CompartmentSeries, SimObserver, SimResult};

// ── Per-day selection state ───────────────────────────────────────────────────

/// Agents chosen by one rule on the current day, ascending within the rule.
struct Transfer {
    source:      CompartmentId,
    destination: CompartmentId,
    agents:      Vec<AgentId>,
}

/// Selection bookkeeping for one day.
///
/// The registry is not touched until the commit pass, so it is the
/// start-of-day snapshot.  `leaving` is the removed-this-day set shared by
/// every rule: each agent is in exactly one compartment, so a flag per
/// agent is enough to tell every later rule that its source lost a member.
struct DaySelection {
    leaving:   Vec<bool>,
    transfers: Vec<Transfer>,
}

impl DaySelection {
    fn new(population: usize) -> Self {
        Self { leaving: vec![false; population], transfers: Vec::new() }
    }

    #[inline]
    fn is_leaving(&self, agent: AgentId) -> bool {
        self.leaving[agent.index()]
    }

    fn push(&mut self, rule: &TransitionRule, agents: Vec<AgentId>) {
        for &a in &agents {
            self.leaving[a.index()] = true;
        }
        self.transfers.push(Transfer {
            source:      rule.source,
            destination: rule.destination,
            agents,
        });
    }
}

// ── Sim ───────────────────────────────────────────────────────────────────────

/// The transition engine.
///
/// `Sim<K, P>` owns all run state and drives the five-step day:
///
/// 1. **Pairwise pass**: for every pairwise rule, each start-of-day infector
///    (infectious compartments in list order, ascending index) draws against
///    every remaining source member inside its kernel reach.  The first
///    success for a susceptible wins; later pairs skip it.
/// 2. **Bernoulli passes**: one trial per remaining source member per rule,
///    in evaluation order.  Earlier rules on the same source shrink what
///    later rules see.
/// 3. **Commit**: destinations are set and state changes recorded.
/// 4. **Movement**: the policy moves every agent; positions are recorded.
/// 5. **Aggregation**: each size is the previous day's plus and minus the
///    transfer counts.
///
/// All randomness comes from one generator in a fixed traversal order, so a
/// seed fully determines the run.
///
/// Create via [`SimBuilder`][crate::SimBuilder].
pub struct Sim<K: SpatialKernel, P: MovementPolicy> {
    /// Horizon, seed and plane size.
    pub config: SimConfig,

    /// The single authoritative record of every agent.
    pub agents: AgentStore,

    /// Current compartment membership.
    pub registry: CompartmentRegistry,

    pub variant: ModelVariant,

    pub kernel: K,

    /// Movement policy plus per-agent motion state.
    pub mobility: MobilityEngine<P>,

    /// Transmissions, state changes and positions since day 0.
    pub history: HistoryLog,

    /// Aggregated sizes, day 0 first.
    pub series: CompartmentSeries,

    /// The variant's rules in evaluation order.
    pub(crate) rules: Vec<TransitionRule>,
    pub(crate) rng:   SimRng,
    /// Last completed day.
    pub(crate) day:   Day,
}

impl<K: SpatialKernel, P: MovementPolicy> Sim<K, P> {
    // ── Public API ────────────────────────────────────────────────────────

    /// Run from the current day to the horizon.
    ///
    /// Calls observer hooks at every day boundary.  Use
    /// [`NoopObserver`][crate::NoopObserver] if you don't need callbacks.
    pub fn run<O: SimObserver>(&mut self, observer: &mut O) -> SimResult<&CompartmentSeries> {
        let remaining = self.config.days.saturating_sub(self.day.0);
        self.run_days(remaining, observer)
    }

    /// Run at most `n` more days; never past the horizon.
    ///
    /// Useful for tests and incremental stepping.
    pub fn run_days<O: SimObserver>(&mut self, n: u32, observer: &mut O) -> SimResult<&CompartmentSeries> {
        let start = self.day;
        info!(
            from       = start.0,
            horizon    = self.config.days,
            population = self.registry.population(),
            "run started"
        );
        for _ in 0..n {
            if self.day >= self.config.horizon() {
                break;
            }
            let day = self.day.next();
            observer.on_day_start(day);
            let sizes = self.step(day);
            observer.on_day_end(day, &sizes);
            self.day = day;
        }
        if self.is_finished() && start < self.day {
            observer.on_sim_end(self.day, &self.series);
        }
        info!(
            day           = self.day.0,
            transmissions = self.history.total_transmissions(),
            "run finished"
        );
        Ok(&self.series)
    }

    /// Last completed day; `Day::ZERO` before the first step.
    pub fn day(&self) -> Day {
        self.day
    }

    pub fn is_finished(&self) -> bool {
        self.day >= self.config.horizon()
    }

    pub fn history(&self) -> &HistoryLog {
        &self.history
    }

    pub fn series(&self) -> &CompartmentSeries {
        &self.series
    }

    /// Rules in the order they are evaluated each day.
    pub fn rules(&self) -> &[TransitionRule] {
        &self.rules
    }

    // ── Core day processing ───────────────────────────────────────────────

    /// Run the five steps for `day` and return its aggregated sizes.
    fn step(&mut self, day: Day) -> Vec<usize> {
        let mut selection = DaySelection::new(self.registry.population());

        // ── Steps 1 and 2: selection against the start-of-day snapshot ───
        for i in 0..self.rules.len() {
            let rule = self.rules[i].clone();
            if !rule.is_active(day) {
                continue;
            }
            let chosen = match &rule.kind {
                RuleKind::Pairwise { infectious } => self.pairwise_pass(day, rule.source, infectious, &selection),
                RuleKind::Bernoulli { probability } => self.bernoulli_pass(rule.source, *probability, &selection),
            };
            selection.push(&rule, chosen);
        }

        // ── Step 3: commit ────────────────────────────────────────────────
        for t in &selection.transfers {
            for &agent in &t.agents {
                self.registry.transfer(agent, t.source, t.destination);
                self.history.record_state_change(agent, t.destination, day);
            }
        }

        // ── Step 4: movement ──────────────────────────────────────────────
        if !self.mobility.is_static() {
            self.mobility.advance(&mut self.agents, &mut self.rng);
            self.history.record_locations(day, &self.agents.position);
        }

        // ── Step 5: aggregation ───────────────────────────────────────────
        let mut sizes = self.series.latest();
        for t in &selection.transfers {
            sizes[t.source.index()] -= t.agents.len();
            sizes[t.destination.index()] += t.agents.len();
        }
        self.series.push_day(&sizes);

        debug!(
            day = day.0,
            moved = selection.transfers.iter().map(|t| t.agents.len()).sum::<usize>(),
            sizes = ?sizes,
            "day complete"
        );
        sizes
    }

    /// Kernel-driven infection of `source` by the `infectious` compartments.
    ///
    /// Returns infectees in ascending order.  Candidates come from an R-tree
    /// over the remaining source members, limited to the infector's reach;
    /// every pair outside that reach has probability 0 and would not draw.
    fn pairwise_pass(
        &mut self,
        day:        Day,
        source:     CompartmentId,
        infectious: &[CompartmentId],
        selection:  &DaySelection,
    ) -> Vec<AgentId> {
        let index = ContactIndex::build(
            self.registry
                .members(source)
                .filter(|&a| !selection.is_leaving(a))
                .map(|a| (a, self.agents.position[a.index()])),
        );
        if index.is_empty() {
            return Vec::new();
        }

        let mut infected = vec![false; self.registry.population()];
        let mut chosen = Vec::new();
        for &class in infectious {
            for infector in self.registry.members(class) {
                let src = self.agents.agent(infector);
                let candidates: Vec<AgentId> = index
                    .within(src.position, self.kernel.reach(&src))
                    .into_iter()
                    .filter(|a| !infected[a.index()])
                    .collect();
                if candidates.is_empty() {
                    continue;
                }
                let probs = kernel_row(&self.kernel, &self.agents, &src, &candidates);
                for (&infectee, p) in candidates.iter().zip(probs) {
                    if !self.rng.trial(p) {
                        continue;
                    }
                    infected[infectee.index()] = true;
                    chosen.push(infectee);
                    self.history.record_transmission(day, infector, infectee);
                    trace!(day = day.0, %infector, %infectee, p, "transmission");
                }
            }
        }
        chosen.sort_unstable();
        chosen
    }

    /// One independent trial per remaining member of `source`.
    fn bernoulli_pass(&mut self, source: CompartmentId, probability: f64, selection: &DaySelection) -> Vec<AgentId> {
        let rng = &mut self.rng;
        self.registry
            .members(source)
            .filter(|&a| !selection.is_leaving(a))
            .filter(|_| rng.trial(probability))
            .collect()
    }
}

// ── Kernel row ────────────────────────────────────────────────────────────────

/// Kernel probabilities of `infector` against each candidate, in order.
///
/// With the `parallel` feature the row is evaluated on Rayon's thread pool;
/// the caller still draws sequentially, so the stream is unchanged.
#[cfg(not(feature = "parallel"))]
fn kernel_row<K: SpatialKernel>(
    kernel:     &K,
    agents:     &AgentStore,
    infector:   &epi_agent::Agent,
    candidates: &[AgentId],
) -> Vec<f64> {
    candidates
        .iter()
        .map(|&a| kernel.probability(infector, &agents.agent(a)))
        .collect()
}

#[cfg(feature = "parallel")]
fn kernel_row<K: SpatialKernel>(
    kernel:     &K,
    agents:     &AgentStore,
    infector:   &epi_agent::Agent,
    candidates: &[AgentId],
) -> Vec<f64> {
    use rayon::prelude::*;

    candidates
        .par_iter()
        .map(|&a| kernel.probability(infector, &agents.agent(a)))
        .collect()
}

//! Compartment membership over agent indices.
//!
//! # Layout
//!
//! One `Vec<bool>` of length `population` per compartment, indexed by
//! `AgentId`.  Every agent is flagged in exactly one compartment; the only
//! mutation is [`CompartmentRegistry::transfer`], which clears one flag and
//! sets another, so the invariant holds after every call.
//!
//! During a day's selection passes the registry is read-only and doubles as
//! the start-of-day snapshot.  The engine commits transfers afterwards.

use epi_core::{AgentId, CompartmentId, EpiError, EpiResult};

#[cfg(feature = "fx-hash")]
type LabelMap = rustc_hash::FxHashMap<String, CompartmentId>;
#[cfg(not(feature = "fx-hash"))]
type LabelMap = std::collections::HashMap<String, CompartmentId>;

#[derive(Clone, Debug)]
pub struct CompartmentRegistry {
    labels:     Vec<String>,
    index:      LabelMap,
    members:    Vec<Vec<bool>>,
    population: usize,
}

impl CompartmentRegistry {
    /// Partition `sizes.iter().sum()` agents into `labels`, in declaration
    /// blocks: agents `0..sizes[0]` go to the first compartment, the next
    /// `sizes[1]` to the second, and so on.
    pub fn with_initial_sizes(labels: &[String], sizes: &[usize]) -> EpiResult<Self> {
        if labels.len() != sizes.len() {
            return Err(EpiError::Config(format!(
                "{} compartments but {} initial sizes",
                labels.len(),
                sizes.len()
            )));
        }
        let mut index = LabelMap::default();
        for (i, label) in labels.iter().enumerate() {
            let id = CompartmentId::try_from(i)
                .map_err(|_| EpiError::Config(format!("too many compartments ({})", labels.len())))?;
            if index.insert(label.clone(), id).is_some() {
                return Err(EpiError::Config(format!("duplicate compartment label {label:?}")));
            }
        }
        let population: usize = sizes.iter().sum();
        if u32::try_from(population).is_err() {
            return Err(EpiError::Config(format!("population {population} does not fit an AgentId")));
        }

        let mut members = vec![vec![false; population]; labels.len()];
        let mut next = 0usize;
        for (c, &size) in sizes.iter().enumerate() {
            members[c][next..next + size].fill(true);
            next += size;
        }

        Ok(Self {
            labels: labels.to_vec(),
            index,
            members,
            population,
        })
    }

    // ── Lookup ────────────────────────────────────────────────────────────

    pub fn population(&self) -> usize {
        self.population
    }

    /// Number of compartments.
    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    pub fn labels(&self) -> &[String] {
        &self.labels
    }

    /// # Panics
    /// Panics if `c` is not a compartment of this registry.
    pub fn label(&self, c: CompartmentId) -> &str {
        &self.labels[c.index()]
    }

    pub fn id(&self, label: &str) -> EpiResult<CompartmentId> {
        self.index
            .get(label)
            .copied()
            .ok_or_else(|| EpiError::Config(format!("unknown compartment label {label:?}")))
    }

    pub fn compartment_ids(&self) -> impl Iterator<Item = CompartmentId> + '_ {
        (0..self.labels.len() as u16).map(CompartmentId)
    }

    // ── Membership ────────────────────────────────────────────────────────

    #[inline]
    pub fn contains(&self, c: CompartmentId, agent: AgentId) -> bool {
        self.members[c.index()][agent.index()]
    }

    /// Members of `c` in ascending index order.
    pub fn members(&self, c: CompartmentId) -> impl Iterator<Item = AgentId> + '_ {
        self.members[c.index()]
            .iter()
            .enumerate()
            .filter(|&(_, &m)| m)
            .map(|(i, _)| AgentId(i as u32))
    }

    /// Cardinality of `c`, recomputed from the flags.
    pub fn count(&self, c: CompartmentId) -> usize {
        self.members[c.index()].iter().filter(|&&m| m).count()
    }

    /// Cardinality of every compartment, in declaration order.
    pub fn counts(&self) -> Vec<usize> {
        self.compartment_ids().map(|c| self.count(c)).collect()
    }

    /// The compartment `agent` is in, or `None` if it is out of range.
    pub fn compartment_of(&self, agent: AgentId) -> Option<CompartmentId> {
        if agent.index() >= self.population {
            return None;
        }
        self.compartment_ids().find(|&c| self.contains(c, agent))
    }

    // ── Mutation ──────────────────────────────────────────────────────────

    /// Move `agent` from `from` to `to`.
    pub fn transfer(&mut self, agent: AgentId, from: CompartmentId, to: CompartmentId) {
        debug_assert!(self.contains(from, agent), "{agent} is not in compartment {}", from.0);
        self.members[from.index()][agent.index()] = false;
        self.members[to.index()][agent.index()] = true;
    }

    /// First agent flagged in zero or several compartments, if any.
    pub fn exclusivity_violation(&self) -> Option<AgentId> {
        (0..self.population).map(|i| AgentId(i as u32)).find(|&a| {
            self.compartment_ids().filter(|&c| self.contains(c, a)).count() != 1
        })
    }
}

//! Core agent storage: `AgentStore` (SoA data) and the `Agent` record view.
//!
//! # One record per individual
//!
//! Every physical individual exists exactly once, at its `AgentId` index.
//! Compartment membership refers to agents by index, so a move writes the
//! single authoritative `position` slot and every compartment sees it.
//!
//! ```ignore
//! let pos = store.position[agent.index()];  // O(1), cache-friendly
//! ```

use epi_core::{validate, AgentId, EpiError, EpiResult, Position};

// ── Agent ─────────────────────────────────────────────────────────────────────

/// A by-value snapshot of one agent's attributes.
///
/// This is what the spatial kernels see: cheap to copy, immutable, and
/// detached from the store so a kernel can never mutate shared state.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Agent {
    pub id: AgentId,
    pub position: Position,
    /// Super-spreader flag, drawn once at creation.
    pub high_transmission: bool,
    /// Personal infection radius (used by flat-radius kernels).
    pub kernel_radius: f64,
    /// Personal movement radius (orbit radius for periodic movement).
    pub move_radius: f64,
}

// ── AgentStore ────────────────────────────────────────────────────────────────

/// Structure-of-Arrays storage for all agent attributes.
///
/// Every `Vec` field has exactly `count` elements; the `AgentId` value is the
/// index into all of them.  Agents are created once by
/// [`PopulationBuilder`][crate::PopulationBuilder] and never removed.
///
/// Only `position` changes during a run, and only in the engine's movement
/// pass.
#[derive(Clone, Debug)]
pub struct AgentStore {
    /// Number of agents.  Equals the length of every SoA `Vec`.
    pub count: usize,

    /// Current position on the plane.
    pub position: Vec<Position>,

    /// Super-spreader flag.
    pub high_transmission: Vec<bool>,

    /// Personal infection radius.
    pub kernel_radius: Vec<f64>,

    /// Personal movement radius.
    pub move_radius: Vec<f64>,
}

impl AgentStore {
    /// `true` if there are no agents.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    /// Iterator over all `AgentId`s in ascending index order.
    pub fn agent_ids(&self) -> impl Iterator<Item = AgentId> + '_ {
        (0..self.count as u32).map(AgentId)
    }

    /// Record view of `agent`.
    ///
    /// # Panics
    /// Panics if `agent` is out of range; use [`try_agent`](Self::try_agent)
    /// for untrusted indices.
    #[inline]
    pub fn agent(&self, agent: AgentId) -> Agent {
        let i = agent.index();
        Agent {
            id:                agent,
            position:          self.position[i],
            high_transmission: self.high_transmission[i],
            kernel_radius:     self.kernel_radius[i],
            move_radius:       self.move_radius[i],
        }
    }

    /// Checked variant of [`agent`](Self::agent).
    pub fn try_agent(&self, agent: AgentId) -> EpiResult<Agent> {
        if agent.index() >= self.count {
            return Err(EpiError::AgentNotFound { agent, population: self.count });
        }
        Ok(self.agent(agent))
    }

    /// Number of high-transmission agents.
    pub fn high_transmission_count(&self) -> usize {
        self.high_transmission.iter().filter(|&&ss| ss).count()
    }

    /// Check a store assembled outside [`PopulationBuilder`][crate::PopulationBuilder].
    ///
    /// Every column must hold `count` entries, every position must be finite
    /// and inside `[0, plane_size]²`, and every radius must be finite.  Radii
    /// may be negative: a normal draw can be, and the kernels gate on it.
    pub fn validate(&self, plane_size: f64) -> EpiResult<()> {
        let columns = [
            ("position",          self.position.len()),
            ("high_transmission", self.high_transmission.len()),
            ("kernel_radius",     self.kernel_radius.len()),
            ("move_radius",       self.move_radius.len()),
        ];
        for (column, len) in columns {
            if len != self.count {
                return Err(EpiError::Config(format!(
                    "agent store column `{column}` has {len} entries, expected {}",
                    self.count
                )));
            }
        }

        for (i, p) in self.position.iter().enumerate() {
            validate::finite("position.x", p.x)?;
            validate::finite("position.y", p.y)?;
            if !p.within_plane(plane_size) {
                return Err(EpiError::Config(format!(
                    "agent {i} at ({}, {}) lies outside the {plane_size} plane",
                    p.x, p.y
                )));
            }
        }
        for (&r0, &rm) in self.kernel_radius.iter().zip(&self.move_radius) {
            validate::finite("kernel_radius", r0)?;
            validate::finite("move_radius", rm)?;
        }
        Ok(())
    }

    // ── Package-private constructor used by PopulationBuilder ─────────────

    pub(crate) fn with_capacity(count: usize) -> Self {
        Self {
            count:             0,
            position:          Vec::with_capacity(count),
            high_transmission: Vec::with_capacity(count),
            kernel_radius:     Vec::with_capacity(count),
            move_radius:       Vec::with_capacity(count),
        }
    }

    pub(crate) fn push(&mut self, position: Position, high_transmission: bool, kernel_radius: f64, move_radius: f64) {
        self.position.push(position);
        self.high_transmission.push(high_transmission);
        self.kernel_radius.push(kernel_radius);
        self.move_radius.push(move_radius);
        self.count += 1;
    }
}

//! The daily movement pass.

use epi_agent::AgentStore;
use epi_core::{validate, AgentId, EpiResult, SimRng};

use crate::{MotionState, MovementPolicy};

/// Owns a [`MovementPolicy`] and one [`MotionState`] per agent.
///
/// # Type parameter
///
/// `P` is the movement model (e.g. [`crate::RandomWalk`]).  Swap it at
/// compile time; there is no runtime overhead.
pub struct MobilityEngine<P: MovementPolicy> {
    pub policy: P,

    /// Side of the square plane positions are clamped to.
    pub plane_size: f64,

    /// Indexed by `AgentId`.
    pub states: Vec<MotionState>,
}

impl<P: MovementPolicy> MobilityEngine<P> {
    /// Initialise motion state for every agent in ascending index order.
    pub fn new(policy: P, plane_size: f64, agents: &AgentStore, rng: &mut SimRng) -> EpiResult<Self> {
        validate::non_negative("plane_size", plane_size)?;
        let states = agents
            .agent_ids()
            .map(|a| policy.init_motion(agents.position[a.index()], agents.move_radius[a.index()], rng))
            .collect();
        Ok(Self { policy, plane_size, states })
    }

    #[inline]
    pub fn is_static(&self) -> bool {
        self.policy.is_static()
    }

    #[inline]
    pub fn state(&self, agent: AgentId) -> &MotionState {
        &self.states[agent.index()]
    }

    /// Move every agent once, in ascending index order, writing the single
    /// authoritative position slot.  A no-op for static policies.
    pub fn advance(&mut self, agents: &mut AgentStore, rng: &mut SimRng) {
        if self.is_static() {
            return;
        }
        debug_assert_eq!(self.states.len(), agents.count);
        for (i, state) in self.states.iter_mut().enumerate() {
            agents.position[i] = self.policy.step(
                agents.position[i],
                state,
                agents.move_radius[i],
                self.plane_size,
                rng,
            );
        }
    }
}

//! The append-only history log and its read-side queries.
//!
//! # Ledgers
//!
//! | Ledger        | Shape                                    | Indexed by |
//! |---------------|------------------------------------------|------------|
//! | transmissions | `Vec<Transmission>` per day, `0..=horizon` | `Day`      |
//! | state changes | `Vec<StateChange>` per agent             | `AgentId`  |
//! | locations     | `Vec<Position>` per day (one per agent)  | `Day`      |
//!
//! Day 0 never has transmissions.  An immobile population records a single
//! location snapshot on day 0.
//!
//! Queries take `&self`, so a failed lookup cannot disturb the log.

use std::collections::BTreeMap;

use epi_core::{AgentId, CompartmentId, Day, EpiError, EpiResult, Position};

/// One infection edge.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Transmission {
    pub infector: AgentId,
    pub infectee: AgentId,
}

/// One entry in an agent's state-change ledger.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StateChange {
    pub day:         Day,
    pub compartment: CompartmentId,
}

pub struct HistoryLog {
    horizon:       Day,
    population:    usize,
    mobile:        bool,
    labels:        Vec<String>,
    transmissions: Vec<Vec<Transmission>>,
    state_changes: Vec<Vec<StateChange>>,
    locations:     Vec<Vec<Position>>,
}

impl HistoryLog {
    /// Empty log for `population` agents over days `0..=horizon`.
    ///
    /// `labels` names the compartments so queries can return labels.
    pub fn new(horizon: Day, population: usize, labels: Vec<String>, mobile: bool) -> Self {
        let days = horizon.index() + 1;
        Self {
            horizon,
            population,
            mobile,
            labels,
            transmissions: vec![Vec::new(); days],
            state_changes: vec![Vec::new(); population],
            locations:     Vec::with_capacity(if mobile { days } else { 1 }),
        }
    }

    pub fn horizon(&self) -> Day {
        self.horizon
    }

    pub fn population(&self) -> usize {
        self.population
    }

    pub fn is_mobile(&self) -> bool {
        self.mobile
    }

    pub fn labels(&self) -> &[String] {
        &self.labels
    }

    // ── Append ────────────────────────────────────────────────────────────

    pub fn record_transmission(&mut self, day: Day, infector: AgentId, infectee: AgentId) {
        self.transmissions[day.index()].push(Transmission { infector, infectee });
    }

    pub fn record_state_change(&mut self, agent: AgentId, compartment: CompartmentId, day: Day) {
        self.state_changes[agent.index()].push(StateChange { day, compartment });
    }

    /// Record every agent's position for `day`.  Ignored after day 0 for an
    /// immobile log.
    pub fn record_locations(&mut self, day: Day, positions: &[Position]) {
        if !self.mobile && day != Day::ZERO {
            return;
        }
        debug_assert_eq!(self.locations.len(), day.index(), "locations recorded out of order");
        debug_assert_eq!(positions.len(), self.population);
        self.locations.push(positions.to_vec());
    }

    // ── Checks ────────────────────────────────────────────────────────────

    fn check_agent(&self, agent: AgentId) -> EpiResult<()> {
        if agent.index() >= self.population {
            return Err(EpiError::AgentNotFound { agent, population: self.population });
        }
        Ok(())
    }

    fn check_day(&self, day: Day) -> EpiResult<()> {
        if day > self.horizon {
            return Err(EpiError::DayOutOfRange { day, horizon: self.horizon });
        }
        Ok(())
    }

    // ── Queries ───────────────────────────────────────────────────────────

    /// Raw state-change ledger of `agent`, starting with its day-0 entry.
    pub fn state_changes(&self, agent: AgentId) -> EpiResult<&[StateChange]> {
        self.check_agent(agent)?;
        Ok(&self.state_changes[agent.index()])
    }

    /// `(day, label)` for every state change of `agent`.
    pub fn person_history(&self, agent: AgentId) -> EpiResult<Vec<(Day, &str)>> {
        Ok(self
            .state_changes(agent)?
            .iter()
            .map(|c| (c.day, self.labels[c.compartment.index()].as_str()))
            .collect())
    }

    /// [`person_history`](Self::person_history) plus the agent's position on
    /// every recorded day (a single entry for an immobile population).
    pub fn person_history_with_movement(&self, agent: AgentId) -> EpiResult<(Vec<(Day, &str)>, Vec<Position>)> {
        let history = self.person_history(agent)?;
        let path = self.locations.iter().map(|day| day[agent.index()]).collect();
        Ok((history, path))
    }

    /// All positions recorded for `day`.  For an immobile population every
    /// day resolves to the day-0 snapshot.
    ///
    /// A day inside the horizon that has not been simulated yet is
    /// `DayOutOfRange`, bounded by the last recorded day.
    pub fn locations_on(&self, day: Day) -> EpiResult<&[Position]> {
        self.check_day(day)?;
        let idx = if self.mobile { day.index() } else { 0 };
        self.locations.get(idx).map(Vec::as_slice).ok_or(EpiError::DayOutOfRange {
            day,
            horizon: Day(self.locations.len().saturating_sub(1) as u32),
        })
    }

    /// Every recorded location snapshot, in day order.
    pub fn locations(&self) -> &[Vec<Position>] {
        &self.locations
    }

    /// The full transmission ledger keyed by day `1..=horizon`.
    pub fn transmissions(&self) -> BTreeMap<Day, &[Transmission]> {
        (1..=self.horizon.0)
            .map(|d| (Day(d), self.transmissions[d as usize].as_slice()))
            .collect()
    }

    /// Transmissions on `day`.  Day 0 is in range and always empty.
    pub fn transmissions_on(&self, day: Day) -> EpiResult<&[Transmission]> {
        self.check_day(day)?;
        Ok(&self.transmissions[day.index()])
    }

    /// `(infectee, day)` for every transmission made by `agent`, in day order.
    pub fn person_transmissions(&self, agent: AgentId) -> EpiResult<Vec<(AgentId, Day)>> {
        self.check_agent(agent)?;
        Ok(self
            .transmissions
            .iter()
            .enumerate()
            .flat_map(|(d, edges)| {
                edges
                    .iter()
                    .filter(move |t| t.infector == agent)
                    .map(move |t| (t.infectee, Day(d as u32)))
            })
            .collect())
    }

    /// Outgoing transmission count per agent, indexed by `AgentId`.
    pub fn transmission_counts(&self) -> Vec<usize> {
        let mut counts = vec![0usize; self.population];
        for t in self.transmissions.iter().flatten() {
            counts[t.infector.index()] += 1;
        }
        counts
    }

    /// Agents grouped by outgoing transmission count, highest count first.
    /// Agents inside a group are ascending.  The zero group is included.
    pub fn ranked_transmitters(&self) -> Vec<(usize, Vec<AgentId>)> {
        let mut groups: BTreeMap<usize, Vec<AgentId>> = BTreeMap::new();
        for (i, &n) in self.transmission_counts().iter().enumerate() {
            groups.entry(n).or_default().push(AgentId(i as u32));
        }
        groups.into_iter().rev().collect()
    }

    /// Total number of transmissions in the ledger.
    pub fn total_transmissions(&self) -> usize {
        self.transmissions.iter().map(Vec::len).sum()
    }
}

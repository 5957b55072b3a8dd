//! The `HistoryWriter` trait and log export.

use crate::{HistoryLog, HistoryResult, LocationRow, StateChangeRow, TransmissionRow};

/// Trait implemented by ledger persistence backends.
pub trait HistoryWriter {
    fn write_transmissions(&mut self, rows: &[TransmissionRow]) -> HistoryResult<()>;

    fn write_state_changes(&mut self, rows: &[StateChangeRow]) -> HistoryResult<()>;

    fn write_locations(&mut self, rows: &[LocationRow]) -> HistoryResult<()>;

    /// Flush and close all underlying file handles.
    ///
    /// Idempotent: safe to call more than once.
    fn finish(&mut self) -> HistoryResult<()>;
}

impl HistoryLog {
    /// Stream every ledger into `writer`, then finish it.
    ///
    /// Rows go out in ledger order: transmissions by day, state changes by
    /// agent, locations by day then agent.
    pub fn export<W: HistoryWriter>(&self, writer: &mut W) -> HistoryResult<()> {
        let transmissions: Vec<TransmissionRow> = self
            .transmissions()
            .into_iter()
            .flat_map(|(day, edges)| {
                edges.iter().map(move |t| TransmissionRow {
                    day:      day.0,
                    infector: t.infector.0,
                    infectee: t.infectee.0,
                })
            })
            .collect();
        writer.write_transmissions(&transmissions)?;

        let mut changes = Vec::new();
        for agent in 0..self.population() as u32 {
            for (day, label) in self.person_history(epi_core::AgentId(agent))? {
                changes.push(StateChangeRow { agent_id: agent, day: day.0, compartment: label.to_owned() });
            }
        }
        writer.write_state_changes(&changes)?;

        for (day, snapshot) in self.locations().iter().enumerate() {
            let rows: Vec<LocationRow> = snapshot
                .iter()
                .enumerate()
                .map(|(i, p)| LocationRow { day: day as u32, agent_id: i as u32, x: p.x, y: p.y })
                .collect();
            writer.write_locations(&rows)?;
        }

        writer.finish()
    }
}

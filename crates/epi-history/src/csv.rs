//! CSV output backend.
//!
//! Creates three files in the configured output directory:
//! - `transmissions.csv`
//! - `state_changes.csv`
//! - `locations.csv`

use std::fs::File;
use std::path::Path;

use csv::Writer;

use crate::writer::HistoryWriter;
use crate::{HistoryResult, LocationRow, StateChangeRow, TransmissionRow};

/// Writes the history ledgers to three CSV files.
pub struct CsvWriter {
    transmissions: Writer<File>,
    state_changes: Writer<File>,
    locations:     Writer<File>,
    finished:      bool,
}

impl CsvWriter {
    /// Open (or create) the three CSV files in `dir` and write the header rows.
    pub fn new(dir: &Path) -> HistoryResult<Self> {
        let mut transmissions = Writer::from_path(dir.join("transmissions.csv"))?;
        transmissions.write_record(["day", "infector", "infectee"])?;

        let mut state_changes = Writer::from_path(dir.join("state_changes.csv"))?;
        state_changes.write_record(["agent_id", "day", "compartment"])?;

        let mut locations = Writer::from_path(dir.join("locations.csv"))?;
        locations.write_record(["day", "agent_id", "x", "y"])?;

        Ok(Self {
            transmissions,
            state_changes,
            locations,
            finished: false,
        })
    }
}

impl HistoryWriter for CsvWriter {
    fn write_transmissions(&mut self, rows: &[TransmissionRow]) -> HistoryResult<()> {
        for row in rows {
            self.transmissions.write_record(&[
                row.day.to_string(),
                row.infector.to_string(),
                row.infectee.to_string(),
            ])?;
        }
        Ok(())
    }

    fn write_state_changes(&mut self, rows: &[StateChangeRow]) -> HistoryResult<()> {
        for row in rows {
            self.state_changes.write_record(&[
                row.agent_id.to_string(),
                row.day.to_string(),
                row.compartment.clone(),
            ])?;
        }
        Ok(())
    }

    fn write_locations(&mut self, rows: &[LocationRow]) -> HistoryResult<()> {
        for row in rows {
            self.locations.write_record(&[
                row.day.to_string(),
                row.agent_id.to_string(),
                row.x.to_string(),
                row.y.to_string(),
            ])?;
        }
        Ok(())
    }

    fn finish(&mut self) -> HistoryResult<()> {
        if self.finished {
            return Ok(());
        }
        self.finished = true;
        self.transmissions.flush()?;
        self.state_changes.flush()?;
        self.locations.flush()?;
        Ok(())
    }
}

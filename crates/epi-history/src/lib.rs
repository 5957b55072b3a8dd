//! `epi-history`: the simulation's history recorder.
//!
//! | Module     | Contents                                                      |
//! |------------|---------------------------------------------------------------|
//! | [`log`]    | `HistoryLog`, `Transmission`, `StateChange` and the queries   |
//! | [`writer`] | `HistoryWriter` trait, `HistoryLog::export`                   |
//! | [`csv`]    | `CsvWriter` → `transmissions.csv`, `state_changes.csv`, `locations.csv` |
//! | [`row`]    | Flat row types handed to writers                              |
//! | [`error`]  | `HistoryError`, `HistoryResult<T>`                            |
//!
//! # Usage
//!
//! ```rust,ignore
//! use epi_history::CsvWriter;
//!
//! let mut writer = CsvWriter::new(Path::new("./output"))?;
//! sim.history().export(&mut writer)?;
//! ```

pub mod csv;
pub mod error;
pub mod log;
pub mod row;
pub mod writer;

#[cfg(test)]
mod tests;

pub use csv::CsvWriter;
pub use error::{HistoryError, HistoryResult};
pub use log::{HistoryLog, StateChange, Transmission};
pub use row::{LocationRow, StateChangeRow, TransmissionRow};
pub use writer::HistoryWriter;

//! Error types for epi-history.

use thiserror::Error;

use epi_core::EpiError;

/// Errors that can occur when exporting the history log.
#[derive(Debug, Error)]
pub enum HistoryError {
    #[error(transparent)]
    Lookup(#[from] EpiError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV write error: {0}")]
    Csv(#[from] csv::Error),
}

/// Alias for `Result<T, HistoryError>`.
pub type HistoryResult<T> = Result<T, HistoryError>;

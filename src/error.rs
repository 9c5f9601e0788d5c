//! Error types for the report_ingest library.

use std::io;
use thiserror::Error;

/// Result type alias for library operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error types that can occur while parsing report exports and syncing snapshots.
#[derive(Debug, Error)]
pub enum Error {
    /// I/O error occurred during read or write operations.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Error writing CSV output.
    #[error("CSV error: {0}")]
    CsvError(#[from] csv::Error),

    /// Error reading or writing JSON.
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    /// Legacy export without its project info row.
    #[error("Legacy export has no '{0}' row")]
    MissingMarker(String),

    /// Newer export without its column header row.
    #[error("Export has no header row with linenumber, component and workDone")]
    MissingHeader,

    /// Newer export whose header is not followed by any data.
    #[error("Export has a header row but no data rows")]
    NoDataRows,

    /// Invalid date format.
    #[error("Invalid date format: {0}")]
    InvalidDate(String),

    /// Invalid format specified.
    #[error("Invalid format: {0}")]
    InvalidFormat(String),

    /// Configuration could not be loaded.
    #[error("Configuration error: {0}")]
    Config(String),
}

impl Error {
    /// Whether this error means the blob carried no recognizable structure.
    ///
    /// Callers display the raw text instead of a table in that case.
    pub fn is_structural(&self) -> bool {
        matches!(
            self,
            Error::MissingMarker(_) | Error::MissingHeader | Error::NoDataRows
        )
    }
}

//! Error types for the employee index ingest.

use thiserror::Error;

/// Errors that can occur while loading the employee dataset.
///
/// Problems with individual rows are not errors; those rows are skipped and
/// reported in the loaded dataset instead.
#[derive(Error, Debug)]
pub enum IngestError {
    /// The file could not be opened or read.
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    /// The CSV reader failed in a way that stops further reading.
    #[error("CSV error: {0}")]
    CsvError(String),

    /// The file has no header row.
    #[error("Missing header row")]
    MissingHeader,

    /// The identifier column is not among the headers.
    #[error("Identifier column '{0}' not found in header")]
    MissingIdColumn(String),
}

impl IngestError {
    /// Create a CSV error.
    pub fn csv(msg: impl Into<String>) -> Self {
        Self::CsvError(msg.into())
    }
}

impl From<csv::Error> for IngestError {
    fn from(err: csv::Error) -> Self {
        match err.into_kind() {
            csv::ErrorKind::Io(e) => Self::IoError(e),
            kind => Self::CsvError(format!("{:?}", kind)),
        }
    }
}

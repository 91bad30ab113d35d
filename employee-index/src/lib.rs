//! # Employee Index
//!
//! Main library for the employee index tool.
//!
//! This crate wires the CSV loader and the Solr client together, exposes the
//! per-collection operations, and provides the run sequence used by the
//! binary.

pub mod config;
pub mod operations;
pub mod report;
pub mod runner;

#[cfg(test)]
pub(crate) mod testing;

pub use config::{Dependencies, Settings};
pub use operations::{EmployeeIndex, IndexSummary};
pub use report::OrLogDefault;

use thiserror::Error;

/// Errors that can occur during set-up or while running an operation.
#[derive(Error, Debug)]
pub enum IndexingError {
    /// Configuration error.
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// Failed to read the employee dataset.
    #[error("Ingest error: {0}")]
    IngestError(#[from] employee_index_ingest::IngestError),

    /// Search engine error.
    #[error("Search error: {0}")]
    SearchError(#[from] employee_index_repository::SearchError),
}

impl IndexingError {
    /// Create a configuration error.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::ConfigError(msg.into())
    }
}

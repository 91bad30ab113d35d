//! # Employee Index Ingest
//!
//! This crate turns the employee CSV export into records ready to be added
//! to a collection.
//!
//! ## Steps
//!
//! 1. **Decode**: Read the file as ISO-8859-1
//! 2. **Clean**: Skip malformed rows and rows with a missing or repeated identifier
//! 3. **Shape**: Drop the excluded column, type each column, and set the unique key

pub mod errors;
pub mod loader;

pub use errors::IngestError;
pub use loader::{CsvLoader, LoadedDataset, LoaderConfig, SkipReason, SkippedRow};

//! Lenient result handling and human-readable output.

use std::fmt::Display;
use tracing::error;

use employee_index_shared::{EmployeeRecord, FacetCounts};

/// Turn a failed operation into a logged message and a safe default.
pub trait OrLogDefault<T> {
    /// Return the value, or log the error under `operation` and return `T::default()`.
    fn or_log_default(self, operation: &str) -> T;
}

impl<T, E> OrLogDefault<T> for Result<T, E>
where
    T: Default,
    E: Display,
{
    fn or_log_default(self, operation: &str) -> T {
        match self {
            Ok(value) => value,
            Err(e) => {
                report_error(operation, &e);
                T::default()
            }
        }
    }
}

/// Log a failed operation and print it for the user.
pub fn report_error(operation: &str, error: &impl Display) {
    error!(operation = %operation, error = %error, "Operation failed");
    println!("Error {}: {}", operation, error);
}

/// Render records as one JSON object per line.
pub fn format_records(records: &[EmployeeRecord]) -> String {
    if records.is_empty() {
        return "[]".to_string();
    }
    records
        .iter()
        .map(|r| serde_json::to_string(r).unwrap_or_default())
        .collect::<Vec<_>>()
        .join("\n")
}

/// Render facet counts as a JSON object.
pub fn format_facets(facets: &FacetCounts) -> String {
    serde_json::to_string(facets).unwrap_or_default()
}

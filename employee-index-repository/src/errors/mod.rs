//! Error types for the employee index repository.

mod search_error;

pub use search_error::SearchError;

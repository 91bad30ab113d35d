//! Search error types.
//!
//! This module defines the error types that can occur during search engine
//! operations. Transient and permanent failures are not distinguished.

use thiserror::Error;

/// Errors that can occur during search engine operations.
#[derive(Error, Debug)]
pub enum SearchError {
    /// Failed to reach the search engine.
    #[error("Connection error: {0}")]
    ConnectionError(String),

    /// Search query execution failed.
    #[error("Query error: {0}")]
    QueryError(String),

    /// Failed to add documents.
    #[error("Index error: {0}")]
    IndexError(String),

    /// Failed to delete a document.
    #[error("Delete error: {0}")]
    DeleteError(String),

    /// Failed to parse a response from the search engine.
    #[error("Parse error: {0}")]
    ParseError(String),

    /// The provided query is invalid.
    #[error("Invalid query: {0}")]
    InvalidQuery(String),

    /// The search engine answered with a non-success status.
    #[error("Request failed with status {status}: {body}")]
    Status { status: u16, body: String },
}

impl SearchError {
    /// Create a connection error.
    pub fn connection(msg: impl Into<String>) -> Self {
        Self::ConnectionError(msg.into())
    }

    /// Create a query error.
    pub fn query(msg: impl Into<String>) -> Self {
        Self::QueryError(msg.into())
    }

    /// Create a parse error.
    pub fn parse(msg: impl Into<String>) -> Self {
        Self::ParseError(msg.into())
    }

    /// Create an invalid query error.
    pub fn invalid_query(msg: impl Into<String>) -> Self {
        Self::InvalidQuery(msg.into())
    }

    /// Create a status error.
    pub fn status(status: u16, body: impl Into<String>) -> Self {
        Self::Status {
            status,
            body: body.into(),
        }
    }
}

impl From<reqwest::Error> for SearchError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            Self::ParseError(err.to_string())
        } else {
            Self::ConnectionError(err.to_string())
        }
    }
}

impl From<serde_json::Error> for SearchError {
    fn from(err: serde_json::Error) -> Self {
        Self::ParseError(err.to_string())
    }
}

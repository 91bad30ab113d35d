//! Configuration types for the SolrClient.

use std::time::Duration;

/// Default request timeout, in seconds.
pub const DEFAULT_TIMEOUT_SECS: u64 = 60;

/// Configuration for the SolrClient.
#[derive(Debug, Clone)]
pub struct SolrConfig {
    /// Timeout applied to every HTTP request.
    pub timeout: Duration,
    /// Commit after every add and delete so changes are visible immediately.
    pub always_commit: bool,
}

impl Default for SolrConfig {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            always_commit: true,
        }
    }
}

impl SolrConfig {
    /// Create a config with a custom request timeout.
    pub fn with_timeout(timeout: Duration) -> Self {
        Self {
            timeout,
            ..Self::default()
        }
    }
}

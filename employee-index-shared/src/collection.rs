//! Collection reference type.

use std::fmt;

/// Identifies one named collection on a search server.
///
/// Immutable once created; a client is built per collection and keeps its
/// `Collection` for its whole lifetime.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Collection {
    name: String,
    base_url: String,
}

impl Collection {
    /// Create a reference to `name` on the server at `base_url`.
    ///
    /// A missing trailing slash on the base URL is tolerated.
    pub fn new(base_url: impl Into<String>, name: impl Into<String>) -> Self {
        let mut base_url = base_url.into();
        if !base_url.ends_with('/') {
            base_url.push('/');
        }
        Self {
            name: name.into(),
            base_url,
        }
    }

    /// The collection name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The server base URL, always ending in `/`.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// The collection endpoint: base URL joined with the collection name.
    pub fn endpoint(&self) -> String {
        format!("{}{}", self.base_url, self.name)
    }
}

impl fmt::Display for Collection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

//! Facet result type.

use serde::Serialize;
use std::collections::BTreeMap;

/// Server-computed occurrence counts keyed by field value.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct FacetCounts(BTreeMap<String, u64>);

impl FacetCounts {
    /// Create an empty facet result.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record `count` occurrences of `value`, adding to any existing count.
    pub fn add(&mut self, value: impl Into<String>, count: u64) {
        *self.0.entry(value.into()).or_insert(0) += count;
    }

    /// Count for a single value, if present.
    pub fn get(&self, value: &str) -> Option<u64> {
        self.0.get(value).copied()
    }

    /// Sum of all counts.
    pub fn total(&self) -> u64 {
        self.0.values().sum()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterate values and counts in value order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, u64)> {
        self.0.iter().map(|(k, v)| (k.as_str(), *v))
    }

    /// Distinct values in value order.
    pub fn values(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }
}

impl FromIterator<(String, u64)> for FacetCounts {
    fn from_iter<I: IntoIterator<Item = (String, u64)>>(iter: I) -> Self {
        let mut counts = Self::new();
        for (value, count) in iter {
            counts.add(value, count);
        }
        counts
    }
}

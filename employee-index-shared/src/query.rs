//! Search query and response types.

use std::collections::BTreeMap;

use crate::facet::FacetCounts;
use crate::record::EmployeeRecord;

/// Default number of rows requested per query page.
pub const DEFAULT_ROWS: usize = 10;

/// Which records a query selects.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QueryFilter {
    /// Every record in the collection.
    All,
    /// Records whose `field` equals `value` exactly.
    FieldEquals { field: String, value: String },
}

impl QueryFilter {
    /// Whether `record` is selected by this filter.
    pub fn matches(&self, record: &EmployeeRecord) -> bool {
        match self {
            QueryFilter::All => true,
            QueryFilter::FieldEquals { field, value } => {
                record.get_text(field).as_deref() == Some(value.as_str())
            }
        }
    }
}

/// A query against one collection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchQuery {
    pub filter: QueryFilter,
    /// Offset of the first row returned.
    pub start: usize,
    /// Maximum number of rows returned. Zero asks for the count only.
    pub rows: usize,
    /// Fields to compute facet counts on.
    pub facet_fields: Vec<String>,
}

impl SearchQuery {
    /// Match-all query.
    pub fn all() -> Self {
        Self::new(QueryFilter::All)
    }

    /// Exact-match query on a single field.
    pub fn field_equals(field: impl Into<String>, value: impl Into<String>) -> Self {
        Self::new(QueryFilter::FieldEquals {
            field: field.into(),
            value: value.into(),
        })
    }

    fn new(filter: QueryFilter) -> Self {
        Self {
            filter,
            start: 0,
            rows: DEFAULT_ROWS,
            facet_fields: Vec::new(),
        }
    }

    pub fn with_start(mut self, start: usize) -> Self {
        self.start = start;
        self
    }

    pub fn with_rows(mut self, rows: usize) -> Self {
        self.rows = rows;
        self
    }

    /// Request facet counts on `field`.
    pub fn with_facet(mut self, field: impl Into<String>) -> Self {
        self.facet_fields.push(field.into());
        self
    }

    pub fn has_facets(&self) -> bool {
        !self.facet_fields.is_empty()
    }
}

/// Result of a query.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SearchResponse {
    /// Total number of records matching the filter, regardless of paging.
    pub num_found: u64,
    /// The page of records returned.
    pub docs: Vec<EmployeeRecord>,
    /// Facet counts keyed by facet field.
    pub facets: BTreeMap<String, FacetCounts>,
}

impl SearchResponse {
    pub fn empty() -> Self {
        Self::default()
    }

    /// Facet counts for `field`, if they were requested and returned.
    pub fn facet(&self, field: &str) -> Option<&FacetCounts> {
        self.facets.get(field)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder() {
        let query = SearchQuery::all()
            .with_rows(0)
            .with_start(5)
            .with_facet("Department");

        assert_eq!(query.filter, QueryFilter::All);
        assert_eq!(query.rows, 0);
        assert_eq!(query.start, 5);
        assert!(query.has_facets());
    }

    #[test]
    fn test_field_equals_matches() {
        let it = EmployeeRecord::new().with_field("Department", "IT");
        let finance = EmployeeRecord::new().with_field("Department", "Finance");
        let none = EmployeeRecord::new();

        let filter = SearchQuery::field_equals("Department", "IT").filter;

        assert!(filter.matches(&it));
        assert!(!filter.matches(&finance));
        assert!(!filter.matches(&none));
        assert!(QueryFilter::All.matches(&none));
    }

    #[test]
    fn test_numeric_field_matches_text() {
        let record = EmployeeRecord::new().with_field("Age", 42);
        assert!(SearchQuery::field_equals("Age", "42").filter.matches(&record));
    }
}

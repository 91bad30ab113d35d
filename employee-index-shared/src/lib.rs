//! # Employee Index Shared
//!
//! Plain data types passed between the CSV loader, the search engine client
//! and the operations layer.

mod collection;
mod facet;
mod query;
mod record;

pub use collection::Collection;
pub use facet::FacetCounts;
pub use query::{QueryFilter, SearchQuery, SearchResponse};
pub use record::EmployeeRecord;

/// Field the department facet is computed on.
pub const DEPARTMENT_FIELD: &str = "Department";

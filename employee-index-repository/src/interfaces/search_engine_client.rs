//! Search engine client trait definition.
//!
//! This module defines the abstract interface for operations against one
//! collection, allowing for different backend implementations (Solr, mock, etc.).

use async_trait::async_trait;

use crate::errors::SearchError;
use employee_index_shared::{Collection, EmployeeRecord, SearchQuery, SearchResponse};

/// Abstract interface for operations against a single collection.
///
/// A client is bound to one [`Collection`] for its whole lifetime. Callers
/// hold one client per collection and pass it where it is needed.
///
/// # Thread Safety
///
/// All implementations must be `Send + Sync` to allow use across async tasks.
///
/// # Error Handling
///
/// All methods return `Result<T, SearchError>`; deciding whether to log and
/// continue is left to the caller.
#[async_trait]
pub trait SearchEngineClient: Send + Sync {
    /// The collection this client targets.
    fn collection(&self) -> &Collection;

    /// Execute a query against the collection.
    ///
    /// # Arguments
    ///
    /// * `query` - Filter, paging and facet parameters
    ///
    /// # Returns
    ///
    /// * `Ok(SearchResponse)` - The total hit count, the requested page and any facets
    /// * `Err(SearchError)` - If the query fails
    ///
    /// # Example
    ///
    /// ```ignore
    /// let query = SearchQuery::field_equals("Department", "IT");
    /// let response = client.search(&query).await?;
    /// println!("Found {} employees", response.num_found);
    /// ```
    async fn search(&self, query: &SearchQuery) -> Result<SearchResponse, SearchError>;

    /// Add documents in a single batch request.
    ///
    /// Documents whose unique key already exists are replaced.
    ///
    /// # Returns
    ///
    /// * `Ok(())` - If the batch was accepted (and committed, when configured)
    /// * `Err(SearchError)` - If the request fails
    async fn add_documents(&self, documents: &[EmployeeRecord]) -> Result<(), SearchError>;

    /// Delete the document whose unique key equals `id`.
    ///
    /// Deleting an id that does not exist is not an error.
    async fn delete_by_id(&self, id: &str) -> Result<(), SearchError>;

    /// Check if the collection is reachable and healthy.
    ///
    /// # Returns
    ///
    /// * `Ok(true)` - If the collection answered the health check
    /// * `Ok(false)` - If it answered but reported itself unhealthy
    /// * `Err(SearchError)` - If the health check could not be executed
    async fn ping(&self) -> Result<bool, SearchError>;
}

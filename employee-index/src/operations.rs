//! Employee index operations.
//!
//! Each operation runs against the collection of the injected client and
//! returns a `Result`. Callers that want the lenient behaviour (log and carry
//! on with an empty value) use [`OrLogDefault`](crate::report::OrLogDefault).

use std::sync::Arc;
use tracing::{debug, info, instrument};

use crate::IndexingError;
use employee_index_ingest::CsvLoader;
use employee_index_repository::SearchEngineClient;
use employee_index_shared::{
    Collection, EmployeeRecord, FacetCounts, SearchQuery, DEPARTMENT_FIELD,
};

/// Default number of rows fetched per search page.
const DEFAULT_PAGE_SIZE: usize = 100;

/// Outcome of [`EmployeeIndex::index_data`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IndexSummary {
    pub collection: String,
    /// Records submitted in the batch add.
    pub indexed: usize,
    /// Rows of the file that were left out.
    pub skipped: usize,
    /// The column that was dropped, if it was present in the file.
    pub excluded_column: Option<String>,
}

/// Operations against one collection.
pub struct EmployeeIndex {
    client: Arc<dyn SearchEngineClient>,
    loader: CsvLoader,
    page_size: usize,
}

impl EmployeeIndex {
    /// Create a handle over `client`, reading employees with `loader`.
    pub fn new(client: Arc<dyn SearchEngineClient>, loader: CsvLoader) -> Self {
        Self {
            client,
            loader,
            page_size: DEFAULT_PAGE_SIZE,
        }
    }

    /// Set the number of rows fetched per search page.
    pub fn with_page_size(mut self, page_size: usize) -> Self {
        self.page_size = page_size.max(1);
        self
    }

    pub fn collection(&self) -> &Collection {
        self.client.collection()
    }

    /// Load the dataset, drop `exclude_column` if present, and add every
    /// valid row to the collection in one committed batch.
    #[instrument(skip(self), fields(collection = %self.collection()))]
    pub async fn index_data(
        &self,
        exclude_column: Option<&str>,
    ) -> Result<IndexSummary, IndexingError> {
        let dataset = self.loader.load(exclude_column)?;

        self.client.add_documents(&dataset.records).await?;

        let summary = IndexSummary {
            collection: self.collection().name().to_string(),
            indexed: dataset.records.len(),
            skipped: dataset.skipped.len(),
            excluded_column: dataset.excluded_column,
        };
        info!(
            indexed = summary.indexed,
            skipped = summary.skipped,
            "Data indexed"
        );
        Ok(summary)
    }

    /// All records whose `field` equals `value` exactly.
    ///
    /// Pages through the whole result set, so the returned list is complete.
    #[instrument(skip(self), fields(collection = %self.collection()))]
    pub async fn search_by_column(
        &self,
        field: &str,
        value: &str,
    ) -> Result<Vec<EmployeeRecord>, IndexingError> {
        let mut records = Vec::new();

        loop {
            let query = SearchQuery::field_equals(field, value)
                .with_start(records.len())
                .with_rows(self.page_size);
            let response = self.client.search(&query).await?;

            let page_len = response.docs.len();
            records.extend(response.docs);

            if page_len == 0 || records.len() as u64 >= response.num_found {
                break;
            }
        }

        debug!(matches = records.len(), "Search completed");
        Ok(records)
    }

    /// Number of records in the collection.
    #[instrument(skip(self), fields(collection = %self.collection()))]
    pub async fn get_emp_count(&self) -> Result<u64, IndexingError> {
        let response = self.client.search(&SearchQuery::all().with_rows(0)).await?;
        Ok(response.num_found)
    }

    /// Delete the employee whose identifier is `id`, committing immediately.
    #[instrument(skip(self), fields(collection = %self.collection()))]
    pub async fn del_emp_by_id(&self, id: &str) -> Result<(), IndexingError> {
        self.client.delete_by_id(id).await?;
        info!(id = %id, "Employee deleted");
        Ok(())
    }

    /// Record counts per department across the whole collection.
    ///
    /// Records with an empty department cell were indexed without the field,
    /// so they are not counted under any key and the counts then sum to less
    /// than [`get_emp_count`](Self::get_emp_count).
    pub async fn get_dep_facet(&self) -> Result<FacetCounts, IndexingError> {
        self.get_facet(DEPARTMENT_FIELD).await
    }

    /// Record counts per distinct value of `field` across the whole collection.
    #[instrument(skip(self), fields(collection = %self.collection()))]
    pub async fn get_facet(&self, field: &str) -> Result<FacetCounts, IndexingError> {
        let query = SearchQuery::all().with_rows(0).with_facet(field);
        let mut response = self.client.search(&query).await?;

        Ok(response.facets.remove(field).unwrap_or_default())
    }

    /// Whether the collection answers its health check.
    pub async fn ping(&self) -> Result<bool, IndexingError> {
        Ok(self.client.ping().await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::InMemoryClient;
    use std::io::Write;
    use std::sync::atomic::Ordering;
    use tempfile::NamedTempFile;

    const EMPLOYEES: &str = "\
EEID,Full Name,Department,Gender,Age
E02001,Ada Lovelace,IT,Female,36
E02002,Alan Turing,IT,Male,41
E02003,Grace Hopper,Finance,Female,85
E02004,Edsger Dijkstra,Engineering,Male,72
E02005,Barbara Liskov,IT,Female,84
";

    fn csv_file(contents: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file.flush().unwrap();
        file
    }

    fn index_over(client: Arc<InMemoryClient>, file: &NamedTempFile) -> EmployeeIndex {
        EmployeeIndex::new(client, CsvLoader::new(file.path()))
    }

    #[tokio::test]
    async fn test_index_data_excludes_column() {
        let file = csv_file(EMPLOYEES);
        let client = Arc::new(InMemoryClient::new("Pressnave"));
        let index = index_over(client.clone(), &file);

        let summary = index.index_data(Some("Department")).await.unwrap();

        assert_eq!(summary.indexed, 5);
        assert_eq!(summary.skipped, 0);
        assert_eq!(summary.excluded_column.as_deref(), Some("Department"));

        let submitted = client.submitted.lock().await;
        assert_eq!(submitted.len(), 1);
        assert_eq!(submitted[0].len(), 5);
        assert!(submitted[0].iter().all(|r| !r.contains_field("Department")));
    }

    #[tokio::test]
    async fn test_index_data_skips_malformed_rows() {
        let contents = format!("{}E02006,Too,Many,Fields,Here,!\nE02007,Ken Thompson,IT,Male,81\n", EMPLOYEES);
        let file = csv_file(&contents);
        let client = Arc::new(InMemoryClient::new("Pressnave"));
        let index = index_over(client.clone(), &file);

        let summary = index.index_data(None).await.unwrap();

        assert_eq!(summary.indexed, 6);
        assert_eq!(summary.skipped, 1);
        assert_eq!(index.get_emp_count().await.unwrap(), 6);
    }

    #[tokio::test]
    async fn test_index_data_missing_file() {
        let client = Arc::new(InMemoryClient::new("Pressnave"));
        let index = EmployeeIndex::new(client.clone(), CsvLoader::new("/nonexistent/employees.csv"));

        let result = index.index_data(Some("Gender")).await;

        assert!(matches!(result, Err(IndexingError::IngestError(_))));
        assert!(client.submitted.lock().await.is_empty());
    }

    #[tokio::test]
    async fn test_index_data_submission_failure() {
        let file = csv_file(EMPLOYEES);
        let index = index_over(Arc::new(InMemoryClient::failing("3545")), &file);

        let result = index.index_data(Some("Gender")).await;
        assert!(matches!(result, Err(IndexingError::SearchError(_))));
    }

    #[tokio::test]
    async fn test_count_empty_collection() {
        let file = csv_file(EMPLOYEES);
        let index = index_over(Arc::new(InMemoryClient::new("3545")), &file);

        assert_eq!(index.get_emp_count().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_delete_removes_from_count() {
        let file = csv_file(EMPLOYEES);
        let index = index_over(Arc::new(InMemoryClient::new("Pressnave")), &file);

        index.index_data(Some("Department")).await.unwrap();
        assert_eq!(index.get_emp_count().await.unwrap(), 5);

        index.del_emp_by_id("E02003").await.unwrap();
        assert_eq!(index.get_emp_count().await.unwrap(), 4);
        assert!(index
            .search_by_column("EEID", "E02003")
            .await
            .unwrap()
            .is_empty());
    }

    #[tokio::test]
    async fn test_search_returns_only_matches() {
        let file = csv_file(EMPLOYEES);
        let index = index_over(Arc::new(InMemoryClient::new("3545")), &file);
        index.index_data(Some("Gender")).await.unwrap();

        let results = index.search_by_column("Department", "IT").await.unwrap();

        assert_eq!(results.len(), 3);
        assert!(results
            .iter()
            .all(|r| r.get_text("Department").as_deref() == Some("IT")));
    }

    #[tokio::test]
    async fn test_search_pages_through_results() {
        let file = csv_file(EMPLOYEES);
        let client = Arc::new(InMemoryClient::new("3545"));
        let index = index_over(client.clone(), &file).with_page_size(2);
        index.index_data(None).await.unwrap();

        let results = index.search_by_column("Department", "IT").await.unwrap();

        assert_eq!(results.len(), 3);
        // two pages of two rows, the second one partial
        assert_eq!(client.search_calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_search_on_excluded_field_is_empty() {
        let file = csv_file(EMPLOYEES);
        let index = index_over(Arc::new(InMemoryClient::new("Pressnave")), &file);
        index.index_data(Some("Department")).await.unwrap();

        assert!(index
            .search_by_column("Department", "IT")
            .await
            .unwrap()
            .is_empty());
    }

    #[tokio::test]
    async fn test_department_facet_sums_to_count() {
        let file = csv_file(EMPLOYEES);
        let index = index_over(Arc::new(InMemoryClient::new("3545")), &file);
        index.index_data(Some("Gender")).await.unwrap();

        let facet = index.get_dep_facet().await.unwrap();
        let count = index.get_emp_count().await.unwrap();

        assert_eq!(
            facet.values().collect::<Vec<_>>(),
            vec!["Engineering", "Finance", "IT"]
        );
        assert_eq!(facet.get("IT"), Some(3));
        assert_eq!(facet.total(), count);
    }

    #[tokio::test]
    async fn test_department_facet_skips_empty_department() {
        let file = csv_file(
            "EEID,Full Name,Department\nE1,Ada Lovelace,IT\nE2,Alan Turing,\nE3,Grace Hopper,IT\n",
        );
        let index = index_over(Arc::new(InMemoryClient::new("3545")), &file);
        index.index_data(None).await.unwrap();

        let facet = index.get_dep_facet().await.unwrap();

        assert_eq!(facet.len(), 1);
        assert_eq!(facet.get("IT"), Some(2));
        assert_eq!(facet.total(), 2);
        assert_eq!(index.get_emp_count().await.unwrap(), 3);
    }

    #[tokio::test]
    async fn test_failures_propagate_as_errors() {
        let file = csv_file(EMPLOYEES);
        let index = index_over(Arc::new(InMemoryClient::failing("3545")), &file);

        assert!(index.get_emp_count().await.is_err());
        assert!(index.search_by_column("Department", "IT").await.is_err());
        assert!(index.del_emp_by_id("E02003").await.is_err());
        assert!(index.get_dep_facet().await.is_err());
    }
}

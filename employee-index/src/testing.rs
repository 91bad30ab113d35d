//! In-memory search engine client for tests.

use async_trait::async_trait;
use std::sync::atomic::{AtomicUsize, Ordering};
use tokio::sync::Mutex;

use employee_index_repository::{SearchEngineClient, SearchError};
use employee_index_shared::{Collection, EmployeeRecord, FacetCounts, SearchQuery, SearchResponse};

const UNIQUE_KEY: &str = "id";

/// Mock collection that keeps documents in memory and answers queries the
/// way the server would.
pub(crate) struct InMemoryClient {
    collection: Collection,
    docs: Mutex<Vec<EmployeeRecord>>,
    /// Every batch passed to `add_documents`, in call order.
    pub submitted: Mutex<Vec<Vec<EmployeeRecord>>>,
    pub search_calls: AtomicUsize,
    should_fail: bool,
}

impl InMemoryClient {
    pub fn new(name: &str) -> Self {
        Self {
            collection: Collection::new("http://localhost:8983/solr/", name),
            docs: Mutex::new(Vec::new()),
            submitted: Mutex::new(Vec::new()),
            search_calls: AtomicUsize::new(0),
            should_fail: false,
        }
    }

    /// A client whose every call fails with a connection error.
    pub fn failing(name: &str) -> Self {
        Self {
            should_fail: true,
            ..Self::new(name)
        }
    }

    fn check(&self) -> Result<(), SearchError> {
        if self.should_fail {
            return Err(SearchError::connection("Mock failure"));
        }
        Ok(())
    }
}

#[async_trait]
impl SearchEngineClient for InMemoryClient {
    fn collection(&self) -> &Collection {
        &self.collection
    }

    async fn search(&self, query: &SearchQuery) -> Result<SearchResponse, SearchError> {
        self.search_calls.fetch_add(1, Ordering::SeqCst);
        self.check()?;

        let docs = self.docs.lock().await;
        let matching: Vec<&EmployeeRecord> =
            docs.iter().filter(|d| query.filter.matches(d)).collect();

        let mut response = SearchResponse {
            num_found: matching.len() as u64,
            docs: matching
                .iter()
                .skip(query.start)
                .take(query.rows)
                .map(|d| (*d).clone())
                .collect(),
            ..SearchResponse::empty()
        };

        for field in &query.facet_fields {
            let counts: FacetCounts = matching
                .iter()
                .filter_map(|d| d.get_text(field))
                .map(|value| (value, 1))
                .collect();
            response.facets.insert(field.clone(), counts);
        }

        Ok(response)
    }

    async fn add_documents(&self, documents: &[EmployeeRecord]) -> Result<(), SearchError> {
        self.check()?;
        self.submitted.lock().await.push(documents.to_vec());

        let mut docs = self.docs.lock().await;
        for doc in documents {
            let key = doc.get_text(UNIQUE_KEY);
            docs.retain(|d| key.is_none() || d.get_text(UNIQUE_KEY) != key);
            docs.push(doc.clone());
        }
        Ok(())
    }

    async fn delete_by_id(&self, id: &str) -> Result<(), SearchError> {
        self.check()?;
        self.docs
            .lock()
            .await
            .retain(|d| d.get_text(UNIQUE_KEY).as_deref() != Some(id));
        Ok(())
    }

    async fn ping(&self) -> Result<bool, SearchError> {
        self.check()?;
        Ok(true)
    }
}

//! Solr client implementation.
//!
//! This module provides the concrete implementation of `SearchEngineClient`
//! on top of Solr's JSON request handlers, using `reqwest`.

use async_trait::async_trait;
use reqwest::{Client, Response};
use serde::Serialize;
use tracing::{debug, error, info, instrument, warn};
use url::Url;

use crate::config::SolrConfig;
use crate::errors::SearchError;
use crate::interfaces::SearchEngineClient;
use crate::solr::queries::{build_delete_body, build_select_params, build_update_params};
use crate::solr::response::{error_message, PingBody, SelectBody, UpdateBody};
use employee_index_shared::{Collection, EmployeeRecord, SearchQuery, SearchResponse};

/// Solr client bound to a single collection.
///
/// # Example
///
/// ```ignore
/// let collection = Collection::new("http://localhost:8983/solr/", "Pressnave");
/// let client = SolrClient::new(collection, SolrConfig::default())?;
///
/// let count = client.search(&SearchQuery::all().with_rows(0)).await?.num_found;
/// client.delete_by_id("E02003").await?;
/// ```
pub struct SolrClient {
    http: Client,
    collection: Collection,
    endpoint: Url,
    config: SolrConfig,
}

impl SolrClient {
    /// Create a new Solr client for the given collection.
    ///
    /// # Returns
    ///
    /// * `Ok(SolrClient)` - A new client instance
    /// * `Err(SearchError)` - If the endpoint URL is invalid or the HTTP client cannot be built
    pub fn new(collection: Collection, config: SolrConfig) -> Result<Self, SearchError> {
        let endpoint = Url::parse(&collection.endpoint()).map_err(|e| {
            SearchError::connection(format!(
                "Invalid Solr URL {}: {}",
                collection.endpoint(),
                e
            ))
        })?;

        let http = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| SearchError::connection(e.to_string()))?;

        info!(
            endpoint = %endpoint,
            always_commit = config.always_commit,
            "Created Solr client"
        );

        Ok(Self {
            http,
            collection,
            endpoint,
            config,
        })
    }

    /// URL of a request handler under the collection endpoint.
    fn handler_url(&self, handler: &str) -> String {
        format!("{}/{}", self.endpoint.as_str().trim_end_matches('/'), handler)
    }

    /// Send an update request and check both the HTTP and the Solr status.
    async fn post_update<B: Serialize + ?Sized>(
        &self,
        body: &B,
        on_failure: fn(String) -> SearchError,
    ) -> Result<(), SearchError> {
        let response = self
            .http
            .post(self.handler_url("update"))
            .query(&build_update_params(self.config.always_commit))
            .json(body)
            .send()
            .await
            .map_err(|e| on_failure(e.to_string()))?;

        let text = Self::checked_text(response).await?;
        let parsed: UpdateBody = serde_json::from_str(&text)?;
        if parsed.status() != 0 {
            return Err(on_failure(format!(
                "Solr reported update status {}",
                parsed.status()
            )));
        }

        Ok(())
    }

    /// Read the response body, turning non-success statuses into errors.
    async fn checked_text(response: Response) -> Result<String, SearchError> {
        let status = response.status();
        let text = response.text().await?;

        if !status.is_success() {
            let message = error_message(&text);
            error!(status = %status, body = %message, "Solr request failed");
            return Err(SearchError::status(status.as_u16(), message));
        }

        Ok(text)
    }
}

#[async_trait]
impl SearchEngineClient for SolrClient {
    fn collection(&self) -> &Collection {
        &self.collection
    }

    #[instrument(skip(self, query), fields(collection = %self.collection))]
    async fn search(&self, query: &SearchQuery) -> Result<SearchResponse, SearchError> {
        let response = self
            .http
            .get(self.handler_url("select"))
            .query(&build_select_params(query))
            .send()
            .await
            .map_err(|e| SearchError::query(e.to_string()))?;

        let text = Self::checked_text(response).await?;
        let parsed: SelectBody = serde_json::from_str(&text)?;
        let result = parsed.into_search_response()?;

        debug!(
            num_found = result.num_found,
            returned = result.docs.len(),
            "Query completed"
        );
        Ok(result)
    }

    #[instrument(skip(self, documents), fields(collection = %self.collection, count = documents.len()))]
    async fn add_documents(&self, documents: &[EmployeeRecord]) -> Result<(), SearchError> {
        if documents.is_empty() {
            debug!("No documents to add");
            return Ok(());
        }

        self.post_update(documents, SearchError::IndexError).await?;

        debug!("Documents added");
        Ok(())
    }

    #[instrument(skip(self), fields(collection = %self.collection))]
    async fn delete_by_id(&self, id: &str) -> Result<(), SearchError> {
        if id.is_empty() {
            return Err(SearchError::invalid_query("id must not be empty"));
        }

        self.post_update(&build_delete_body(id), SearchError::DeleteError)
            .await?;

        debug!(id = %id, "Document deleted");
        Ok(())
    }

    async fn ping(&self) -> Result<bool, SearchError> {
        let response = self
            .http
            .get(self.handler_url("admin/ping"))
            .query(&[("wt", "json")])
            .send()
            .await
            .map_err(|e| SearchError::connection(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            warn!(collection = %self.collection, status = %status, "Ping failed");
            return Ok(false);
        }

        let body: PingBody = response.json().await?;
        Ok(body.is_ok())
    }
}

//! Dependency initialization and wiring for the employee index.

use std::sync::Arc;
use tracing::{info, warn};

use crate::config::Settings;
use crate::operations::EmployeeIndex;
use crate::IndexingError;
use employee_index_ingest::CsvLoader;
use employee_index_repository::SolrClient;
use employee_index_shared::Collection;

/// Container for the initialized, shared dependencies.
///
/// One `EmployeeIndex` is built per collection; they share the loader and the
/// settings but nothing else.
pub struct Dependencies {
    settings: Settings,
    loader: CsvLoader,
}

impl Dependencies {
    /// Initialize dependencies from settings.
    pub fn new(settings: Settings) -> Self {
        info!(
            solr_url = %settings.solr_url,
            csv_path = %settings.csv_path.display(),
            id_column = %settings.id_column,
            "Initializing dependencies"
        );

        let loader = CsvLoader::with_config(&settings.csv_path, settings.loader_config());

        Self { settings, loader }
    }

    /// Build the operations handle for one collection.
    ///
    /// # Returns
    ///
    /// * `Ok(EmployeeIndex)` - A handle bound to the collection
    /// * `Err(IndexingError)` - If the Solr client cannot be created
    pub fn employee_index(&self, collection_name: &str) -> Result<EmployeeIndex, IndexingError> {
        let collection = Collection::new(&self.settings.solr_url, collection_name);
        let client = SolrClient::new(collection, self.settings.solr_config()).map_err(|e| {
            IndexingError::config(format!(
                "Failed to create Solr client for {}: {}",
                collection_name, e
            ))
        })?;

        Ok(EmployeeIndex::new(Arc::new(client), self.loader.clone())
            .with_page_size(self.settings.page_size))
    }

    /// Verify a collection is reachable. Failures are logged, never fatal.
    pub async fn check_health(index: &EmployeeIndex) -> bool {
        match index.ping().await {
            Ok(true) => {
                info!(collection = %index.collection(), "Solr collection reachable");
                true
            }
            Ok(false) => {
                warn!(collection = %index.collection(), "Solr collection reported unhealthy");
                false
            }
            Err(e) => {
                warn!(collection = %index.collection(), error = %e, "Solr health check failed");
                false
            }
        }
    }
}

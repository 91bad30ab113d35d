//! Settings read from the environment.

use std::env;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use crate::IndexingError;
use employee_index_ingest::loader::{DEFAULT_ID_COLUMN, DEFAULT_UNIQUE_KEY};
use employee_index_ingest::LoaderConfig;
use employee_index_repository::config::DEFAULT_TIMEOUT_SECS;
use employee_index_repository::SolrConfig;

/// Default Solr base URL.
const DEFAULT_SOLR_URL: &str = "http://localhost:8983/solr/";

/// Default location of the employee CSV file.
const DEFAULT_CSV_PATH: &str = "employee_sample_data.csv";

/// Default number of rows fetched per search page.
const DEFAULT_PAGE_SIZE: usize = 100;

/// Runtime settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub solr_url: String,
    pub csv_path: PathBuf,
    pub id_column: String,
    pub unique_key: String,
    pub timeout_secs: u64,
    pub page_size: usize,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            solr_url: DEFAULT_SOLR_URL.to_string(),
            csv_path: PathBuf::from(DEFAULT_CSV_PATH),
            id_column: DEFAULT_ID_COLUMN.to_string(),
            unique_key: DEFAULT_UNIQUE_KEY.to_string(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            page_size: DEFAULT_PAGE_SIZE,
        }
    }
}

impl Settings {
    /// Read settings from environment variables.
    ///
    /// # Environment Variables
    ///
    /// - `SOLR_URL`: Solr base URL (default: http://localhost:8983/solr/)
    /// - `EMPLOYEE_CSV_PATH`: employee CSV file (default: employee_sample_data.csv)
    /// - `EMPLOYEE_ID_COLUMN`: identifier column (default: EEID)
    /// - `SOLR_UNIQUE_KEY`: collection unique key field (default: id)
    /// - `SOLR_TIMEOUT_SECS`: request timeout (default: 60)
    /// - `SOLR_PAGE_SIZE`: rows per search page (default: 100)
    pub fn from_env() -> Result<Self, IndexingError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build settings from an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, IndexingError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let page_size = parse_or("SOLR_PAGE_SIZE", &lookup, defaults.page_size)?;
        if page_size == 0 {
            return Err(IndexingError::config("SOLR_PAGE_SIZE must be at least 1"));
        }

        Ok(Self {
            solr_url: lookup("SOLR_URL").unwrap_or(defaults.solr_url),
            csv_path: lookup("EMPLOYEE_CSV_PATH")
                .map(PathBuf::from)
                .unwrap_or(defaults.csv_path),
            id_column: lookup("EMPLOYEE_ID_COLUMN").unwrap_or(defaults.id_column),
            unique_key: lookup("SOLR_UNIQUE_KEY").unwrap_or(defaults.unique_key),
            timeout_secs: parse_or("SOLR_TIMEOUT_SECS", &lookup, defaults.timeout_secs)?,
            page_size,
        })
    }

    /// Apply command-line overrides.
    pub fn with_overrides(mut self, solr_url: Option<String>, csv_path: Option<PathBuf>) -> Self {
        if let Some(url) = solr_url {
            self.solr_url = url;
        }
        if let Some(path) = csv_path {
            self.csv_path = path;
        }
        self
    }

    pub fn solr_config(&self) -> SolrConfig {
        SolrConfig::with_timeout(Duration::from_secs(self.timeout_secs))
    }

    pub fn loader_config(&self) -> LoaderConfig {
        LoaderConfig {
            id_column: self.id_column.clone(),
            unique_key: self.unique_key.clone(),
        }
    }
}

fn parse_or<T, F>(key: &str, lookup: &F, default: T) -> Result<T, IndexingError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
    F: Fn(&str) -> Option<String>,
{
    match lookup(key) {
        Some(raw) => raw
            .trim()
            .parse()
            .map_err(|e| IndexingError::config(format!("Invalid {} '{}': {}", key, raw, e))),
        None => Ok(default),
    }
}

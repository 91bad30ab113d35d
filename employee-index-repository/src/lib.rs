//! # Employee Index Repository
//!
//! This crate provides the trait and implementation for talking to the
//! search engine. It includes the error type, the client configuration, and a
//! concrete implementation for Apache Solr over HTTP.

pub mod config;
pub mod errors;
pub mod interfaces;
pub mod solr;

pub use config::SolrConfig;
pub use errors::SearchError;
pub use interfaces::SearchEngineClient;
pub use solr::SolrClient;

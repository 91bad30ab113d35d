//! Solr implementation of the search engine client.
//!
//! This module provides a concrete implementation of `SearchEngineClient`
//! using Solr's JSON HTTP API as the backend.

mod client;
mod queries;
mod response;

pub use client::SolrClient;

//! OpenSearch implementation of the search backend client.
//!
//! This module provides a concrete implementation of `SearchBackendClient`
//! using OpenSearch as the backend.

mod client;
mod index_config;
mod queries;

pub use client::OpenSearchClient;
pub use index_config::get_index_settings;
pub use queries::{build_query_clause, build_search_body};

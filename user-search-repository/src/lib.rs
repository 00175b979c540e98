//! # User Search Repository
//!
//! This crate provides the backend capability used to index and query user
//! documents, the typed query builder, and a concrete implementation for
//! OpenSearch.

pub mod config;
pub mod errors;
pub mod interfaces;
pub mod opensearch;
pub mod query_builder;

pub use config::SearchConfig;
pub use errors::SearchError;
pub use interfaces::SearchBackendClient;
pub use opensearch::OpenSearchClient;
pub use query_builder::{MatchOptions, QueryBuilder};

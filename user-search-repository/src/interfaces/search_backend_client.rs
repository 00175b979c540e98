//! Search backend client trait definition.
//!
//! This module defines the abstract interface for search backend operations,
//! allowing for different backend implementations (OpenSearch, Elasticsearch,
//! in-memory fakes for tests).

use async_trait::async_trait;

use crate::errors::SearchError;
use user_search_shared::{Ack, SearchRequest, SearchResponse, User, UserUpdate};

/// Abstract interface for search backend operations.
///
/// Implementations are injected as `Arc<dyn SearchBackendClient>` so that the
/// bulk loader and the CLI can be exercised against a fake backend.
///
/// # Thread Safety
///
/// All implementations must be `Send + Sync`. Concurrent calls issue
/// independent requests and share no caller-visible state.
///
/// # Error Handling
///
/// All methods return `Result<T, SearchError>` for consistent error handling.
#[async_trait]
pub trait SearchBackendClient: Send + Sync {
    /// Index a user document, keyed by `user.id`.
    ///
    /// If a document with the same id already exists, it is replaced.
    ///
    /// # Returns
    ///
    /// * `Ok(Ack)` - The backend accepted the write
    /// * `Err(SearchError::Index)` - The backend rejected the document
    /// * `Err(SearchError::Transport)` - The backend could not be reached
    async fn index(&self, collection: &str, user: &User) -> Result<Ack, SearchError>;

    /// Merge the present fields of `update` into an existing document.
    ///
    /// # Returns
    ///
    /// * `Ok(Ack)` - If the document was updated (or the update was empty)
    /// * `Err(SearchError::NotFound)` - If no document with `id` exists
    /// * `Err(SearchError)` - If the update fails for another reason
    async fn update(
        &self,
        collection: &str,
        id: u64,
        update: &UserUpdate,
    ) -> Result<Ack, SearchError>;

    /// Delete a document.
    ///
    /// # Returns
    ///
    /// * `Ok(Ack)` - If the document was deleted
    /// * `Err(SearchError::NotFound)` - If no document with `id` exists
    async fn delete(&self, collection: &str, id: u64) -> Result<Ack, SearchError>;

    /// Execute a search request.
    ///
    /// # Example
    ///
    /// ```ignore
    /// let request = QueryBuilder::default().prefix_query("name", "da", Page::default());
    /// let response = client.search(&request).await?;
    /// println!("Found {} results", response.total);
    /// ```
    async fn search(&self, request: &SearchRequest) -> Result<SearchResponse, SearchError>;

    /// Check whether a collection exists.
    async fn collection_exists(&self, collection: &str) -> Result<bool, SearchError>;

    /// Ensure the collection exists with the user mappings, creating it if
    /// needed.
    ///
    /// This should be called before seeding data.
    async fn ensure_collection(&self, collection: &str) -> Result<(), SearchError>;

    /// Check if the backend is healthy and reachable.
    ///
    /// # Returns
    ///
    /// * `Ok(true)` - If the backend is healthy
    /// * `Ok(false)` - If the backend is reachable but unhealthy
    /// * `Err(SearchError)` - If the health check fails to execute
    async fn health_check(&self) -> Result<bool, SearchError>;
}

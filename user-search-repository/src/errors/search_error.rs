//! Search error types.
//!
//! This module defines the error types that can occur while talking to the
//! search backend.

use thiserror::Error;

/// Errors that can occur during search backend operations.
#[derive(Debug, Clone, Error)]
pub enum SearchError {
    /// The backend could not be reached, or the connection failed mid-request.
    #[error("Transport error: {0}")]
    Transport(String),

    /// The backend rejected a write (mapping conflict, malformed document, ...).
    #[error("Index error: {0}")]
    Index(String),

    /// An update or delete referenced a document that does not exist.
    #[error("Document not found: {0}")]
    NotFound(String),

    /// The backend rejected a search request.
    #[error("Query error: {0}")]
    Query(String),

    /// Failed to parse a response from the backend.
    #[error("Parse error: {0}")]
    Parse(String),

    /// Failed to serialize data for the backend.
    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl SearchError {
    /// Create a transport error.
    pub fn transport(msg: impl Into<String>) -> Self {
        Self::Transport(msg.into())
    }

    /// Create an index error.
    pub fn index(msg: impl Into<String>) -> Self {
        Self::Index(msg.into())
    }

    /// Create a document not found error.
    pub fn not_found(collection: &str, id: u64) -> Self {
        Self::NotFound(format!("collection={}, id={}", collection, id))
    }

    /// Create a query error.
    pub fn query(msg: impl Into<String>) -> Self {
        Self::Query(msg.into())
    }

    /// Create a parse error.
    pub fn parse(msg: impl Into<String>) -> Self {
        Self::Parse(msg.into())
    }

    /// Create a serialization error.
    pub fn serialization(msg: impl Into<String>) -> Self {
        Self::Serialization(msg.into())
    }

    /// Whether this error means the request never got a usable answer.
    pub fn is_transport(&self) -> bool {
        matches!(self, Self::Transport(_))
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound(_))
    }
}

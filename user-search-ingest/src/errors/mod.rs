//! Error types for the user search ingest.

use thiserror::Error;
use user_search_repository::SearchError;

/// Errors that abort a whole bulk load.
///
/// Individual record failures are never reported here; they are returned in
/// the record's own result slot.
#[derive(Error, Debug)]
pub enum BatchError {
    /// The target collection name can never be valid, so nothing was submitted.
    #[error("Invalid collection name '{0}'")]
    InvalidCollection(String),

    /// Every submission failed at the transport level.
    #[error("Backend unreachable: all {attempted} submissions failed, last error: {last_error}")]
    BackendUnreachable {
        attempted: usize,
        last_error: SearchError,
    },
}

impl BatchError {
    /// Create an invalid collection error.
    pub fn invalid_collection(name: impl Into<String>) -> Self {
        Self::InvalidCollection(name.into())
    }

    /// Create a backend unreachable error.
    pub fn backend_unreachable(attempted: usize, last_error: SearchError) -> Self {
        Self::BackendUnreachable {
            attempted,
            last_error,
        }
    }
}

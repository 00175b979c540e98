//! Configuration types for the search backend client.

use std::time::Duration;

/// Default search backend URL.
pub const DEFAULT_URL: &str = "http://localhost:9200";

/// Default collection (index) holding user documents.
pub const DEFAULT_COLLECTION: &str = "user";

/// Configuration for connecting to the search backend.
#[derive(Debug, Clone)]
pub struct SearchConfig {
    /// Backend server URL.
    pub url: String,
    /// Collection that user documents are written to and searched in.
    pub collection: String,
    /// Per-request timeout enforced by the transport.
    /// Set to None to wait indefinitely (not recommended for production).
    pub request_timeout: Option<Duration>,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            url: DEFAULT_URL.to_string(),
            collection: DEFAULT_COLLECTION.to_string(),
            request_timeout: None,
        }
    }
}

impl SearchConfig {
    /// Create a config pointing at the given URL.
    pub fn with_url(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            ..Default::default()
        }
    }

    /// Set the collection name.
    pub fn collection(mut self, collection: impl Into<String>) -> Self {
        self.collection = collection.into();
        self
    }

    /// Set the per-request timeout.
    pub fn request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = Some(timeout);
        self
    }
}

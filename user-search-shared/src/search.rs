//! Search request and response shapes.

use serde::{Deserialize, Serialize};

use crate::query::Query;
use crate::user::User;

/// Offset used when a page does not specify one.
pub const DEFAULT_OFFSET: u64 = 0;

/// Limit used when a page does not specify one.
pub const DEFAULT_LIMIT: u64 = 100;

/// Pagination descriptor. Unset fields fall back to `DEFAULT_OFFSET` and
/// `DEFAULT_LIMIT`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Page {
    pub offset: Option<u64>,
    pub limit: Option<u64>,
}

impl Page {
    pub fn new(offset: u64, limit: u64) -> Self {
        Self {
            offset: Some(offset),
            limit: Some(limit),
        }
    }

    pub fn with_offset(mut self, offset: u64) -> Self {
        self.offset = Some(offset);
        self
    }

    pub fn with_limit(mut self, limit: u64) -> Self {
        self.limit = Some(limit);
        self
    }

    /// Offset with the default applied.
    pub fn resolved_offset(&self) -> u64 {
        self.offset.unwrap_or(DEFAULT_OFFSET)
    }

    /// Limit with the default applied. A limit of 0 is raised to 1.
    pub fn resolved_limit(&self) -> u64 {
        self.limit.unwrap_or(DEFAULT_LIMIT).max(1)
    }
}

/// A search request, ready to be translated by a backend client.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchRequest {
    /// Collection (index) to search.
    pub collection: String,
    /// Number of hits to skip.
    pub from: u64,
    /// Maximum number of hits to return.
    pub size: u64,
    /// Ask the backend for an exact total hit count.
    pub track_total_hits: bool,
    /// The single active query clause.
    pub query: Query,
}

/// A single search hit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchHit {
    /// Backend document id.
    pub id: String,
    /// Relevance score, absent when the backend does not score the query.
    pub score: Option<f64>,
    /// The stored user document.
    pub document: User,
}

/// Result of executing a `SearchRequest`.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct SearchResponse {
    /// Total number of matching documents.
    pub total: u64,
    /// The requested page of hits.
    pub hits: Vec<SearchHit>,
}

impl SearchResponse {
    pub fn empty() -> Self {
        Self::default()
    }

    /// Iterate over the documents of the returned hits.
    pub fn documents(&self) -> impl Iterator<Item = &User> {
        self.hits.iter().map(|hit| &hit.document)
    }
}

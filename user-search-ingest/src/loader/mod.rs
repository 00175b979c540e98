//! Loader module for the user search ingest.
//!
//! Submits user records to the search backend concurrently, one index
//! request per record.

use std::sync::Arc;
use std::time::Duration;

use futures::future::join_all;
use futures::stream::{self, StreamExt};
use tracing::{debug, info, instrument, warn};

use crate::errors::BatchError;
use user_search_repository::{SearchBackendClient, SearchError};
use user_search_shared::{Ack, User};

/// Configuration for the bulk loader.
#[derive(Debug, Clone, Default)]
pub struct LoaderConfig {
    /// Maximum number of index requests in flight at once.
    /// None submits every record before awaiting any response.
    pub max_concurrency: Option<usize>,
    /// Time allowed for a single index request before its slot fails with a
    /// transport error. None waits indefinitely.
    pub request_timeout: Option<Duration>,
}

impl LoaderConfig {
    /// Create a config with no concurrency cap and no timeout.
    pub fn unlimited() -> Self {
        Self::default()
    }

    /// Create a config that caps in-flight requests. A cap of 0 is treated as 1.
    pub fn with_max_concurrency(max_concurrency: usize) -> Self {
        Self {
            max_concurrency: Some(max_concurrency.max(1)),
            request_timeout: None,
        }
    }

    /// Set the per-request timeout.
    pub fn request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = Some(timeout);
        self
    }
}

/// Aggregate counts over the results of a load.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct LoadSummary {
    /// Total number of records submitted.
    pub total: usize,
    /// Number of successful index requests.
    pub succeeded: usize,
    /// Number of failed index requests.
    pub failed: usize,
}

impl LoadSummary {
    pub fn from_results(results: &[Result<Ack, SearchError>]) -> Self {
        let succeeded = results.iter().filter(|r| r.is_ok()).count();
        Self {
            total: results.len(),
            succeeded,
            failed: results.len() - succeeded,
        }
    }
}

/// Loader that indexes user records into the search backend.
///
/// Every record becomes an independent request. A failing record never
/// cancels its siblings, and results are returned in input order no matter
/// in which order the requests complete.
pub struct BulkLoader {
    client: Arc<dyn SearchBackendClient>,
    collection: String,
    config: LoaderConfig,
}

impl BulkLoader {
    /// Create a new bulk loader with the default (unbounded) configuration.
    pub fn new(client: Arc<dyn SearchBackendClient>, collection: impl Into<String>) -> Self {
        Self {
            client,
            collection: collection.into(),
            config: LoaderConfig::default(),
        }
    }

    /// Create a new bulk loader with custom configuration.
    pub fn with_config(
        client: Arc<dyn SearchBackendClient>,
        collection: impl Into<String>,
        config: LoaderConfig,
    ) -> Self {
        Self {
            client,
            collection: collection.into(),
            config,
        }
    }

    pub fn collection(&self) -> &str {
        &self.collection
    }

    /// Index every record and return one result per record.
    ///
    /// `results[i]` is the outcome for `records[i]`.
    ///
    /// # Returns
    ///
    /// * `Ok(results)` - One result per input record, successes and failures mixed
    /// * `Err(BatchError::InvalidCollection)` - Nothing was submitted
    /// * `Err(BatchError::BackendUnreachable)` - Every record failed at the transport level
    #[instrument(skip(self, records), fields(collection = %self.collection, count = records.len()))]
    pub async fn load_all(
        &self,
        records: Vec<User>,
    ) -> Result<Vec<Result<Ack, SearchError>>, BatchError> {
        validate_collection(&self.collection)?;

        if records.is_empty() {
            return Ok(Vec::new());
        }

        let submissions = records.iter().map(|user| self.submit(user));

        let results: Vec<Result<Ack, SearchError>> = match self.config.max_concurrency {
            None => join_all(submissions).await,
            Some(limit) => {
                stream::iter(submissions)
                    .buffered(limit.max(1))
                    .collect()
                    .await
            }
        };

        let all_transport = results
            .iter()
            .all(|r| matches!(r, Err(e) if e.is_transport()));
        if all_transport {
            let last_error = results
                .iter()
                .rev()
                .find_map(|r| r.as_ref().err().cloned())
                .unwrap_or_else(|| SearchError::transport("no response"));
            warn!(attempted = results.len(), error = %last_error, "Backend unreachable");
            return Err(BatchError::backend_unreachable(results.len(), last_error));
        }

        let summary = LoadSummary::from_results(&results);
        info!(
            total = summary.total,
            succeeded = summary.succeeded,
            failed = summary.failed,
            "Bulk load completed"
        );

        Ok(results)
    }

    /// Submit a single record, applying the configured timeout.
    async fn submit(&self, user: &User) -> Result<Ack, SearchError> {
        let request = self.client.index(&self.collection, user);

        let result = match self.config.request_timeout {
            Some(timeout) => match tokio::time::timeout(timeout, request).await {
                Ok(result) => result,
                Err(_) => Err(SearchError::transport(format!(
                    "Index request for id {} timed out after {}ms",
                    user.id,
                    timeout.as_millis()
                ))),
            },
            None => request.await,
        };

        if let Err(ref e) = result {
            debug!(id = user.id, error = %e, "Failed to index record");
        }
        result
    }
}

/// Reject collection names the backend can never accept.
///
/// Names must be non-empty, lowercase, free of whitespace, and must not start
/// with `_`, `-` or `+`.
fn validate_collection(name: &str) -> Result<(), BatchError> {
    let invalid = name.is_empty()
        || name.starts_with(['_', '-', '+'])
        || name
            .chars()
            .any(|c| c.is_whitespace() || c.is_uppercase());

    if invalid {
        return Err(BatchError::invalid_collection(name));
    }
    Ok(())
}

//! Dependency initialization and wiring for the user search driver.

use std::sync::Arc;
use tracing::{info, warn};

use super::AppConfig;
use crate::AppError;
use user_search_ingest::BulkLoader;
use user_search_repository::{OpenSearchClient, QueryBuilder, SearchBackendClient};

/// Container for all initialized dependencies.
pub struct Dependencies {
    /// Shared backend client.
    pub client: Arc<dyn SearchBackendClient>,
    /// Loader bound to the configured collection.
    pub loader: BulkLoader,
    /// Query builder bound to the configured collection.
    pub query_builder: QueryBuilder,
}

impl Dependencies {
    /// Connect to the configured backend and wire the loader and query builder.
    ///
    /// # Returns
    ///
    /// * `Ok(Dependencies)` - Initialized dependencies
    /// * `Err(AppError)` - If the client cannot be created or the cluster is unhealthy
    pub async fn new(config: &AppConfig) -> Result<Self, AppError> {
        info!(
            opensearch_url = %config.opensearch_url,
            collection = %config.collection,
            max_concurrency = ?config.max_concurrency,
            request_timeout = ?config.request_timeout,
            "Initializing dependencies"
        );

        let search_client = OpenSearchClient::new(&config.search_config())
            .await
            .map_err(|e| AppError::config(format!("Failed to create OpenSearch client: {}", e)))?;

        let healthy = search_client
            .health_check()
            .await
            .map_err(|e| AppError::config(format!("OpenSearch health check failed: {}", e)))?;

        if !healthy {
            warn!("OpenSearch cluster reports red status");
            return Err(AppError::config("OpenSearch cluster is unhealthy"));
        }

        info!("OpenSearch connection verified");

        Ok(Self::from_client(Arc::new(search_client), config))
    }

    /// Wire dependencies around an existing client.
    pub fn from_client(client: Arc<dyn SearchBackendClient>, config: &AppConfig) -> Self {
        let loader =
            BulkLoader::with_config(client.clone(), &config.collection, config.loader_config());
        let query_builder = QueryBuilder::new(&config.collection);

        Self {
            client,
            loader,
            query_builder,
        }
    }

    /// The collection every command operates on.
    pub fn collection(&self) -> &str {
        self.query_builder.collection()
    }
}

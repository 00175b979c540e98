//! Environment-driven settings for the user search driver.

use std::env;
use std::time::Duration;

use crate::AppError;
use user_search_ingest::LoaderConfig;
use user_search_repository::config::{DEFAULT_COLLECTION, DEFAULT_URL};
use user_search_repository::SearchConfig;

/// Output format for log lines.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    /// Human readable lines with a local timestamp.
    #[default]
    Pretty,
    /// One JSON object per line.
    Json,
}

impl LogFormat {
    fn parse(value: &str) -> Self {
        if value.eq_ignore_ascii_case("json") {
            Self::Json
        } else {
            Self::Pretty
        }
    }
}

/// Settings resolved from the environment.
#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    /// Search backend URL.
    pub opensearch_url: String,
    /// Collection holding user documents.
    pub collection: String,
    /// Cap on in-flight index requests during a bulk load. None is unbounded.
    pub max_concurrency: Option<usize>,
    /// Per-request timeout. None waits indefinitely.
    pub request_timeout: Option<Duration>,
    /// Log output format.
    pub log_format: LogFormat,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            opensearch_url: DEFAULT_URL.to_string(),
            collection: DEFAULT_COLLECTION.to_string(),
            max_concurrency: None,
            request_timeout: None,
            log_format: LogFormat::default(),
        }
    }
}

impl AppConfig {
    /// Read settings from environment variables.
    ///
    /// # Environment Variables
    ///
    /// - `OPENSEARCH_URL`: search backend URL (default: http://localhost:9200)
    /// - `SEARCH_COLLECTION`: collection name (default: user)
    /// - `LOADER_MAX_CONCURRENCY`: cap on in-flight index requests (default: unbounded)
    /// - `REQUEST_TIMEOUT_SECS`: per-request timeout in seconds (default: none)
    /// - `LOG_FORMAT`: `json` for JSON log lines (default: pretty)
    ///
    /// # Returns
    ///
    /// * `Ok(AppConfig)` - Resolved settings
    /// * `Err(AppError)` - If a numeric variable cannot be parsed
    pub fn from_env() -> Result<Self, AppError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Resolve settings through an arbitrary variable lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, AppError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        let value = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let max_concurrency = value("LOADER_MAX_CONCURRENCY")
            .map(|v| parse_number::<usize>("LOADER_MAX_CONCURRENCY", &v))
            .transpose()?;
        let request_timeout = value("REQUEST_TIMEOUT_SECS")
            .map(|v| parse_number::<u64>("REQUEST_TIMEOUT_SECS", &v))
            .transpose()?
            .map(Duration::from_secs);

        Ok(Self {
            opensearch_url: value("OPENSEARCH_URL").unwrap_or(defaults.opensearch_url),
            collection: value("SEARCH_COLLECTION").unwrap_or(defaults.collection),
            max_concurrency,
            request_timeout,
            log_format: value("LOG_FORMAT")
                .map(|v| LogFormat::parse(&v))
                .unwrap_or_default(),
        })
    }

    /// Backend client configuration.
    pub fn search_config(&self) -> SearchConfig {
        let config = SearchConfig::with_url(&self.opensearch_url).collection(&self.collection);
        match self.request_timeout {
            Some(timeout) => config.request_timeout(timeout),
            None => config,
        }
    }

    /// Bulk loader configuration.
    pub fn loader_config(&self) -> LoaderConfig {
        let config = match self.max_concurrency {
            Some(n) => LoaderConfig::with_max_concurrency(n),
            None => LoaderConfig::unlimited(),
        };
        match self.request_timeout {
            Some(timeout) => config.request_timeout(timeout),
            None => config,
        }
    }
}

fn parse_number<T: std::str::FromStr>(key: &str, value: &str) -> Result<T, AppError> {
    value
        .trim()
        .parse()
        .map_err(|_| AppError::config(format!("{} must be a non-negative integer, got '{}'", key, value)))
}

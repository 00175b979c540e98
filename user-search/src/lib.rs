//! # User Search
//!
//! Main library for the user search command line driver.
//!
//! This crate provides configuration, logging setup, a synthetic record
//! generator and the commands exposed by the `user-search` binary.

pub mod commands;
pub mod config;
pub mod generator;
pub mod logging;

pub use config::{AppConfig, Dependencies};

use thiserror::Error;

/// Errors that can occur while configuring or running a command.
#[derive(Error, Debug)]
pub enum AppError {
    /// Configuration error.
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// Search error.
    #[error("Search error: {0}")]
    SearchError(#[from] user_search_repository::SearchError),

    /// Batch error.
    #[error("Batch error: {0}")]
    BatchError(#[from] user_search_ingest::BatchError),
}

impl AppError {
    /// Create a configuration error.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::ConfigError(msg.into())
    }
}

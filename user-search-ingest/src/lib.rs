//! # User Search Ingest
//!
//! This crate loads user records into the search backend.
//!
//! ## Architecture
//!
//! 1. **Loader**: submits every record as an independent index request and
//!    collects one result per record, in input order
//! 2. **Errors**: batch-level failures that abort a load before or instead of
//!    returning per-record results

pub mod errors;
pub mod loader;

pub use errors::BatchError;
pub use loader::{BulkLoader, LoadSummary, LoaderConfig};

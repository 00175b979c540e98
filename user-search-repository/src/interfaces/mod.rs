//! Interface definitions for the search backend client.
//!
//! This module defines the abstract `SearchBackendClient` trait that allows
//! for dependency injection and swappable search backend implementations.

mod search_backend_client;

pub use search_backend_client::SearchBackendClient;

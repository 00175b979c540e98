//! The `User` record and its partial update.

use serde::{Deserialize, Serialize};

/// A user document as stored in the search backend.
///
/// `id` is also the backend document identifier. Indexing a user whose `id`
/// is already present replaces the stored document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    /// Unique identifier, used as the document id.
    pub id: u64,
    /// Display name.
    pub name: String,
    /// Age in years.
    pub age: u32,
    /// Free-form address (usually a city).
    pub address: String,
    /// Large free-text body used for full-text search.
    pub description: String,
}

impl User {
    /// The document id the backend stores this user under.
    pub fn document_id(&self) -> String {
        self.id.to_string()
    }
}

/// Partial update of a user document.
///
/// Only fields that are `Some` are sent to the backend. The `id` is not part
/// of the update and is supplied separately.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub age: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl UserUpdate {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the name to update.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Set the age to update.
    pub fn with_age(mut self, age: u32) -> Self {
        self.age = Some(age);
        self
    }

    /// Set the address to update.
    pub fn with_address(mut self, address: impl Into<String>) -> Self {
        self.address = Some(address.into());
        self
    }

    /// Set the description to update.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Check if any fields are set for update.
    pub fn has_updates(&self) -> bool {
        self.name.is_some()
            || self.age.is_some()
            || self.address.is_some()
            || self.description.is_some()
    }
}

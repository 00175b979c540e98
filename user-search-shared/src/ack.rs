//! Write acknowledgements.

use serde::{Deserialize, Serialize};

/// What the backend reports it did with a write.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WriteResult {
    Created,
    Updated,
    Deleted,
    Noop,
    NotFound,
    Unknown,
}

impl WriteResult {
    /// Parse the `result` field of a backend write response.
    pub fn parse(value: &str) -> Self {
        match value {
            "created" => WriteResult::Created,
            "updated" => WriteResult::Updated,
            "deleted" => WriteResult::Deleted,
            "noop" => WriteResult::Noop,
            "not_found" => WriteResult::NotFound,
            _ => WriteResult::Unknown,
        }
    }
}

/// Successful acknowledgement of a single-document write.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ack {
    /// Id of the user the write applied to.
    pub id: u64,
    pub result: WriteResult,
    /// Document version after the write, when the backend reports one.
    pub version: Option<u64>,
}

impl Ack {
    pub fn new(id: u64, result: WriteResult) -> Self {
        Self {
            id,
            result,
            version: None,
        }
    }

    pub fn with_version(mut self, version: u64) -> Self {
        self.version = Some(version);
        self
    }
}

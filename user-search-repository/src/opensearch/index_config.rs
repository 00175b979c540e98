//! OpenSearch index configuration and mappings.
//!
//! This module defines the index settings and mappings for the user collection.

use serde_json::{json, Value};

/// Get the index settings and mappings for the user collection.
///
/// The configuration includes:
/// - **text**: `name`, `address` and `description` are analyzed for full-text matching
/// - **keyword**: `name.raw` keeps the untouched value for exact lookups and sorting
/// - **numeric**: `id` and `age` are stored as numbers
///
/// # Sharding Configuration
///
/// - 1 primary shard
/// - 1 replica for redundancy
pub fn get_index_settings() -> Value {
    json!({
        "settings": {
            "number_of_shards": 1,
            "number_of_replicas": 1
        },
        "mappings": {
            "properties": {
                "id": {
                    "type": "long"
                },
                "name": {
                    "type": "text",
                    "fields": {
                        "raw": {
                            "type": "keyword"
                        }
                    }
                },
                "age": {
                    "type": "integer"
                },
                "address": {
                    "type": "text"
                },
                "description": {
                    "type": "text"
                }
            }
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_index_settings_structure() {
        let settings = get_index_settings();

        // Check settings exist
        assert!(settings["settings"]["number_of_shards"].is_number());
        assert!(settings["settings"]["number_of_replicas"].is_number());

        let properties = &settings["mappings"]["properties"];
        assert_eq!(properties["id"]["type"], "long");
        assert_eq!(properties["age"]["type"], "integer");
        assert_eq!(properties["description"]["type"], "text");

        // Name keeps a keyword sub-field for exact matches
        assert_eq!(properties["name"]["type"], "text");
        assert_eq!(properties["name"]["fields"]["raw"]["type"], "keyword");
    }
}

//! OpenSearch client implementation.
//!
//! This module provides the concrete implementation of `SearchBackendClient`
//! using the OpenSearch Rust client.

use async_trait::async_trait;
use opensearch::{
    cluster::ClusterHealthParts,
    http::transport::{SingleNodeConnectionPool, TransportBuilder},
    http::StatusCode,
    indices::{IndicesCreateParts, IndicesExistsParts},
    DeleteParts, IndexParts, OpenSearch, SearchParts, UpdateParts,
};
use serde_json::{json, Value};
use tracing::{debug, error, info, instrument, warn};
use url::Url;

use crate::config::SearchConfig;
use crate::errors::SearchError;
use crate::interfaces::SearchBackendClient;
use crate::opensearch::index_config::get_index_settings;
use crate::opensearch::queries::build_search_body;
use user_search_shared::{
    Ack, SearchHit, SearchRequest, SearchResponse, User, UserUpdate, WriteResult,
};

/// OpenSearch client implementation.
///
/// Provides document writes and full-text search using OpenSearch as the
/// backend. The handle is cheap to share behind an `Arc`; every call issues an
/// independent HTTP request.
///
/// # Example
///
/// ```ignore
/// let config = SearchConfig::with_url("http://localhost:9200");
/// let client = OpenSearchClient::new(&config).await?;
///
/// client.index("user", &user).await?;
/// ```
pub struct OpenSearchClient {
    client: OpenSearch,
}

/// Which write a failed response belongs to, for status mapping.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum WriteOp {
    Index,
    Update,
    Delete,
}

impl WriteOp {
    fn as_str(&self) -> &'static str {
        match self {
            WriteOp::Index => "Index",
            WriteOp::Update => "Update",
            WriteOp::Delete => "Delete",
        }
    }
}

impl OpenSearchClient {
    /// Create a new OpenSearch client from the given configuration.
    ///
    /// # Returns
    ///
    /// * `Ok(OpenSearchClient)` - A new client instance
    /// * `Err(SearchError::Transport)` - If the URL is invalid or transport setup fails
    pub async fn new(config: &SearchConfig) -> Result<Self, SearchError> {
        let parsed_url =
            Url::parse(&config.url).map_err(|e| SearchError::transport(e.to_string()))?;

        let conn_pool = SingleNodeConnectionPool::new(parsed_url);
        let mut builder = TransportBuilder::new(conn_pool).disable_proxy();
        if let Some(timeout) = config.request_timeout {
            builder = builder.timeout(timeout);
        }
        let transport = builder
            .build()
            .map_err(|e| SearchError::transport(e.to_string()))?;

        let client = OpenSearch::new(transport);

        info!(
            url = %config.url,
            collection = %config.collection,
            timeout_ms = config.request_timeout.map(|t| t.as_millis() as u64),
            "Created OpenSearch client"
        );

        Ok(Self { client })
    }

    /// Map a non-success write status to an error.
    ///
    /// 404 on update or delete means the document is missing; anything else is
    /// the backend rejecting the write.
    fn write_error(
        op: WriteOp,
        status: StatusCode,
        collection: &str,
        id: u64,
        body: &str,
    ) -> SearchError {
        if status == StatusCode::NOT_FOUND && op != WriteOp::Index {
            return SearchError::not_found(collection, id);
        }
        SearchError::index(format!(
            "{} failed with status {}: {}",
            op.as_str(),
            status,
            body
        ))
    }

    /// Build an acknowledgement from a write response body.
    fn parse_ack(id: u64, body: &Value) -> Ack {
        let result = body
            .get("result")
            .and_then(|r| r.as_str())
            .map(WriteResult::parse)
            .unwrap_or(WriteResult::Unknown);

        let ack = Ack::new(id, result);
        match body.get("_version").and_then(|v| v.as_u64()) {
            Some(version) => ack.with_version(version),
            None => ack,
        }
    }

    /// Parse a single search hit.
    ///
    /// Returns `None` if the hit has no `_source` or the source is not a user.
    fn parse_hit(hit: &Value) -> Option<SearchHit> {
        let source = hit.get("_source")?;
        let document: User = serde_json::from_value(source.clone()).ok()?;

        let id = hit
            .get("_id")
            .and_then(|v| v.as_str())
            .map(str::to_string)
            .unwrap_or_else(|| document.document_id());

        Some(SearchHit {
            id,
            score: hit.get("_score").and_then(|s| s.as_f64()),
            document,
        })
    }

    /// Parse a `_search` response body.
    fn parse_search_response(body: &Value) -> Result<SearchResponse, SearchError> {
        let hits = body
            .get("hits")
            .ok_or_else(|| SearchError::parse("Response has no hits section"))?;

        // track_total_hits=true yields {"value": n, "relation": "eq"}; older
        // backends report a bare number.
        let total = match hits.get("total") {
            Some(Value::Number(n)) => n.as_u64().unwrap_or(0),
            Some(total) => total.get("value").and_then(|v| v.as_u64()).unwrap_or(0),
            None => 0,
        };

        let raw_hits = hits
            .get("hits")
            .and_then(|h| h.as_array())
            .map(Vec::as_slice)
            .unwrap_or(&[]);

        let mut parsed = Vec::with_capacity(raw_hits.len());
        for hit in raw_hits {
            match Self::parse_hit(hit) {
                Some(hit) => parsed.push(hit),
                None => warn!(hit = %hit, "Skipping unparseable search hit"),
            }
        }

        Ok(SearchResponse {
            total,
            hits: parsed,
        })
    }
}

#[async_trait]
impl SearchBackendClient for OpenSearchClient {
    #[instrument(skip(self, user), fields(id = user.id))]
    async fn index(&self, collection: &str, user: &User) -> Result<Ack, SearchError> {
        let doc_id = user.document_id();

        let response = self
            .client
            .index(IndexParts::IndexId(collection, &doc_id))
            .body(user)
            .send()
            .await
            .map_err(|e| SearchError::transport(e.to_string()))?;

        let status = response.status_code();
        if !status.is_success() {
            let error_body = response.text().await.unwrap_or_default();
            error!(status = %status, body = %error_body, "Index request failed");
            return Err(Self::write_error(
                WriteOp::Index,
                status,
                collection,
                user.id,
                &error_body,
            ));
        }

        let body: Value = response
            .json()
            .await
            .map_err(|e| SearchError::parse(e.to_string()))?;

        debug!(doc_id = %doc_id, "Document indexed");
        Ok(Self::parse_ack(user.id, &body))
    }

    /// Merge the present fields into an existing document.
    ///
    /// Unlike an index, this never creates the document: a missing id is
    /// reported as `NotFound`. An update with no fields is a no-op.
    #[instrument(skip(self, update))]
    async fn update(
        &self,
        collection: &str,
        id: u64,
        update: &UserUpdate,
    ) -> Result<Ack, SearchError> {
        if !update.has_updates() {
            // No fields to update
            return Ok(Ack::new(id, WriteResult::Noop));
        }

        let doc = serde_json::to_value(update)
            .map_err(|e| SearchError::serialization(e.to_string()))?;
        let doc_id = id.to_string();

        let response = self
            .client
            .update(UpdateParts::IndexId(collection, &doc_id))
            .body(json!({ "doc": doc }))
            .send()
            .await
            .map_err(|e| SearchError::transport(e.to_string()))?;

        let status = response.status_code();
        if !status.is_success() {
            let error_body = response.text().await.unwrap_or_default();
            error!(status = %status, body = %error_body, "Update request failed");
            return Err(Self::write_error(
                WriteOp::Update,
                status,
                collection,
                id,
                &error_body,
            ));
        }

        let body: Value = response
            .json()
            .await
            .map_err(|e| SearchError::parse(e.to_string()))?;

        debug!(doc_id = %doc_id, "Document updated");
        Ok(Self::parse_ack(id, &body))
    }

    #[instrument(skip(self))]
    async fn delete(&self, collection: &str, id: u64) -> Result<Ack, SearchError> {
        let doc_id = id.to_string();

        let response = self
            .client
            .delete(DeleteParts::IndexId(collection, &doc_id))
            .send()
            .await
            .map_err(|e| SearchError::transport(e.to_string()))?;

        let status = response.status_code();
        if !status.is_success() {
            let error_body = response.text().await.unwrap_or_default();
            if status != StatusCode::NOT_FOUND {
                error!(status = %status, body = %error_body, "Delete request failed");
            }
            return Err(Self::write_error(
                WriteOp::Delete,
                status,
                collection,
                id,
                &error_body,
            ));
        }

        let body: Value = response
            .json()
            .await
            .map_err(|e| SearchError::parse(e.to_string()))?;

        debug!(doc_id = %doc_id, "Document deleted");
        Ok(Self::parse_ack(id, &body))
    }

    #[instrument(skip(self, request), fields(collection = %request.collection, query = request.query.kind()))]
    async fn search(&self, request: &SearchRequest) -> Result<SearchResponse, SearchError> {
        let body = build_search_body(request);

        let response = self
            .client
            .search(SearchParts::Index(&[request.collection.as_str()]))
            .body(body)
            .send()
            .await
            .map_err(|e| SearchError::transport(e.to_string()))?;

        let status = response.status_code();
        if !status.is_success() {
            let error_body = response.text().await.unwrap_or_default();
            error!(status = %status, body = %error_body, "Search request failed");
            return Err(SearchError::query(format!(
                "Search failed with status {}: {}",
                status, error_body
            )));
        }

        let body: Value = response
            .json()
            .await
            .map_err(|e| SearchError::parse(e.to_string()))?;

        let result = Self::parse_search_response(&body)?;
        debug!(total = result.total, hits = result.hits.len(), "Search completed");
        Ok(result)
    }

    async fn collection_exists(&self, collection: &str) -> Result<bool, SearchError> {
        let response = self
            .client
            .indices()
            .exists(IndicesExistsParts::Index(&[collection]))
            .send()
            .await
            .map_err(|e| SearchError::transport(e.to_string()))?;

        match response.status_code() {
            StatusCode::OK => Ok(true),
            StatusCode::NOT_FOUND => Ok(false),
            status => Err(SearchError::query(format!(
                "Index exists check failed with status {}",
                status
            ))),
        }
    }

    async fn ensure_collection(&self, collection: &str) -> Result<(), SearchError> {
        if self.collection_exists(collection).await? {
            debug!(collection = %collection, "Collection already exists");
            return Ok(());
        }

        let response = self
            .client
            .indices()
            .create(IndicesCreateParts::Index(collection))
            .body(get_index_settings())
            .send()
            .await
            .map_err(|e| SearchError::transport(e.to_string()))?;

        let status = response.status_code();
        if !status.is_success() {
            let error_body = response.text().await.unwrap_or_default();
            // Another writer may have created it between the check and the create
            if error_body.contains("resource_already_exists_exception") {
                return Ok(());
            }
            error!(status = %status, body = %error_body, "Index creation failed");
            return Err(SearchError::index(format!(
                "Index creation failed with status {}: {}",
                status, error_body
            )));
        }

        info!(collection = %collection, "Created collection");
        Ok(())
    }

    async fn health_check(&self) -> Result<bool, SearchError> {
        let response = self
            .client
            .cluster()
            .health(ClusterHealthParts::None)
            .send()
            .await
            .map_err(|e| SearchError::transport(e.to_string()))?;

        let health: Value = response
            .json()
            .await
            .map_err(|e| SearchError::parse(e.to_string()))?;
        let status = health
            .get("status")
            .and_then(|s| s.as_str())
            .unwrap_or("unknown");

        info!(status = %status, "Cluster health");
        Ok(status == "green" || status == "yellow")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_hit() {
        let hit = json!({
            "_id": "3",
            "_source": {
                "id": 3,
                "name": "Dana",
                "age": 27,
                "address": "Porto",
                "description": "Likes pizza"
            },
            "_score": 1.5
        });

        let result = OpenSearchClient::parse_hit(&hit).unwrap();

        assert_eq!(result.id, "3");
        assert_eq!(result.score, Some(1.5));
        assert_eq!(result.document.name, "Dana");
        assert_eq!(result.document.age, 27);
    }

    #[test]
    fn test_parse_hit_null_score() {
        let hit = json!({
            "_id": "3",
            "_source": {
                "id": 3,
                "name": "Dana",
                "age": 27,
                "address": "Porto",
                "description": ""
            },
            "_score": null
        });

        let result = OpenSearchClient::parse_hit(&hit).unwrap();

        assert!(result.score.is_none());
    }

    #[test]
    fn test_parse_hit_invalid() {
        let hit = json!({
            "_source": {
                "name": "Missing fields"
            },
            "_score": 1.0
        });

        assert!(OpenSearchClient::parse_hit(&hit).is_none());
    }

    #[test]
    fn test_parse_search_response() {
        let body = json!({
            "hits": {
                "total": { "value": 1234, "relation": "eq" },
                "hits": [
                    {
                        "_id": "1",
                        "_score": 2.0,
                        "_source": {
                            "id": 1,
                            "name": "Daniel",
                            "age": 40,
                            "address": "Lyon",
                            "description": "Music lover"
                        }
                    },
                    {
                        "_id": "broken",
                        "_score": 1.0,
                        "_source": { "name": "no id" }
                    }
                ]
            }
        });

        let response = OpenSearchClient::parse_search_response(&body).unwrap();

        assert_eq!(response.total, 1234);
        assert_eq!(response.hits.len(), 1);
        assert_eq!(response.hits[0].document.id, 1);
    }

    #[test]
    fn test_parse_search_response_numeric_total() {
        let body = json!({ "hits": { "total": 7, "hits": [] } });

        let response = OpenSearchClient::parse_search_response(&body).unwrap();

        assert_eq!(response.total, 7);
        assert!(response.hits.is_empty());
    }

    #[test]
    fn test_parse_search_response_missing_hits() {
        let body = json!({ "error": "boom" });

        let result = OpenSearchClient::parse_search_response(&body);
        assert!(matches!(result, Err(SearchError::Parse(_))));
    }

    #[tokio::test]
    async fn test_update_without_fields_is_noop() {
        // Nothing listens on this port; an empty update must not send a request
        let config = SearchConfig::with_url("http://127.0.0.1:1");
        let client = OpenSearchClient::new(&config).await.unwrap();

        let result = client.update("user", 3, &UserUpdate::new()).await;

        assert!(matches!(
            result,
            Ok(Ack {
                id: 3,
                result: WriteResult::Noop,
                version: None
            })
        ));
    }

    #[test]
    fn test_parse_ack_without_version() {
        let body = json!({ "_id": "5", "result": "created" });

        let ack = OpenSearchClient::parse_ack(5, &body);

        assert_eq!(ack, Ack::new(5, WriteResult::Created));
    }

    #[test]
    fn test_parse_ack() {
        let body = json!({ "_id": "5", "_version": 2, "result": "updated" });

        let ack = OpenSearchClient::parse_ack(5, &body);

        assert_eq!(ack.id, 5);
        assert_eq!(ack.result, WriteResult::Updated);
        assert_eq!(ack.version, Some(2));
    }

    #[test]
    fn test_write_error_not_found() {
        let err = OpenSearchClient::write_error(
            WriteOp::Delete,
            StatusCode::NOT_FOUND,
            "user",
            9,
            "{}",
        );
        assert!(err.is_not_found());

        let err = OpenSearchClient::write_error(
            WriteOp::Update,
            StatusCode::NOT_FOUND,
            "user",
            9,
            "{}",
        );
        assert!(err.is_not_found());
    }

    #[test]
    fn test_write_error_rejected() {
        let err = OpenSearchClient::write_error(
            WriteOp::Index,
            StatusCode::BAD_REQUEST,
            "user",
            9,
            "mapper_parsing_exception",
        );

        assert!(matches!(err, SearchError::Index(ref msg) if msg.contains("mapper_parsing_exception")));
    }

    #[test]
    fn test_write_error_index_404_is_not_not_found() {
        // A 404 on index means the collection is missing, not the document
        let err = OpenSearchClient::write_error(
            WriteOp::Index,
            StatusCode::NOT_FOUND,
            "user",
            9,
            "index_not_found_exception",
        );

        assert!(!err.is_not_found());
    }
}

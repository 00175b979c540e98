//! Commands exposed by the `user-search` binary.
//!
//! Each command runs against the wired `Dependencies` and returns its result
//! so callers decide how to report it.

use tracing::{info, instrument, warn};

use crate::config::Dependencies;
use crate::generator::generate_users;
use crate::AppError;
use user_search_ingest::LoadSummary;
use user_search_repository::SearchBackendClient;
use user_search_shared::{Ack, Page, SearchHit, SearchResponse, UserUpdate};

/// Field searched by full-text and terms queries.
pub const DESCRIPTION_FIELD: &str = "description";

/// Field searched by prefix queries.
pub const NAME_FIELD: &str = "name";

/// Default page size for name prefix searches.
pub const NAME_SEARCH_LIMIT: u64 = 200;

/// Generate `count` users and load them into the collection.
///
/// The collection is created first if it does not exist. Records that fail
/// are logged individually and counted in the returned summary.
#[instrument(skip(deps), fields(collection = %deps.collection()))]
pub async fn seed(deps: &Dependencies, count: u64) -> Result<LoadSummary, AppError> {
    deps.client.ensure_collection(deps.collection()).await?;

    let users = generate_users(count);
    let ids: Vec<u64> = users.iter().map(|u| u.id).collect();
    let results = deps.loader.load_all(users).await?;

    for (id, result) in ids.iter().zip(&results) {
        if let Err(e) = result {
            warn!(id = id, error = %e, "Record was not indexed");
        }
    }

    let summary = LoadSummary::from_results(&results);
    info!(
        total = summary.total,
        succeeded = summary.succeeded,
        failed = summary.failed,
        "Seeding completed"
    );
    Ok(summary)
}

/// Full-text search on the description field.
pub async fn search_description(
    deps: &Dependencies,
    text: &str,
    page: Page,
) -> Result<SearchResponse, AppError> {
    let request = deps.query_builder.match_query(DESCRIPTION_FIELD, text, page);
    let response = deps.client.search(&request).await?;

    info!(
        total = response.total,
        returned = response.hits.len(),
        literal_matches = count_containing(&response, text),
        "Description search completed"
    );
    Ok(response)
}

/// Prefix search on the name field.
pub async fn search_name(
    deps: &Dependencies,
    prefix: &str,
    page: Page,
) -> Result<SearchResponse, AppError> {
    let page = Page {
        limit: page.limit.or(Some(NAME_SEARCH_LIMIT)),
        ..page
    };
    let request = deps.query_builder.prefix_query(NAME_FIELD, prefix, page);
    let response = deps.client.search(&request).await?;

    let names: Vec<&str> = response.documents().map(|u| u.name.as_str()).collect();
    info!(total = response.total, names = ?names, "Name search completed");
    Ok(response)
}

/// Exact-term search on the description field.
///
/// Hits whose description contains none of the values are logged, since
/// terms match analyzed tokens rather than the literal text.
pub async fn search_terms(
    deps: &Dependencies,
    values: &[String],
    page: Page,
) -> Result<SearchResponse, AppError> {
    let request = deps
        .query_builder
        .terms_query(DESCRIPTION_FIELD, values.iter().cloned(), page);
    let response = deps.client.search(&request).await?;

    let unexpected = hits_missing_all(&response, values);
    for hit in &unexpected {
        warn!(id = %hit.id, "Hit description contains none of the values");
    }
    info!(
        total = response.total,
        returned = response.hits.len(),
        missing_values = unexpected.len(),
        "Terms search completed"
    );
    Ok(response)
}

/// Merge the given fields into an existing user.
pub async fn update(deps: &Dependencies, id: u64, changes: UserUpdate) -> Result<Ack, AppError> {
    let ack = deps.client.update(deps.collection(), id, &changes).await?;
    info!(id = id, result = ?ack.result, "User updated");
    Ok(ack)
}

/// Delete a user by id.
pub async fn delete(deps: &Dependencies, id: u64) -> Result<Ack, AppError> {
    let ack = deps.client.delete(deps.collection(), id).await?;
    info!(id = id, result = ?ack.result, "User deleted");
    Ok(ack)
}

/// Whether the collection exists.
pub async fn check(deps: &Dependencies) -> Result<bool, AppError> {
    let exists = deps.client.collection_exists(deps.collection()).await?;
    info!(collection = %deps.collection(), exists = exists, "Collection check");
    Ok(exists)
}

/// Number of hits whose description contains `text` literally.
pub fn count_containing(response: &SearchResponse, text: &str) -> usize {
    response
        .documents()
        .filter(|u| u.description.contains(text))
        .count()
}

/// Hits whose description contains none of `values`, ignoring case.
pub fn hits_missing_all<'a>(response: &'a SearchResponse, values: &[String]) -> Vec<&'a SearchHit> {
    let needles: Vec<String> = values.iter().map(|v| v.to_lowercase()).collect();
    response
        .hits
        .iter()
        .filter(|hit| {
            let description = hit.document.description.to_lowercase();
            !needles.iter().any(|n| description.contains(n.as_str()))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AppConfig;
    use async_trait::async_trait;
    use std::collections::BTreeMap;
    use std::sync::Arc;
    use tokio::sync::Mutex;
    use user_search_repository::SearchError;
    use user_search_shared::{Query, SearchRequest, User, WriteResult};

    /// In-memory search backend for testing.
    #[derive(Default)]
    struct MockBackend {
        store: Mutex<BTreeMap<u64, User>>,
        collections: Mutex<Vec<String>>,
        requests: Mutex<Vec<SearchRequest>>,
    }

    #[async_trait]
    impl SearchBackendClient for MockBackend {
        async fn index(&self, _collection: &str, user: &User) -> Result<Ack, SearchError> {
            let previous = self.store.lock().await.insert(user.id, user.clone());
            let result = if previous.is_some() {
                WriteResult::Updated
            } else {
                WriteResult::Created
            };
            Ok(Ack::new(user.id, result))
        }

        async fn update(
            &self,
            collection: &str,
            id: u64,
            update: &UserUpdate,
        ) -> Result<Ack, SearchError> {
            let mut store = self.store.lock().await;
            let user = store
                .get_mut(&id)
                .ok_or_else(|| SearchError::not_found(collection, id))?;
            if let Some(name) = &update.name {
                user.name = name.clone();
            }
            if let Some(age) = update.age {
                user.age = age;
            }
            Ok(Ack::new(id, WriteResult::Updated))
        }

        async fn delete(&self, collection: &str, id: u64) -> Result<Ack, SearchError> {
            self.store
                .lock()
                .await
                .remove(&id)
                .map(|_| Ack::new(id, WriteResult::Deleted))
                .ok_or_else(|| SearchError::not_found(collection, id))
        }

        async fn search(&self, request: &SearchRequest) -> Result<SearchResponse, SearchError> {
            self.requests.lock().await.push(request.clone());
            let store = self.store.lock().await;
            let hits: Vec<SearchHit> = store
                .values()
                .filter(|u| match &request.query {
                    Query::Match(q) => u.description.contains(&q.text),
                    Query::Prefix(q) => u.name.starts_with(&q.value),
                    Query::Terms(q) => q.values.iter().any(|v| u.description.contains(v)),
                    Query::Empty => true,
                })
                .map(|u| SearchHit {
                    id: u.id.to_string(),
                    score: None,
                    document: u.clone(),
                })
                .collect();
            Ok(SearchResponse {
                total: hits.len() as u64,
                hits,
            })
        }

        async fn collection_exists(&self, collection: &str) -> Result<bool, SearchError> {
            Ok(self.collections.lock().await.iter().any(|c| c == collection))
        }

        async fn ensure_collection(&self, collection: &str) -> Result<(), SearchError> {
            let mut collections = self.collections.lock().await;
            if !collections.iter().any(|c| c == collection) {
                collections.push(collection.to_string());
            }
            Ok(())
        }

        async fn health_check(&self) -> Result<bool, SearchError> {
            Ok(true)
        }
    }

    fn create_test_deps() -> (Arc<MockBackend>, Dependencies) {
        let backend = Arc::new(MockBackend::default());
        let deps = Dependencies::from_client(backend.clone(), &AppConfig::default());
        (backend, deps)
    }

    fn create_test_user(id: u64, name: &str, description: &str) -> User {
        User {
            id,
            name: name.to_string(),
            age: 30,
            address: "Lisbon".to_string(),
            description: description.to_string(),
        }
    }

    async fn insert(backend: &MockBackend, users: Vec<User>) {
        let mut store = backend.store.lock().await;
        for user in users {
            store.insert(user.id, user);
        }
    }

    #[tokio::test]
    async fn test_seed_creates_collection_and_loads() {
        let (backend, deps) = create_test_deps();

        let summary = seed(&deps, 20).await.unwrap();

        assert_eq!(
            summary,
            LoadSummary {
                total: 20,
                succeeded: 20,
                failed: 0
            }
        );
        assert!(check(&deps).await.unwrap());
        assert_eq!(backend.store.lock().await.len(), 20);
    }

    #[tokio::test]
    async fn test_check_missing_collection() {
        let (_backend, deps) = create_test_deps();

        assert!(!check(&deps).await.unwrap());
    }

    #[tokio::test]
    async fn test_search_description_request_shape() {
        let (backend, deps) = create_test_deps();
        insert(
            &backend,
            vec![
                create_test_user(1, "Dana", "Loves Pizza"),
                create_test_user(2, "Omar", "Plays music"),
            ],
        )
        .await;

        let response = search_description(&deps, "Pizza", Page::new(0, 10))
            .await
            .unwrap();

        assert_eq!(response.total, 1);
        assert_eq!(count_containing(&response, "Pizza"), 1);

        let requests = backend.requests.lock().await;
        assert_eq!(requests[0].collection, "user");
        assert_eq!(requests[0].size, 10);
        assert!(matches!(&requests[0].query, Query::Match(q) if q.field == "description"));
    }

    #[tokio::test]
    async fn test_search_name_default_limit() {
        let (backend, deps) = create_test_deps();
        insert(
            &backend,
            vec![
                create_test_user(1, "Daniel", "a"),
                create_test_user(2, "Danielle", "b"),
                create_test_user(3, "Omar", "c"),
            ],
        )
        .await;

        let response = search_name(&deps, "Dan", Page::default()).await.unwrap();

        assert_eq!(response.total, 2);
        let requests = backend.requests.lock().await;
        assert_eq!(requests[0].size, NAME_SEARCH_LIMIT);
        assert_eq!(requests[0].from, 0);
    }

    #[tokio::test]
    async fn test_search_name_explicit_limit() {
        let (backend, deps) = create_test_deps();

        search_name(&deps, "Dan", Page::new(5, 15)).await.unwrap();

        let requests = backend.requests.lock().await;
        assert_eq!(requests[0].from, 5);
        assert_eq!(requests[0].size, 15);
    }

    #[tokio::test]
    async fn test_search_terms() {
        let (backend, deps) = create_test_deps();
        insert(
            &backend,
            vec![
                create_test_user(1, "Dana", "music all day"),
                create_test_user(2, "Omar", "nothing here"),
            ],
        )
        .await;

        let values = vec!["music".to_string(), "eum".to_string()];
        let response = search_terms(&deps, &values, Page::default()).await.unwrap();

        assert_eq!(response.total, 1);
        assert!(hits_missing_all(&response, &values).is_empty());
    }

    #[tokio::test]
    async fn test_update_and_delete() {
        let (backend, deps) = create_test_deps();
        insert(&backend, vec![create_test_user(4, "Dana", "x")]).await;

        let ack = update(&deps, 4, UserUpdate::default().with_age(41))
            .await
            .unwrap();
        assert_eq!(ack.result, WriteResult::Updated);
        assert_eq!(backend.store.lock().await[&4].age, 41);

        let ack = delete(&deps, 4).await.unwrap();
        assert_eq!(ack.result, WriteResult::Deleted);

        let result = delete(&deps, 4).await;
        assert!(matches!(
            result,
            Err(AppError::SearchError(SearchError::NotFound(_)))
        ));
    }

    #[test]
    fn test_hits_missing_all_ignores_case() {
        let response = SearchResponse {
            total: 2,
            hits: vec![
                SearchHit {
                    id: "1".to_string(),
                    score: Some(1.0),
                    document: create_test_user(1, "Dana", "Listens to MUSIC"),
                },
                SearchHit {
                    id: "2".to_string(),
                    score: Some(0.5),
                    document: create_test_user(2, "Omar", "Eats pizza"),
                },
            ],
        };

        let missing = hits_missing_all(&response, &["music".to_string()]);

        assert_eq!(missing.len(), 1);
        assert_eq!(missing[0].id, "2");
    }
}

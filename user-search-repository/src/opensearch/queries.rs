//! OpenSearch query translation.
//!
//! This module turns backend-agnostic `SearchRequest`s into OpenSearch query
//! DSL bodies.

use serde_json::{json, Value};

use user_search_shared::{Fuzziness, Query, SearchRequest};

/// Build the full `_search` body for a request.
///
/// Pagination and total hit tracking live in the body so the request is
/// self-contained.
pub fn build_search_body(request: &SearchRequest) -> Value {
    json!({
        "from": request.from,
        "size": request.size,
        "track_total_hits": request.track_total_hits,
        "query": build_query_clause(&request.query)
    })
}

/// Build the `query` clause for a single query variant.
///
/// - `Empty` becomes `match_all`
/// - `Match` becomes a `match` with operator and fuzziness
/// - `Prefix` becomes a `prefix` on the raw value
/// - `Terms` becomes a `terms` filter; an empty value list matches nothing
pub fn build_query_clause(query: &Query) -> Value {
    match query {
        Query::Empty => json!({ "match_all": {} }),
        Query::Match(query) => json!({
            "match": {
                query.field.as_str(): {
                    "query": query.text,
                    "operator": query.operator.as_str(),
                    "fuzziness": fuzziness_value(query.fuzziness)
                }
            }
        }),
        Query::Prefix(query) => json!({
            "prefix": {
                query.field.as_str(): {
                    "value": query.value
                }
            }
        }),
        Query::Terms(query) => {
            let values: Vec<&str> = query.values.iter().map(String::as_str).collect();
            json!({
                "terms": {
                    query.field.as_str(): values
                }
            })
        }
    }
}

fn fuzziness_value(fuzziness: Fuzziness) -> Value {
    match fuzziness {
        // AUTO allows variable edits based on term length:
        // 1-2 chars: 0 edits, 3-5 chars: 1 edit, 6+ chars: 2 edits
        Fuzziness::Auto => json!("AUTO"),
        Fuzziness::Edits(edits) => json!(edits),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::query_builder::QueryBuilder;
    use user_search_shared::Page;

    #[test]
    fn test_build_empty_query() {
        let request = QueryBuilder::default().basic_request(Page::default());
        let body = build_search_body(&request);

        assert_eq!(body["from"], 0);
        assert_eq!(body["size"], 100);
        assert_eq!(body["track_total_hits"], true);
        assert!(body["query"]["match_all"].is_object());
    }

    #[test]
    fn test_build_match_query() {
        let request =
            QueryBuilder::default().match_query("description", "Pizza", Page::new(10, 50));
        let body = build_search_body(&request);

        assert_eq!(body["from"], 10);
        assert_eq!(body["size"], 50);

        let clause = &body["query"]["match"]["description"];
        assert_eq!(clause["query"], "Pizza");
        assert_eq!(clause["operator"], "and");
        assert_eq!(clause["fuzziness"], "AUTO");
    }

    #[test]
    fn test_build_match_query_fixed_edits() {
        let query = Query::Match(user_search_shared::MatchQuery {
            field: "description".to_string(),
            text: "pizza".to_string(),
            operator: user_search_shared::Operator::Or,
            fuzziness: Fuzziness::Edits(2),
        });
        let clause = build_query_clause(&query);

        assert_eq!(clause["match"]["description"]["operator"], "or");
        assert_eq!(clause["match"]["description"]["fuzziness"], 2);
    }

    #[test]
    fn test_build_prefix_query() {
        let request =
            QueryBuilder::default().prefix_query("name", "dan", Page::default().with_limit(200));
        let body = build_search_body(&request);

        assert_eq!(body["size"], 200);
        assert_eq!(body["query"], json!({ "prefix": { "name": { "value": "dan" } } }));
    }

    #[test]
    fn test_build_terms_query() {
        let request = QueryBuilder::default().terms_query(
            "description",
            ["Music", "eum"],
            Page::new(0, 10),
        );
        let body = build_search_body(&request);

        // Only a terms clause, values sorted by the set ordering
        let query = body["query"].as_object().unwrap();
        assert_eq!(query.len(), 1);
        assert_eq!(body["query"]["terms"]["description"], json!(["Music", "eum"]));
    }

    #[test]
    fn test_build_terms_query_empty_values() {
        let request = QueryBuilder::default().terms_query(
            "description",
            Vec::<String>::new(),
            Page::default(),
        );
        let body = build_search_body(&request);

        let values = body["query"]["terms"]["description"].as_array().unwrap();
        assert!(values.is_empty());
    }
}

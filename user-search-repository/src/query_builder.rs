//! Typed query builders.
//!
//! Every builder starts from the same paginated base request and sets exactly
//! one query clause. The builders are pure: they hold configuration only and
//! never retain state between calls.

use std::collections::BTreeSet;

use user_search_shared::{
    Fuzziness, MatchQuery, Operator, Page, PrefixQuery, Query, SearchRequest, TermsQuery,
};

use crate::config::DEFAULT_COLLECTION;

/// Options applied to every full-text match query.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct MatchOptions {
    /// Defaults to `Operator::And`.
    pub operator: Operator,
    /// Defaults to `Fuzziness::Auto`.
    pub fuzziness: Fuzziness,
}

/// Builds search requests against a single collection.
#[derive(Debug, Clone)]
pub struct QueryBuilder {
    collection: String,
    match_options: MatchOptions,
}

impl Default for QueryBuilder {
    fn default() -> Self {
        Self::new(DEFAULT_COLLECTION)
    }
}

impl QueryBuilder {
    /// Create a builder for the given collection with default match options.
    pub fn new(collection: impl Into<String>) -> Self {
        Self {
            collection: collection.into(),
            match_options: MatchOptions::default(),
        }
    }

    /// Override the operator and fuzziness used by `match_query`.
    pub fn with_match_options(mut self, match_options: MatchOptions) -> Self {
        self.match_options = match_options;
        self
    }

    pub fn collection(&self) -> &str {
        &self.collection
    }

    /// Base request: pagination with defaults applied, exact total hit
    /// counting, and an empty (match everything) query.
    pub fn basic_request(&self, page: Page) -> SearchRequest {
        SearchRequest {
            collection: self.collection.clone(),
            from: page.resolved_offset(),
            size: page.resolved_limit(),
            track_total_hits: true,
            query: Query::Empty,
        }
    }

    /// Full-text match of `text` against `field`.
    pub fn match_query(
        &self,
        field: impl Into<String>,
        text: impl Into<String>,
        page: Page,
    ) -> SearchRequest {
        SearchRequest {
            query: Query::Match(MatchQuery {
                field: field.into(),
                text: text.into(),
                operator: self.match_options.operator,
                fuzziness: self.match_options.fuzziness,
            }),
            ..self.basic_request(page)
        }
    }

    /// Documents whose `field` starts with `value`.
    pub fn prefix_query(
        &self,
        field: impl Into<String>,
        value: impl Into<String>,
        page: Page,
    ) -> SearchRequest {
        SearchRequest {
            query: Query::Prefix(PrefixQuery {
                field: field.into(),
                value: value.into(),
            }),
            ..self.basic_request(page)
        }
    }

    /// Documents whose `field` equals at least one of `values`.
    ///
    /// An empty `values` produces a request that matches nothing.
    pub fn terms_query<I, S>(&self, field: impl Into<String>, values: I, page: Page) -> SearchRequest
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let values: BTreeSet<String> = values.into_iter().map(Into::into).collect();

        SearchRequest {
            query: Query::Terms(TermsQuery {
                field: field.into(),
                values,
            }),
            ..self.basic_request(page)
        }
    }
}

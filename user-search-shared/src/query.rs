//! Backend-agnostic query clauses.
//!
//! A request carries exactly one `Query`. Each variant owns all of its
//! parameters, so there is no way to build a request with two clauses set.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

/// How the terms of a match query are combined.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Operator {
    /// Every term must match.
    #[default]
    And,
    /// At least one term must match.
    Or,
}

impl Operator {
    pub fn as_str(&self) -> &'static str {
        match self {
            Operator::And => "and",
            Operator::Or => "or",
        }
    }
}

/// Tolerance for approximate term matching. The backend owns the algorithm.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Fuzziness {
    /// Let the backend pick an edit distance from the term length.
    #[default]
    Auto,
    /// Fixed maximum edit distance.
    Edits(u8),
}

/// Full-text match on a single field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchQuery {
    pub field: String,
    pub text: String,
    pub operator: Operator,
    pub fuzziness: Fuzziness,
}

/// Exact-prefix match on a single field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PrefixQuery {
    pub field: String,
    pub value: String,
}

/// Matches documents whose `field` equals any of `values`.
///
/// An empty value set matches no documents.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TermsQuery {
    pub field: String,
    pub values: BTreeSet<String>,
}

/// The single active clause of a search request.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Query {
    /// Matches every document, in backend-default order.
    #[default]
    Empty,
    Match(MatchQuery),
    Prefix(PrefixQuery),
    Terms(TermsQuery),
}

impl Query {
    /// Short name of the active clause, for logging.
    pub fn kind(&self) -> &'static str {
        match self {
            Query::Empty => "empty",
            Query::Match(_) => "match",
            Query::Prefix(_) => "prefix",
            Query::Terms(_) => "terms",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        assert_eq!(Operator::default(), Operator::And);
        assert_eq!(Fuzziness::default(), Fuzziness::Auto);
        assert_eq!(Query::default(), Query::Empty);
    }

    #[test]
    fn test_terms_values_are_a_set() {
        let values: BTreeSet<String> = ["eum", "Music", "eum"]
            .into_iter()
            .map(String::from)
            .collect();
        let query = TermsQuery {
            field: "description".to_string(),
            values,
        };

        assert_eq!(query.values.len(), 2);
    }

    #[test]
    fn test_kind() {
        let prefix = Query::Prefix(PrefixQuery {
            field: "name".to_string(),
            value: "da".to_string(),
        });

        assert_eq!(prefix.kind(), "prefix");
        assert_eq!(Query::Empty.kind(), "empty");
    }
}

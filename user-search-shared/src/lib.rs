//! # User Search Shared
//!
//! Shared types used across the user search crates: the `User` record and its
//! partial update, pagination, the single-clause `Query` model, and the
//! backend-agnostic search request and response shapes.

mod ack;
mod query;
mod search;
mod user;

pub use ack::{Ack, WriteResult};
pub use query::{Fuzziness, MatchQuery, Operator, PrefixQuery, Query, TermsQuery};
pub use search::{Page, SearchHit, SearchRequest, SearchResponse, DEFAULT_LIMIT, DEFAULT_OFFSET};
pub use user::{User, UserUpdate};

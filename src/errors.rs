//! Error types for the query model.

use thiserror::Error;

/// Errors raised while building or decoding search queries.
#[derive(Debug, Error)]
pub enum QueryError {
    /// The `roles_cnf` payload is not a nested sequence of strings.
    #[error("malformed roles_cnf payload {input:?}: {message}")]
    MalformedCnf { input: String, message: String },

    /// An unknown lexicon version identifier.
    #[error("unknown lexicon version: {0}")]
    UnknownVersion(String),

    /// An unknown language filter code.
    #[error("unknown language code: {0}")]
    UnknownLanguage(String),

    /// Every scalar field is blank and no role constraint is present.
    #[error("empty query: at least one field or role clause is required")]
    EmptyQuery,

    /// The query builder's ownership bookkeeping disagrees with its clauses.
    #[error("query builder invariant violated: {0}")]
    InvariantViolation(String),

    /// A response could not be serialized.
    #[error("failed to serialize search response: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type for query operations.
pub type QueryResult<T> = Result<T, QueryError>;

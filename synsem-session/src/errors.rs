//! Error types for the search session.

use synsem_query::QueryError;
use thiserror::Error;

/// Failures reported by a [`crate::SearchTransport`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TransportError {
    /// The endpoint could not be reached.
    #[error("search service unavailable: {0}")]
    Unavailable(String),

    /// The endpoint did not answer in time.
    #[error("search request timed out")]
    Timeout,

    /// The endpoint answered with an error status.
    #[error("search service returned status {code}: {message}")]
    Status { code: u16, message: String },

    /// The response body could not be decoded.
    #[error("invalid response body: {0}")]
    Decode(String),

    /// The request was superseded before it completed.
    #[error("request cancelled")]
    Cancelled,
}

impl TransportError {
    /// Whether retrying the same request may succeed.
    pub fn is_transient(&self) -> bool {
        match self {
            TransportError::Unavailable(_) | TransportError::Timeout => true,
            TransportError::Status { code, .. } => *code >= 500 || *code == 429,
            TransportError::Decode(_) | TransportError::Cancelled => false,
        }
    }
}

/// Result type for transport calls.
pub type TransportResult<T> = Result<T, TransportError>;

/// Errors surfaced by [`crate::SearchSession`].
#[derive(Debug, Error)]
pub enum SessionError {
    /// Every scalar field is blank and the role query is empty.
    #[error("nothing to search for: fill in a field or build a role query")]
    EmptyQuery,

    #[error(transparent)]
    Query(QueryError),

    #[error(transparent)]
    Transport(#[from] TransportError),

    /// A configuration file could not be read or parsed.
    #[error("failed to load config: {path}: {message}")]
    Config { path: String, message: String },

    /// An export could not be written.
    #[error("failed to write export: {path}: {message}")]
    Export { path: String, message: String },
}

impl From<QueryError> for SessionError {
    fn from(err: QueryError) -> Self {
        match err {
            QueryError::EmptyQuery => SessionError::EmptyQuery,
            other => SessionError::Query(other),
        }
    }
}

/// Result type for session operations.
pub type SessionResult<T> = Result<T, SessionError>;

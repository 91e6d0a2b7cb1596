//! Error types for the evaluator.

use thiserror::Error;

/// Errors that can occur while loading evaluator inputs.
///
/// Evaluating a search never fails: malformed request parameters degrade
/// instead of erroring.
#[derive(Debug, Error)]
pub enum EvaluatorError {
    /// A configuration file could not be read or parsed.
    #[error("failed to load config: {path}: {message}")]
    Config { path: String, message: String },

    /// A lexicon file could not be read.
    #[error("failed to load lexicon: {path}: {message}")]
    Load { path: String, message: String },

    /// Lexicon data is not valid JSON for the member schema.
    #[error("invalid lexicon data: {0}")]
    Lexicon(#[from] serde_json::Error),
}

/// Result type for evaluator operations.
pub type EvaluatorResult<T> = Result<T, EvaluatorError>;

//! Error types for the scenario harness.

use thiserror::Error;

/// Errors that can occur while loading or checking fixtures.
#[derive(Debug, Error)]
pub enum SpecError {
    /// A fixture file is not valid TOML for the fixture schema.
    #[error("failed to parse fixture: {path}: {message}")]
    Parse { path: String, message: String },

    /// A fixture file or directory could not be read.
    #[error("failed to load fixture: {path}: {message}")]
    Load { path: String, message: String },

    /// A fixture is well-formed but unusable, e.g. it has no cases.
    #[error("invalid fixture {path}: {message}")]
    Invalid { path: String, message: String },
}

/// Result type for spec operations.
pub type SpecResult<T> = Result<T, SpecError>;

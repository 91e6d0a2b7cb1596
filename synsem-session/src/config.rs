//! Session configuration.

use crate::errors::{SessionError, SessionResult};
use crate::retry::RetryPolicy;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use synsem_query::Version;

/// Settings for a [`crate::SearchSession`], loadable from TOML.
///
/// ```toml
/// default_version = "synsemclass5.0"
///
/// [retry]
/// max_attempts = 4
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    /// Lexicon version of a fresh session.
    pub default_version: Version,
    pub retry: RetryPolicy,
}

impl SessionConfig {
    /// Load from a TOML file. A missing file yields the defaults.
    pub fn load(path: &Path) -> SessionResult<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path).map_err(|e| SessionError::Config {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;

        toml::from_str(&content).map_err(|e| SessionError::Config {
            path: path.display().to_string(),
            message: e.to_string(),
        })
    }
}

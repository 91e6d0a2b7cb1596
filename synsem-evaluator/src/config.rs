//! Evaluator configuration.

use crate::errors::{EvaluatorError, EvaluatorResult};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Class groups per result page when none is configured.
pub const DEFAULT_PAGE_SIZE: usize = 5;

/// Settings for the search evaluator, loadable from TOML.
///
/// ```toml
/// page_size = 10
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EvaluatorConfig {
    /// Class groups per page. Zero is treated as one.
    pub page_size: usize,
}

impl Default for EvaluatorConfig {
    fn default() -> Self {
        Self {
            page_size: DEFAULT_PAGE_SIZE,
        }
    }
}

impl EvaluatorConfig {
    pub fn with_page_size(page_size: usize) -> Self {
        Self { page_size }
    }

    /// Load from a TOML file. A missing file yields the defaults.
    pub fn load(path: &Path) -> EvaluatorResult<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path).map_err(|e| EvaluatorError::Config {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;

        toml::from_str(&content).map_err(|e| EvaluatorError::Config {
            path: path.display().to_string(),
            message: e.to_string(),
        })
    }

    pub(crate) fn effective_page_size(&self) -> usize {
        self.page_size.max(1)
    }
}

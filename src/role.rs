//! Semantic role labels.

use serde::{Deserialize, Serialize};
use std::borrow::Borrow;
use std::fmt;

/// A semantic role label such as `Actor` or `Patient`.
///
/// Labels are opaque and case-sensitive. The set of valid labels for a
/// lexicon version comes from the shortlabel vocabulary and is not checked
/// here.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Role(String);

impl Role {
    pub fn new(label: impl Into<String>) -> Self {
        Self(label.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Role {
    fn from(label: &str) -> Self {
        Self::new(label)
    }
}

impl From<String> for Role {
    fn from(label: String) -> Self {
        Self(label)
    }
}

impl Borrow<str> for Role {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for Role {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Build a list of roles from string labels.
///
/// ```
/// use synsem_query::roles;
///
/// let rs = roles(&["Actor", "Patient"]);
/// assert_eq!(rs[1].as_str(), "Patient");
/// ```
pub fn roles(labels: &[&str]) -> Vec<Role> {
    labels.iter().map(|label| Role::from(*label)).collect()
}

//! Conjunctive Normal Form role queries.
//!
//! A [`CnfQuery`] is an AND of clauses where each clause is an OR of
//! [`Role`]s. It is the value that crosses the wire in the `roles_cnf`
//! parameter and the value the evaluator matches against a class member's
//! role set.
//!
//! ```
//! use synsem_query::{roles, CnfQuery};
//!
//! let cnf = CnfQuery::new(vec![roles(&["Actor", "Agent"]), roles(&["Patient"])]);
//! assert_eq!(cnf.to_string(), "(Actor OR Agent) AND (Patient)");
//! assert!(cnf.is_satisfied_by(&roles(&["Agent", "Patient", "Time"])));
//! assert!(!cnf.is_satisfied_by(&roles(&["Agent"])));
//! ```

use crate::errors::{QueryError, QueryResult};
use crate::Role;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeSet, HashSet};
use std::fmt;

/// A normalized CNF role query.
///
/// Normalization drops empty clauses and duplicate roles inside a clause,
/// keeping the first occurrence. An empty query places no constraint on
/// roles.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct CnfQuery(Vec<Vec<Role>>);

impl CnfQuery {
    pub fn new(clauses: Vec<Vec<Role>>) -> Self {
        let clauses = clauses
            .into_iter()
            .map(|clause| {
                let mut seen = HashSet::new();
                clause
                    .into_iter()
                    .filter(|role| seen.insert(role.clone()))
                    .collect::<Vec<_>>()
            })
            .filter(|clause| !clause.is_empty())
            .collect();
        Self(clauses)
    }

    /// The unconstrained query.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Parse the JSON wire form (`[["Actor","Agent"],["Patient"]]`).
    ///
    /// An empty string is accepted as the unconstrained query.
    pub fn from_json(input: &str) -> QueryResult<Self> {
        let trimmed = input.trim();
        if trimmed.is_empty() {
            return Ok(Self::empty());
        }
        let clauses: Option<Vec<Vec<Role>>> =
            serde_json::from_str(trimmed).map_err(|e| QueryError::MalformedCnf {
                input: input.to_string(),
                message: e.to_string(),
            })?;
        Ok(Self::new(clauses.unwrap_or_default()))
    }

    pub fn to_json(&self) -> String {
        // Nested string vectors always serialize.
        serde_json::to_string(&self.0).unwrap_or_else(|_| "[]".to_string())
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn clauses(&self) -> &[Vec<Role>] {
        &self.0
    }

    /// Every role mentioned anywhere in the query.
    pub fn role_union(&self) -> BTreeSet<&Role> {
        self.0.iter().flatten().collect()
    }

    /// Plain CNF satisfaction: every clause shares at least one role with
    /// `member_roles`. The empty query is always satisfied.
    pub fn is_satisfied_by(&self, member_roles: &[Role]) -> bool {
        let held: HashSet<&str> = member_roles.iter().map(Role::as_str).collect();
        self.0
            .iter()
            .all(|clause| clause.iter().any(|role| held.contains(role.as_str())))
    }

    /// CNF satisfaction plus, when `exact` is set, the requirement that the
    /// member carries no role outside [`CnfQuery::role_union`].
    ///
    /// Exactness has no effect on the empty query.
    pub fn matches(&self, member_roles: &[Role], exact: bool) -> bool {
        if self.is_empty() {
            return true;
        }
        if !self.is_satisfied_by(member_roles) {
            return false;
        }
        if !exact {
            return true;
        }
        let union = self.role_union();
        member_roles.iter().all(|role| union.contains(role))
    }
}

impl<'de> Deserialize<'de> for CnfQuery {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let clauses = Option::<Vec<Vec<Role>>>::deserialize(deserializer)?;
        Ok(Self::new(clauses.unwrap_or_default()))
    }
}

/// Human-readable rendering: `(A OR B) AND (C)`.
impl fmt::Display for CnfQuery {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (idx, clause) in self.0.iter().enumerate() {
            if idx > 0 {
                f.write_str(" AND ")?;
            }
            f.write_str("(")?;
            for (role_idx, role) in clause.iter().enumerate() {
                if role_idx > 0 {
                    f.write_str(" OR ")?;
                }
                f.write_str(role.as_str())?;
            }
            f.write_str(")")?;
        }
        Ok(())
    }
}

impl From<Vec<Vec<Role>>> for CnfQuery {
    fn from(clauses: Vec<Vec<Role>>) -> Self {
        Self::new(clauses)
    }
}

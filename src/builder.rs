//! Incremental construction of CNF role queries.
//!
//! The [`QueryBuilder`] holds the working state behind the role-query form:
//! an ordered list of clauses, a pool of selected-but-unassigned roles, and an
//! ownership map recording where every selected role currently lives. A role
//! is owned by at most one slot (the pool or a single clause) at a time.
//!
//! ## Usage
//!
//! ```
//! use synsem_query::{QueryBuilder, Role};
//!
//! let mut builder = QueryBuilder::new();
//!
//! // The first selected role seeds the first clause directly.
//! builder.select_role(Role::from("Actor"));
//!
//! // Later selections wait in the pool until assigned.
//! builder.select_role(Role::from("Patient"));
//! builder.select_role(Role::from("Theme"));
//! let second = builder.add_clause();
//! builder.add_role_to_clause(second, Role::from("Patient"));
//! builder.add_role_to_clause(second, Role::from("Theme"));
//!
//! assert_eq!(builder.to_readable_string(), "(Actor) AND (Patient OR Theme)");
//! assert!(builder.pool().is_empty());
//! ```

use crate::errors::{QueryError, QueryResult};
use crate::{CnfQuery, Role};
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use std::fmt;

/// Stable identifier of a clause within one builder.
///
/// Identifiers are handed out in increasing order and never reused, so an
/// identifier held by a caller keeps addressing the same clause after other
/// clauses are removed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ClauseId(u32);

impl ClauseId {
    pub fn get(self) -> u32 {
        self.0
    }
}

impl fmt::Display for ClauseId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "clause#{}", self.0)
    }
}

/// One OR-group of roles.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Clause {
    id: ClauseId,
    roles: Vec<Role>,
}

impl Clause {
    pub fn id(&self) -> ClauseId {
        self.id
    }

    /// Roles in insertion order.
    pub fn roles(&self) -> &[Role] {
        &self.roles
    }

    pub fn is_empty(&self) -> bool {
        self.roles.is_empty()
    }

    pub fn contains(&self, role: &Role) -> bool {
        self.roles.contains(role)
    }
}

/// Where a selected role currently lives.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Slot {
    /// Selected but not yet assigned to a clause.
    Pool,
    /// Owned by the clause with this identifier.
    Clause(ClauseId),
}

/// Working state of a CNF role query under construction.
#[derive(Debug, Clone, Default)]
pub struct QueryBuilder {
    clauses: Vec<Clause>,
    pool: Vec<Role>,
    owners: HashMap<Role, Slot>,
    next_id: u32,
}

impl QueryBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a builder with one single-role clause per role.
    ///
    /// Used to turn the role set of a result member into a query. Repeated
    /// roles are skipped.
    pub fn from_roles<I>(roles: I) -> Self
    where
        I: IntoIterator<Item = Role>,
    {
        let mut builder = Self::new();
        for role in roles {
            if builder.owners.contains_key(&role) {
                continue;
            }
            let id = builder.push_clause();
            builder.insert_into_clause(id, role);
        }
        builder.check();
        builder
    }

    /// Rebuild a builder from a decoded query, one clause per CNF clause.
    ///
    /// A role that appears in more than one clause stays with the first.
    pub fn from_cnf(cnf: &CnfQuery) -> Self {
        let mut builder = Self::new();
        for clause in cnf.clauses() {
            let id = builder.push_clause();
            for role in clause {
                if !builder.owners.contains_key(role) {
                    builder.insert_into_clause(id, role.clone());
                }
            }
        }
        builder.clauses.retain(|clause| !clause.is_empty());
        builder.check();
        builder
    }

    /// Clauses in positional order, including empty ones.
    pub fn clauses(&self) -> &[Clause] {
        &self.clauses
    }

    pub fn clause(&self, id: ClauseId) -> Option<&Clause> {
        self.clauses.iter().find(|clause| clause.id == id)
    }

    /// Roles selected but not yet assigned, in selection order.
    pub fn pool(&self) -> &[Role] {
        &self.pool
    }

    pub fn owner_of(&self, role: &Role) -> Option<Slot> {
        self.owners.get(role).copied()
    }

    /// True when no clause and no pooled role exist.
    pub fn is_empty(&self) -> bool {
        self.clauses.is_empty() && self.pool.is_empty()
    }

    /// Select a role from the vocabulary.
    ///
    /// With no clauses yet, the role seeds the first clause and skips the
    /// pool. Otherwise it is placed in the pool. Selecting a role that is
    /// already pooled or assigned does nothing.
    pub fn select_role(&mut self, role: Role) -> bool {
        if self.owners.contains_key(&role) {
            return false;
        }
        if self.clauses.is_empty() {
            let id = self.push_clause();
            self.insert_into_clause(id, role);
        } else {
            self.owners.insert(role.clone(), Slot::Pool);
            self.pool.push(role);
        }
        self.check();
        true
    }

    /// Deselect a role that is waiting in the pool.
    ///
    /// Roles held by a clause are left alone; use
    /// [`QueryBuilder::remove_role_from_clause`] for those.
    pub fn remove_pooled_role(&mut self, role: &Role) -> bool {
        if self.owners.get(role) != Some(&Slot::Pool) {
            return false;
        }
        self.pool.retain(|pooled| pooled != role);
        self.owners.remove(role);
        self.check();
        true
    }

    /// Append an empty clause and return its identifier.
    pub fn add_clause(&mut self) -> ClauseId {
        let id = self.push_clause();
        self.check();
        id
    }

    /// Remove a clause by identifier. Its roles become unselected.
    pub fn remove_clause(&mut self, id: ClauseId) -> bool {
        let Some(pos) = self.position(id) else {
            return false;
        };
        let clause = self.clauses.remove(pos);
        for role in &clause.roles {
            self.owners.remove(role);
        }
        self.check();
        true
    }

    /// Assign a role to a clause, taking it out of the pool.
    ///
    /// Does nothing when the clause does not exist or when the role is owned
    /// by a different clause. Adding a role the clause already holds is a
    /// no-op.
    pub fn add_role_to_clause(&mut self, id: ClauseId, role: Role) -> bool {
        if self.position(id).is_none() {
            return false;
        }
        match self.owners.get(&role).copied() {
            Some(Slot::Clause(_)) => return false,
            Some(Slot::Pool) => self.pool.retain(|pooled| pooled != &role),
            None => {}
        }
        self.insert_into_clause(id, role);
        self.check();
        true
    }

    /// Remove a role from a clause.
    ///
    /// When the clause is the first one positionally and ends up empty, the
    /// clause itself is dropped. Later clauses are kept even when empty.
    pub fn remove_role_from_clause(&mut self, id: ClauseId, role: &Role) -> bool {
        let Some(pos) = self.position(id) else {
            return false;
        };
        let clause = &mut self.clauses[pos];
        let before = clause.roles.len();
        clause.roles.retain(|held| held != role);
        if clause.roles.len() == before {
            return false;
        }
        self.owners.remove(role);
        if pos == 0 && self.clauses[0].is_empty() {
            self.clauses.remove(0);
        }
        self.check();
        true
    }

    /// Drop every clause, pooled role and ownership record.
    ///
    /// Identifier allocation continues from where it was so that stale
    /// identifiers never address a new clause.
    pub fn clear(&mut self) {
        self.clauses.clear();
        self.pool.clear();
        self.owners.clear();
    }

    /// The serializable query: non-empty clauses in order.
    pub fn to_cnf(&self) -> CnfQuery {
        CnfQuery::new(
            self.clauses
                .iter()
                .filter(|clause| !clause.is_empty())
                .map(|clause| clause.roles.clone())
                .collect(),
        )
    }

    /// Readable rendering of exactly what [`QueryBuilder::to_cnf`] returns.
    pub fn to_readable_string(&self) -> String {
        self.to_cnf().to_string()
    }

    /// Check the ownership map against the clause and pool contents.
    pub fn validate(&self) -> QueryResult<()> {
        let mut seen_ids = HashSet::new();
        let mut expected = 0usize;

        for clause in &self.clauses {
            if !seen_ids.insert(clause.id) {
                return Err(QueryError::InvariantViolation(format!(
                    "duplicate {}",
                    clause.id
                )));
            }
            if clause.id.0 >= self.next_id {
                return Err(QueryError::InvariantViolation(format!(
                    "{} was never allocated",
                    clause.id
                )));
            }
            for role in &clause.roles {
                expected += 1;
                if self.owners.get(role) != Some(&Slot::Clause(clause.id)) {
                    return Err(QueryError::InvariantViolation(format!(
                        "role {} in {} is owned by {:?}",
                        role,
                        clause.id,
                        self.owners.get(role)
                    )));
                }
            }
        }

        for role in &self.pool {
            expected += 1;
            if self.owners.get(role) != Some(&Slot::Pool) {
                return Err(QueryError::InvariantViolation(format!(
                    "pooled role {} is owned by {:?}",
                    role,
                    self.owners.get(role)
                )));
            }
        }

        // Equal counts with every entry matched means no role is held twice.
        if expected != self.owners.len() {
            return Err(QueryError::InvariantViolation(format!(
                "{} ownership records for {} held roles",
                self.owners.len(),
                expected
            )));
        }

        Ok(())
    }

    fn position(&self, id: ClauseId) -> Option<usize> {
        self.clauses.iter().position(|clause| clause.id == id)
    }

    fn push_clause(&mut self) -> ClauseId {
        let id = ClauseId(self.next_id);
        self.next_id += 1;
        self.clauses.push(Clause { id, roles: Vec::new() });
        id
    }

    fn insert_into_clause(&mut self, id: ClauseId, role: Role) {
        if let Some(pos) = self.position(id) {
            let clause = &mut self.clauses[pos];
            if !clause.roles.contains(&role) {
                clause.roles.push(role.clone());
            }
            self.owners.insert(role, Slot::Clause(id));
        }
    }

    fn check(&self) {
        if let Err(err) = self.validate() {
            debug_assert!(false, "query builder invariant violated: {}", err);
            tracing::error!(%err, "query builder invariant violated");
        }
    }
}

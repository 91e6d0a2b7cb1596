//! Query model for SynSemClass lexicon search.
//!
//! SynSemClass is a multilingual, role-labelled valency lexicon. A search
//! combines free-text filters (lemma, sense ID, class ID, CM note,
//! restriction) with a role query in Conjunctive Normal Form: an AND of
//! clauses, each clause an OR of semantic roles.
//!
//! ## Modules
//!
//! - [`builder`] - Incremental construction of role queries
//! - [`cnf`] - The normalized CNF query and its matching rules
//! - [`request`] - Immutable search requests, versions and languages
//! - [`wire`] - Query-string parameters and lenient decoding
//! - [`response`] - Result pages, class groups and counts
//! - [`export`] - JSON export naming
//! - [`errors`] - Error types
//!
//! ## Example
//!
//! ```
//! use synsem_query::{Language, QueryBuilder, Role, SearchParams, SearchRequest};
//!
//! let mut builder = QueryBuilder::new();
//! builder.select_role(Role::from("Actor"));
//!
//! let request = SearchRequest::new()
//!     .with_lemma("bring")
//!     .with_language(Language::Eng, true)
//!     .with_roles(builder.to_cnf());
//! assert!(request.validate().is_ok());
//!
//! let params = SearchParams::from(&request);
//! assert_eq!(params.roles_cnf, r#"[["Actor"]]"#);
//! ```

pub mod builder;
pub mod cnf;
pub mod errors;
pub mod export;
pub mod request;
pub mod response;
mod role;
pub mod wire;

pub use builder::{Clause, ClauseId, QueryBuilder, Slot};
pub use cnf::CnfQuery;
pub use errors::{QueryError, QueryResult};
pub use export::{export_file_name, ExportDocument};
pub use request::{Language, SearchRequest, Version};
pub use response::{ClassGroup, ClassMember, LangCount, SearchResponse};
pub use role::{roles, Role};
pub use wire::{format_flag, parse_flag, SearchParams};

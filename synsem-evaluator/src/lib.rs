//! Search evaluation over SynSemClass lexicon data.
//!
//! This crate answers the `search` and `shortlabels` operations for a
//! lexicon held in memory. It pairs with `synsem-query`, which defines the
//! request, the wire parameters and the response shape.
//!
//! A search keeps every class member that passes all of its filters (text
//! patterns, language set and the role CNF), groups the matches by common
//! class identifier and splits the groups into pages.

pub mod config;
pub mod diacritics;
pub mod errors;
pub mod evaluator;
pub mod filters;
pub mod lexicon;

pub use config::{EvaluatorConfig, DEFAULT_PAGE_SIZE};
pub use diacritics::{expand_diacritics, strip_diacritics};
pub use errors::{EvaluatorError, EvaluatorResult};
pub use evaluator::Evaluator;
pub use filters::{MemberFilter, TextPattern};
pub use lexicon::{Lexicon, MemberSource};

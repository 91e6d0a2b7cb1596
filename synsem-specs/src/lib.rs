//! Fixture-driven scenario testing for the SynSemClass search evaluator.
//!
//! Each fixture under `fixtures/` is a TOML file holding a tiny lexicon and
//! a list of searches with their expected results. The harness loads the
//! fixtures, runs every search through [`synsem_evaluator::Evaluator`] and
//! reports mismatches.
//!
//! ## Modules
//!
//! - [`fixture`] - Fixture schema
//! - [`loader`] - Fixture file loading
//! - [`runner`] - Executes cases and compares results
//! - [`formatter`] - Failure and summary reports
//! - [`errors`] - Error types for the harness

pub mod errors;
pub mod fixture;
pub mod formatter;
pub mod loader;
pub mod runner;

pub use errors::{SpecError, SpecResult};
pub use fixture::{FixtureMember, SearchCase, SearchFixture};
pub use formatter::{format_failure, format_summary};
pub use loader::{load_all_fixtures, load_fixture, parse_fixture};
pub use runner::{run_case, run_fixture, CaseOutcome, CaseResult, FixtureReport, Mismatch};

//! querycheck — verifies the query semantics of a vacancy search API.
//!
//! Each [`Case`](querycheck_core::Case) sends one query to the endpoint and
//! checks every returned record against the predicate its grammar implies.
//! This crate holds the enumerated case list, the runner and its reports; the
//! grammar and predicates live in `querycheck-core`, the HTTP side in
//! `querycheck-client`.
//!
//! # Flow
//!
//! ```text
//! Case ──► QueryClient ──► SemanticPredicate ──► CaseReport ──► SuiteReport
//! ```
//!
//! Cases run one after another on a single task; a failing or erroring case
//! never stops the ones after it.

pub mod report;
pub mod runner;
pub mod suite;

pub use report::{CaseReport, Outcome, SuiteReport};
pub use runner::{run_case, run_suite};

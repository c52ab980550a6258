//! querycheck-core — query grammar and semantic assertions for querycheck.
//!
//! This crate holds everything that does not touch the network: the data
//! model shared by the client and the runner, the parser for the search
//! endpoint's query grammar, and the engine that turns a query into a
//! predicate over returned records.
//!
//! # Architecture
//!
//! ```text
//! Query ──► QueryExpr ──► SemanticPredicate ──► Verdict
//!   │                           ▲
//!   └── Expectation ────────────┘
//! ```
//!
//! Nothing in here holds state across cases; every value is built for one
//! case and dropped after its verdict is produced.

pub mod case;
pub mod config;
pub mod error;
pub mod predicate;
pub mod query;
pub mod types;

pub use case::{Case, Check, Expectation, GrammarFeature};
pub use config::{Config, EndpointConfig, FieldAlias, FieldMap};
pub use error::{CompileError, ParseError};
pub use predicate::{
    AssertionOutcome, Matcher, RecordFailure, SemanticPredicate, Verdict, Violation,
};
pub use query::{QueryExpr, Term, TermKind};
pub use types::{Query, ResultRecord};

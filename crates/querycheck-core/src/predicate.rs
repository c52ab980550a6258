//! Semantic assertions. Turns a query and its expectation into a predicate
//! over returned records and evaluates it.
//!
//! # Rules per grammar feature
//!
//! | Feature | Rule |
//! |---------|------|
//! | free text / `AND` | every term is a substring of the record text |
//! | `OR` | at least one alternative matches |
//! | `A NOT B` | `A` matches and `B` does not |
//! | `!term` | the term is present (the marker only affects ranking) |
//! | `term*` | text matches `term\w*` |
//! | `FIELD:(...)` | sub-expression evaluated against that field only |
//! | pattern | text matches a fixed regex |
//! | stems | text contains a term or one of its declared stems |
//! | synonyms | some record lacking the term carries a synonym |
//! | no results | the result set is empty |
//!
//! Record text is lower-cased, and so is every needle, except inside a field
//! alias marked `exact`, where both sides keep their casing.

use regex::Regex;
use serde::Serialize;
use serde_json::Value;

use crate::case::{Expectation, GrammarFeature};
use crate::config::FieldMap;
use crate::error::CompileError;
use crate::query::{QueryExpr, Term, TermKind};
use crate::types::{Query, ResultRecord};

// ---------------------------------------------------------------------------
// Matcher
// ---------------------------------------------------------------------------

/// Compiled boolean expression over one record.
#[derive(Debug, Clone)]
pub enum Matcher {
    Contains(String),
    Pattern(Regex),
    All(Vec<Matcher>),
    Any(Vec<Matcher>),
    Not(Box<Matcher>),
    /// Evaluate `inner` against the value at `path` instead of the whole
    /// record. A missing field never matches.
    Field { path: String, exact: bool, inner: Box<Matcher> },
}

impl Matcher {
    /// Evaluate against the whole record.
    pub fn matches(&self, record: &ResultRecord) -> bool {
        self.matches_text(record, record.text())
    }

    fn matches_text(&self, record: &ResultRecord, text: &str) -> bool {
        match self {
            Matcher::Contains(needle) => text.contains(needle.as_str()),
            Matcher::Pattern(re) => re.is_match(text),
            Matcher::All(items) => items.iter().all(|m| m.matches_text(record, text)),
            Matcher::Any(items) => items.iter().any(|m| m.matches_text(record, text)),
            Matcher::Not(inner) => !inner.matches_text(record, text),
            Matcher::Field { path, exact, inner } => match record.field_text(path) {
                Some(value) if *exact => inner.matches_text(record, &value),
                Some(value) => inner.matches_text(record, &value.to_lowercase()),
                None => false,
            },
        }
    }

    /// Per-record outcome; failures carry the record for the report.
    pub fn check(&self, index: usize, record: &ResultRecord) -> AssertionOutcome {
        if self.matches(record) {
            AssertionOutcome::Passed { index }
        } else {
            AssertionOutcome::Failed(RecordFailure { index, record: record.raw().clone() })
        }
    }
}

impl std::fmt::Display for Matcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        fn list(
            f: &mut std::fmt::Formatter<'_>,
            name: &str,
            items: &[Matcher],
        ) -> std::fmt::Result {
            write!(f, "{name}(")?;
            for (i, item) in items.iter().enumerate() {
                if i > 0 {
                    f.write_str(", ")?;
                }
                write!(f, "{item}")?;
            }
            f.write_str(")")
        }

        match self {
            Matcher::Contains(needle) => write!(f, "contains({needle:?})"),
            Matcher::Pattern(re) => write!(f, "matches(/{}/)", re.as_str()),
            Matcher::All(items) => list(f, "all", items),
            Matcher::Any(items) => list(f, "any", items),
            Matcher::Not(inner) => write!(f, "not({inner})"),
            Matcher::Field { path, exact: true, inner } => {
                write!(f, "field({path}, exact: {inner})")
            }
            Matcher::Field { path, inner, .. } => write!(f, "field({path}: {inner})"),
        }
    }
}

// ---------------------------------------------------------------------------
// Outcomes
// ---------------------------------------------------------------------------

/// Result of checking one record.
#[derive(Debug, Clone, PartialEq)]
pub enum AssertionOutcome {
    Passed { index: usize },
    Failed(RecordFailure),
}

impl AssertionOutcome {
    pub fn passed(&self) -> bool {
        matches!(self, AssertionOutcome::Passed { .. })
    }
}

/// A record that violated its case's predicate.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RecordFailure {
    /// Position in the returned result set.
    pub index: usize,
    pub record: Value,
}

/// Why a case failed.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Violation {
    /// Records that do not satisfy `rule`.
    Records { rule: String, checked: usize, failures: Vec<RecordFailure> },
    /// A result set that should be empty was not.
    NotEmpty { count: usize },
    /// None of the records lacking `term` carried a synonym.
    NoSynonymMatch { term: String, candidates: usize },
    /// The endpoint probe answered something other than 200.
    Status { expected: u16, actual: u16 },
}

impl std::fmt::Display for Violation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Violation::Records { rule, checked, failures } => write!(
                f,
                "{} of {} records violate {}",
                failures.len(),
                checked,
                rule
            ),
            Violation::NotEmpty { count } => write!(f, "expected no results, got {count}"),
            Violation::NoSynonymMatch { term, candidates } => write!(
                f,
                "no synonym of {term:?} found among {candidates} records lacking the term"
            ),
            Violation::Status { expected, actual } => {
                write!(f, "expected status {expected}, got {actual}")
            }
        }
    }
}

/// Verdict for a whole result set.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "verdict", rename_all = "snake_case")]
pub enum Verdict {
    Pass { checked: usize },
    Fail { violation: Violation },
}

impl Verdict {
    pub fn passed(&self) -> bool {
        matches!(self, Verdict::Pass { .. })
    }

    /// Fold per-record outcomes: one failure fails the set.
    pub fn from_outcomes(rule: &Matcher, outcomes: Vec<AssertionOutcome>) -> Self {
        let checked = outcomes.len();
        let failures: Vec<RecordFailure> = outcomes
            .into_iter()
            .filter_map(|outcome| match outcome {
                AssertionOutcome::Passed { .. } => None,
                AssertionOutcome::Failed(failure) => Some(failure),
            })
            .collect();

        if failures.is_empty() {
            Verdict::Pass { checked }
        } else {
            Verdict::Fail {
                violation: Violation::Records { rule: rule.to_string(), checked, failures },
            }
        }
    }
}

// ---------------------------------------------------------------------------
// SemanticPredicate
// ---------------------------------------------------------------------------

#[derive(Debug, Clone)]
enum Rule {
    EachRecord(Matcher),
    Synonyms { term: String, synonyms: Vec<String> },
    Empty,
}

/// Predicate built once per case and applied to every returned record.
#[derive(Debug, Clone)]
pub struct SemanticPredicate {
    feature: GrammarFeature,
    rule: Rule,
}

impl SemanticPredicate {
    /// Build the predicate for `query` under `expect`.
    ///
    /// `NoResults` and `Pattern` never parse the query, so garbage queries
    /// are fine there. Every other expectation needs a parsable query.
    pub fn compile(
        query: &Query,
        expect: &Expectation,
        fields: &FieldMap,
    ) -> Result<Self, CompileError> {
        let feature = GrammarFeature::classify(query, expect);
        let rule = match expect {
            Expectation::NoResults => Rule::Empty,
            Expectation::Pattern { pattern } => Rule::EachRecord(Matcher::Pattern(
                Regex::new(pattern).map_err(|source| CompileError::InvalidPattern {
                    pattern: pattern.clone(),
                    source,
                })?,
            )),
            Expectation::Stems { stems } => {
                let expr = parse(query)?;
                let mut alternatives = literal_needles(query, &expr)?;
                alternatives.extend(stems.iter().map(|s| s.to_lowercase()));
                Rule::EachRecord(Matcher::Any(
                    alternatives.into_iter().map(Matcher::Contains).collect(),
                ))
            }
            Expectation::Synonyms { synonyms } => {
                let expr = parse(query)?;
                let term = literal_needles(query, &expr)?.remove(0);
                Rule::Synonyms {
                    term,
                    synonyms: synonyms.iter().map(|s| s.to_lowercase()).collect(),
                }
            }
            Expectation::Conforms => Rule::EachRecord(compile_expr(&parse(query)?, fields, false)?),
        };

        tracing::debug!(query = %query, %feature, rule = ?rule, "predicate compiled");
        Ok(Self { feature, rule })
    }

    pub fn feature(&self) -> GrammarFeature {
        self.feature
    }

    /// The per-record matcher, if this predicate is decided record by record.
    pub fn matcher(&self) -> Option<&Matcher> {
        match &self.rule {
            Rule::EachRecord(matcher) => Some(matcher),
            Rule::Synonyms { .. } | Rule::Empty => None,
        }
    }

    /// Evaluate the whole result set.
    pub fn evaluate(&self, records: &[ResultRecord]) -> Verdict {
        match &self.rule {
            Rule::EachRecord(matcher) => {
                let outcomes = records
                    .iter()
                    .enumerate()
                    .map(|(index, record)| matcher.check(index, record))
                    .collect();
                Verdict::from_outcomes(matcher, outcomes)
            }
            Rule::Synonyms { term, synonyms } => {
                let candidates: Vec<&ResultRecord> =
                    records.iter().filter(|r| !r.text().contains(term.as_str())).collect();
                let found = candidates
                    .iter()
                    .any(|r| synonyms.iter().any(|s| r.text().contains(s.as_str())));
                if found {
                    Verdict::Pass { checked: records.len() }
                } else {
                    Verdict::Fail {
                        violation: Violation::NoSynonymMatch {
                            term: term.clone(),
                            candidates: candidates.len(),
                        },
                    }
                }
            }
            Rule::Empty if records.is_empty() => Verdict::Pass { checked: 0 },
            Rule::Empty => Verdict::Fail {
                violation: Violation::NotEmpty { count: records.len() },
            },
        }
    }
}

fn parse(query: &Query) -> Result<QueryExpr, CompileError> {
    query.parse().map_err(|source| CompileError::Parse {
        query: query.as_str().to_string(),
        source,
    })
}

/// Lower-cased texts of the terms a record must contain.
fn literal_needles(query: &Query, expr: &QueryExpr) -> Result<Vec<String>, CompileError> {
    let needles: Vec<String> = expr
        .positive_terms()
        .into_iter()
        .map(|term| term.text.to_lowercase())
        .collect();
    if needles.is_empty() {
        return Err(CompileError::EmptyTerms(query.as_str().to_string()));
    }
    Ok(needles)
}

fn compile_expr(expr: &QueryExpr, fields: &FieldMap, exact: bool) -> Result<Matcher, CompileError> {
    Ok(match expr {
        QueryExpr::Term(term) => compile_term(term, exact)?,
        QueryExpr::All(items) => Matcher::All(
            items
                .iter()
                .map(|item| compile_expr(item, fields, exact))
                .collect::<Result<_, _>>()?,
        ),
        QueryExpr::Any(items) => Matcher::Any(
            items
                .iter()
                .map(|item| compile_expr(item, fields, exact))
                .collect::<Result<_, _>>()?,
        ),
        QueryExpr::Not(inner) => Matcher::Not(Box::new(compile_expr(inner, fields, exact)?)),
        QueryExpr::Field { name, expr } => {
            let alias = fields
                .resolve(name)
                .ok_or_else(|| CompileError::UnknownField(name.clone()))?;
            Matcher::Field {
                path: alias.path.clone(),
                exact: alias.exact,
                inner: Box::new(compile_expr(expr, fields, alias.exact)?),
            }
        }
    })
}

// `!term` only lowers ranking on the endpoint; the term must still be there.
fn compile_term(term: &Term, exact: bool) -> Result<Matcher, CompileError> {
    let needle = if exact { term.text.clone() } else { term.text.to_lowercase() };
    Ok(match term.kind {
        TermKind::Word | TermKind::Phrase => Matcher::Contains(needle),
        TermKind::Prefix => {
            // the prefix must start a word
            let pattern = format!(r"\b{}\w*", regex::escape(&needle));
            let re = Regex::new(&pattern)
                .map_err(|source| CompileError::InvalidPattern { pattern, source })?;
            Matcher::Pattern(re)
        }
    })
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

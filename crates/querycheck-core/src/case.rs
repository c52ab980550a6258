//! Case model: what one verification case sends and expects back.

use serde::{Deserialize, Serialize};

use crate::types::Query;

/// What a case declares about the records the endpoint returns.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Expectation {
    /// Every record satisfies the predicate compiled from the query grammar.
    #[default]
    Conforms,
    /// Every record's normalised text matches a fixed regex. Patterns are
    /// applied to lower-cased text.
    Pattern { pattern: String },
    /// Every record contains a query term or one of the declared stems.
    Stems { stems: Vec<String> },
    /// Some record that lacks the literal term carries a declared synonym.
    Synonyms { synonyms: Vec<String> },
    /// The endpoint returns no records at all.
    NoResults,
}

/// Which part of the grammar a case exercises.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum GrammarFeature {
    FreeText,
    Adjacency,
    Stemming,
    Negation,
    Wildcard,
    Synonym,
    Boolean,
    FieldScoped,
    Invalid,
}

impl GrammarFeature {
    /// Classify a case. Set-level and pattern expectations decide on their
    /// own; otherwise the query's grammar does, most specific first.
    pub fn classify(query: &Query, expect: &Expectation) -> Self {
        match expect {
            Expectation::NoResults => return Self::Invalid,
            Expectation::Pattern { .. } => return Self::Adjacency,
            Expectation::Stems { .. } => return Self::Stemming,
            Expectation::Synonyms { .. } => return Self::Synonym,
            Expectation::Conforms => {}
        }

        let Ok(expr) = query.parse() else {
            return Self::Invalid;
        };
        if expr.has_field_scope() {
            Self::FieldScoped
        } else if query.has_operators() {
            Self::Boolean
        } else if expr.has_prefix_term() {
            Self::Wildcard
        } else if expr.has_marked_term() {
            Self::Negation
        } else {
            Self::FreeText
        }
    }
}

impl std::fmt::Display for GrammarFeature {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GrammarFeature::FreeText => write!(f, "free-text"),
            GrammarFeature::Adjacency => write!(f, "adjacency"),
            GrammarFeature::Stemming => write!(f, "stemming"),
            GrammarFeature::Negation => write!(f, "negation"),
            GrammarFeature::Wildcard => write!(f, "wildcard"),
            GrammarFeature::Synonym => write!(f, "synonym"),
            GrammarFeature::Boolean => write!(f, "boolean"),
            GrammarFeature::FieldScoped => write!(f, "field-scoped"),
            GrammarFeature::Invalid => write!(f, "invalid"),
        }
    }
}

/// What a case does against the endpoint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Check {
    /// Plain GET without a query; the endpoint must answer 200.
    Probe,
    Search { query: Query, expect: Expectation },
}

/// One named, independently runnable verification case.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Case {
    pub name: String,
    pub check: Check,
}

impl Case {
    pub fn probe(name: impl Into<String>) -> Self {
        Self { name: name.into(), check: Check::Probe }
    }

    pub fn search(name: impl Into<String>, query: impl Into<Query>, expect: Expectation) -> Self {
        Self {
            name: name.into(),
            check: Check::Search { query: query.into(), expect },
        }
    }

    pub fn query(&self) -> Option<&Query> {
        match &self.check {
            Check::Probe => None,
            Check::Search { query, .. } => Some(query),
        }
    }

    /// `None` for the probe, which exercises no grammar.
    pub fn feature(&self) -> Option<GrammarFeature> {
        match &self.check {
            Check::Probe => None,
            Check::Search { query, expect } => Some(GrammarFeature::classify(query, expect)),
        }
    }
}

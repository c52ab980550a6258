//! Error types for querycheck-core.

/// Why a query string could not be parsed into a [`QueryExpr`](crate::QueryExpr).
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseError {
    #[error("query is empty")]
    Empty,

    #[error("unbalanced parenthesis")]
    UnbalancedParen,

    #[error("operator {0} has no operand")]
    DanglingOperator(String),

    #[error("empty parenthesized group")]
    EmptyGroup,

    #[error("field scope {0}: has no expression")]
    EmptyField(String),

    #[error("term {0:?} has no text")]
    EmptyTerm(String),

    #[error("unterminated quoted phrase")]
    UnterminatedPhrase,
}

/// Why a [`SemanticPredicate`](crate::SemanticPredicate) could not be built
/// for a case.
#[derive(Debug, thiserror::Error)]
pub enum CompileError {
    #[error("cannot parse query {query:?}: {source}")]
    Parse {
        query: String,
        #[source]
        source: ParseError,
    },

    #[error("unknown field {0:?}; add it under [fields] in the config")]
    UnknownField(String),

    #[error("invalid pattern {pattern:?}: {source}")]
    InvalidPattern {
        pattern: String,
        #[source]
        source: regex::Error,
    },

    #[error("query {0:?} has no literal term to expand")]
    EmptyTerms(String),
}

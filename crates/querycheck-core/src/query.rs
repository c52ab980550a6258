//! Query grammar: lexer and recursive-descent parser for search queries.
//!
//! The grammar mirrors what the vacancy search endpoint accepts:
//!
//! ```text
//! query   := or
//! or      := and ( OR and )*
//! and     := unary ( [AND] unary | NOT unary )*
//! unary   := FIELD ':' primary | primary
//! primary := '(' or ')' | word | "phrase"
//! word    := ['!'] text ['*']
//! ```
//!
//! Keywords are matched case-insensitively, juxtaposed terms are an implicit
//! `AND`, and `A NOT B` reads as "A and not B". Field names are upper-case
//! identifiers (`NAME`, `COMPANY_NAME`).

use crate::error::ParseError;

// ---------------------------------------------------------------------------
// Grammar tree
// ---------------------------------------------------------------------------

/// Parsed form of a [`Query`](crate::Query).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QueryExpr {
    Term(Term),
    All(Vec<QueryExpr>),
    Any(Vec<QueryExpr>),
    Not(Box<QueryExpr>),
    Field { name: String, expr: Box<QueryExpr> },
}

/// A leaf of the grammar tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Term {
    /// Term text with grammar markers stripped.
    pub text: String,
    pub kind: TermKind,
    /// Carried the `!` prefix.
    pub marked: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TermKind {
    Word,
    /// `term*`
    Prefix,
    /// `"quoted phrase"`
    Phrase,
}

impl Term {
    pub fn word(text: impl Into<String>) -> Self {
        Self { text: text.into(), kind: TermKind::Word, marked: false }
    }

    fn from_raw(raw: &str) -> Result<Self, ParseError> {
        let (marked, rest) = match raw.strip_prefix('!') {
            Some(rest) => (true, rest),
            None => (false, raw),
        };
        let text = rest.trim_end_matches('*');
        if text.is_empty() {
            return Err(ParseError::EmptyTerm(raw.to_string()));
        }
        let kind = if text.len() < rest.len() { TermKind::Prefix } else { TermKind::Word };
        Ok(Self { text: text.to_string(), kind, marked })
    }
}

impl QueryExpr {
    fn all(mut items: Vec<QueryExpr>) -> Self {
        if items.len() == 1 {
            items.remove(0)
        } else {
            QueryExpr::All(items)
        }
    }

    fn any(mut items: Vec<QueryExpr>) -> Self {
        if items.len() == 1 {
            items.remove(0)
        } else {
            QueryExpr::Any(items)
        }
    }

    /// Every term in the tree, left to right, including negated ones.
    pub fn terms(&self) -> Vec<&Term> {
        let mut out = Vec::new();
        self.walk(&mut |expr| {
            if let QueryExpr::Term(term) = expr {
                out.push(term);
            }
        });
        out
    }

    /// Terms a matching record is expected to contain, i.e. those not under
    /// a `NOT`.
    pub fn positive_terms(&self) -> Vec<&Term> {
        let mut out = Vec::new();
        self.collect_positive(&mut out);
        out
    }

    fn collect_positive<'a>(&'a self, out: &mut Vec<&'a Term>) {
        match self {
            QueryExpr::Term(term) => out.push(term),
            QueryExpr::All(items) | QueryExpr::Any(items) => {
                items.iter().for_each(|item| item.collect_positive(out))
            }
            QueryExpr::Not(_) => {}
            QueryExpr::Field { expr, .. } => expr.collect_positive(out),
        }
    }

    pub fn has_field_scope(&self) -> bool {
        self.any_node(|expr| matches!(expr, QueryExpr::Field { .. }))
    }

    pub fn has_prefix_term(&self) -> bool {
        self.terms().iter().any(|t| t.kind == TermKind::Prefix)
    }

    pub fn has_marked_term(&self) -> bool {
        self.terms().iter().any(|t| t.marked)
    }

    fn any_node(&self, pred: impl Fn(&QueryExpr) -> bool) -> bool {
        let mut found = false;
        self.walk(&mut |expr| found |= pred(expr));
        found
    }

    fn walk<'a>(&'a self, visit: &mut impl FnMut(&'a QueryExpr)) {
        visit(self);
        match self {
            QueryExpr::Term(_) => {}
            QueryExpr::All(items) | QueryExpr::Any(items) => {
                items.iter().for_each(|item| item.walk(visit))
            }
            QueryExpr::Not(inner) => inner.walk(visit),
            QueryExpr::Field { expr, .. } => expr.walk(visit),
        }
    }
}

impl std::fmt::Display for Term {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.marked {
            f.write_str("!")?;
        }
        match self.kind {
            TermKind::Word => write!(f, "{}", self.text),
            TermKind::Prefix => write!(f, "{}*", self.text),
            TermKind::Phrase => write!(f, "\"{}\"", self.text),
        }
    }
}

/// Canonical rendering: explicit keywords, groups parenthesised.
impl std::fmt::Display for QueryExpr {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        fn join(
            f: &mut std::fmt::Formatter<'_>,
            items: &[QueryExpr],
            sep: &str,
        ) -> std::fmt::Result {
            for (i, item) in items.iter().enumerate() {
                if i > 0 {
                    f.write_str(sep)?;
                }
                match item {
                    QueryExpr::All(_) | QueryExpr::Any(_) => write!(f, "({item})")?,
                    _ => write!(f, "{item}")?,
                }
            }
            Ok(())
        }

        match self {
            QueryExpr::Term(term) => write!(f, "{term}"),
            QueryExpr::All(items) => join(f, items, " AND "),
            QueryExpr::Any(items) => join(f, items, " OR "),
            QueryExpr::Not(inner) => match inner.as_ref() {
                QueryExpr::All(_) | QueryExpr::Any(_) => write!(f, "NOT ({inner})"),
                _ => write!(f, "NOT {inner}"),
            },
            QueryExpr::Field { name, expr } => write!(f, "{name}:({expr})"),
        }
    }
}

// ---------------------------------------------------------------------------
// Lexer
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq)]
enum Token {
    LParen,
    RParen,
    And,
    Or,
    Not,
    Field(String),
    Word(String),
    Phrase(String),
}

fn lex(input: &str) -> Result<Vec<Token>, ParseError> {
    let mut tokens = Vec::new();
    let mut chars = input.chars().peekable();

    while let Some(&c) = chars.peek() {
        match c {
            c if c.is_whitespace() => {
                chars.next();
            }
            '(' => {
                chars.next();
                tokens.push(Token::LParen);
            }
            ')' => {
                chars.next();
                tokens.push(Token::RParen);
            }
            '"' => {
                chars.next();
                let mut phrase = String::new();
                let mut closed = false;
                for c in chars.by_ref() {
                    if c == '"' {
                        closed = true;
                        break;
                    }
                    phrase.push(c);
                }
                if !closed {
                    return Err(ParseError::UnterminatedPhrase);
                }
                tokens.push(Token::Phrase(phrase));
            }
            _ => {
                let mut run = String::new();
                while let Some(&c) = chars.peek() {
                    if c.is_whitespace() || matches!(c, '(' | ')' | '"') {
                        break;
                    }
                    run.push(c);
                    chars.next();
                }
                push_run(&mut tokens, run);
            }
        }
    }

    Ok(tokens)
}

fn push_run(tokens: &mut Vec<Token>, run: String) {
    if run.eq_ignore_ascii_case("and") {
        tokens.push(Token::And);
    } else if run.eq_ignore_ascii_case("or") {
        tokens.push(Token::Or);
    } else if run.eq_ignore_ascii_case("not") {
        tokens.push(Token::Not);
    } else if let Some((name, rest)) = run.split_once(':').filter(|(name, _)| is_field_name(name)) {
        tokens.push(Token::Field(name.to_string()));
        if !rest.is_empty() {
            tokens.push(Token::Word(rest.to_string()));
        }
    } else {
        tokens.push(Token::Word(run));
    }
}

fn is_field_name(name: &str) -> bool {
    let mut chars = name.chars();
    matches!(chars.next(), Some(c) if c.is_ascii_uppercase())
        && chars.all(|c| c.is_ascii_uppercase() || c.is_ascii_digit() || c == '_')
}

pub(crate) fn has_operators(input: &str) -> bool {
    lex(input)
        .map(|tokens| {
            tokens.iter().any(|t| {
                matches!(
                    t,
                    Token::And | Token::Or | Token::Not | Token::LParen | Token::Field(_)
                )
            })
        })
        .unwrap_or(false)
}

// ---------------------------------------------------------------------------
// Parser
// ---------------------------------------------------------------------------

pub(crate) fn parse(input: &str) -> Result<QueryExpr, ParseError> {
    let tokens = lex(input)?;
    if tokens.is_empty() {
        return Err(ParseError::Empty);
    }
    let mut parser = Parser { tokens, pos: 0 };
    let expr = parser.parse_or()?;
    match parser.peek() {
        None => Ok(expr),
        Some(_) => Err(ParseError::UnbalancedParen),
    }
}

struct Parser {
    tokens: Vec<Token>,
    pos: usize,
}

impl Parser {
    fn peek(&self) -> Option<&Token> {
        self.tokens.get(self.pos)
    }

    fn next(&mut self) -> Option<Token> {
        let token = self.tokens.get(self.pos).cloned();
        self.pos += 1;
        token
    }

    fn eat(&mut self, token: &Token) -> bool {
        if self.peek() == Some(token) {
            self.pos += 1;
            true
        } else {
            false
        }
    }

    fn parse_or(&mut self) -> Result<QueryExpr, ParseError> {
        let mut items = vec![self.parse_and()?];
        while self.eat(&Token::Or) {
            if matches!(self.peek(), None | Some(Token::RParen | Token::Or)) {
                return Err(ParseError::DanglingOperator("OR".into()));
            }
            items.push(self.parse_and()?);
        }
        Ok(QueryExpr::any(items))
    }

    fn parse_and(&mut self) -> Result<QueryExpr, ParseError> {
        let mut items = Vec::new();
        loop {
            match self.peek() {
                None | Some(Token::RParen) => break,
                Some(Token::Or) => {
                    if items.is_empty() {
                        return Err(ParseError::DanglingOperator("OR".into()));
                    }
                    break;
                }
                Some(Token::And) => {
                    if items.is_empty() {
                        return Err(ParseError::DanglingOperator("AND".into()));
                    }
                    self.pos += 1;
                    items.push(self.parse_operand("AND")?);
                }
                Some(Token::Not) => {
                    self.pos += 1;
                    let inner = self.parse_operand("NOT")?;
                    items.push(QueryExpr::Not(Box::new(inner)));
                }
                Some(_) => items.push(self.parse_unary()?),
            }
        }
        if items.is_empty() {
            return Err(ParseError::UnbalancedParen);
        }
        Ok(QueryExpr::all(items))
    }

    /// Right-hand side of a keyword; another keyword or the end is an error.
    fn parse_operand(&mut self, op: &str) -> Result<QueryExpr, ParseError> {
        match self.peek() {
            None | Some(Token::RParen | Token::And | Token::Or | Token::Not) => {
                Err(ParseError::DanglingOperator(op.to_string()))
            }
            Some(_) => self.parse_unary(),
        }
    }

    fn parse_unary(&mut self) -> Result<QueryExpr, ParseError> {
        if let Some(Token::Field(name)) = self.peek().cloned() {
            self.pos += 1;
            return match self.peek() {
                None | Some(Token::RParen | Token::And | Token::Or | Token::Not) => {
                    Err(ParseError::EmptyField(name))
                }
                Some(_) => Ok(QueryExpr::Field { name, expr: Box::new(self.parse_primary()?) }),
            };
        }
        self.parse_primary()
    }

    fn parse_primary(&mut self) -> Result<QueryExpr, ParseError> {
        match self.next() {
            Some(Token::LParen) => {
                if self.eat(&Token::RParen) {
                    return Err(ParseError::EmptyGroup);
                }
                let expr = self.parse_or()?;
                if !self.eat(&Token::RParen) {
                    return Err(ParseError::UnbalancedParen);
                }
                Ok(expr)
            }
            Some(Token::Word(raw)) => Ok(QueryExpr::Term(Term::from_raw(&raw)?)),
            Some(Token::Phrase(text)) => {
                if text.trim().is_empty() {
                    return Err(ParseError::EmptyTerm("\"\"".into()));
                }
                Ok(QueryExpr::Term(Term { text, kind: TermKind::Phrase, marked: false }))
            }
            Some(Token::RParen) => Err(ParseError::UnbalancedParen),
            Some(Token::Field(name)) => Err(ParseError::EmptyField(name)),
            Some(Token::And) => Err(ParseError::DanglingOperator("AND".into())),
            Some(Token::Or) => Err(ParseError::DanglingOperator("OR".into())),
            Some(Token::Not) => Err(ParseError::DanglingOperator("NOT".into())),
            None => Err(ParseError::UnbalancedParen),
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

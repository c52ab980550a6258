//! Core types for querycheck-core.
//!
//! This module defines the two values that cross the network boundary: the
//! [`Query`] sent to the search endpoint and the [`ResultRecord`] decoded from
//! each returned item.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::ParseError;
use crate::query::{self, QueryExpr};

/// A query string in the search endpoint's grammar.
///
/// Construction never validates: malformed or nonsensical queries are valid
/// inputs and are forwarded to the endpoint exactly as written. Parsing only
/// happens when a predicate needs the grammar tree.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Query(String);

impl Query {
    pub fn new(text: impl Into<String>) -> Self {
        Self(text.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Parse into the grammar tree used to build a predicate.
    pub fn parse(&self) -> Result<QueryExpr, ParseError> {
        query::parse(&self.0)
    }

    /// Whether the query uses explicit grammar: boolean keywords, grouping
    /// or field scopes. Unlexable input counts as plain text.
    pub fn has_operators(&self) -> bool {
        query::has_operators(&self.0)
    }
}

impl std::fmt::Display for Query {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Query {
    fn from(text: &str) -> Self {
        Self::new(text)
    }
}

impl From<String> for Query {
    fn from(text: String) -> Self {
        Self(text)
    }
}

/// One item returned by the search endpoint.
///
/// Keeps the raw JSON for failure reports alongside its normalised text: all
/// scalar leaf values, depth-first, one per line, lower-cased. Keys are not
/// part of the text, so a query term never matches a field name.
#[derive(Debug, Clone, PartialEq)]
pub struct ResultRecord {
    raw: Value,
    text: String,
}

impl ResultRecord {
    pub fn new(raw: Value) -> Self {
        let text = render(&raw).to_lowercase();
        Self { raw, text }
    }

    pub fn raw(&self) -> &Value {
        &self.raw
    }

    pub fn into_raw(self) -> Value {
        self.raw
    }

    /// Normalised (lower-cased) text of the whole record.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Look up a value by dotted path, e.g. `employer.name`.
    pub fn field(&self, path: &str) -> Option<&Value> {
        path.split('.')
            .try_fold(&self.raw, |value, key| value.as_object()?.get(key))
    }

    /// Text of a field with its original casing. `None` if the path is
    /// missing or null.
    pub fn field_text(&self, path: &str) -> Option<String> {
        match self.field(path)? {
            Value::Null => None,
            value => Some(render(value)),
        }
    }
}

impl From<Value> for ResultRecord {
    fn from(raw: Value) -> Self {
        Self::new(raw)
    }
}

fn render(value: &Value) -> String {
    let mut leaves = Vec::new();
    collect_leaves(value, &mut leaves);
    leaves.join("\n")
}

fn collect_leaves(value: &Value, out: &mut Vec<String>) {
    match value {
        Value::Null => {}
        Value::Bool(b) => out.push(b.to_string()),
        Value::Number(n) => out.push(n.to_string()),
        Value::String(s) => out.push(s.clone()),
        Value::Array(items) => items.iter().for_each(|item| collect_leaves(item, out)),
        Value::Object(map) => map.values().for_each(|item| collect_leaves(item, out)),
    }
}

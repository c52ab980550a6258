//! Configuration types for querycheck.
//!
//! [`Config::load`] layers, in order: the built-in defaults, the user file at
//! `~/.config/querycheck/config.toml` (if present), an explicit file passed on
//! the command line, and `QUERYCHECK_*` environment variables
//! (`QUERYCHECK_ENDPOINT__URL=...`). [`Config::defaults`] returns the built-in
//! defaults without touching the filesystem (useful in tests).

use serde::Deserialize;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

// ---------------------------------------------------------------------------
// Embedded defaults
// ---------------------------------------------------------------------------

const DEFAULT_CONFIG: &str = r#"
[endpoint]
url          = "https://api.hh.ru/vacancies"
query_param  = "text"
results_key  = "items"
timeout_secs = 30
user_agent   = "querycheck/0.1 (search semantics harness)"

[fields.NAME]
path = "name"

[fields.COMPANY_NAME]
path  = "employer.name"
exact = true
"#;

const ENV_PREFIX: &str = "QUERYCHECK";

// ---------------------------------------------------------------------------
// Public config types
// ---------------------------------------------------------------------------

/// Top-level configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub endpoint: EndpointConfig,
    #[serde(default)]
    pub fields: FieldMap,
}

/// `[endpoint]` section: where and how to send queries.
#[derive(Debug, Clone, Deserialize)]
pub struct EndpointConfig {
    #[serde(default = "default_url")]
    pub url: String,
    /// Name of the GET parameter that carries the query text.
    #[serde(default = "default_query_param")]
    pub query_param: String,
    /// Top-level key of the JSON array holding the result records.
    #[serde(default = "default_results_key")]
    pub results_key: String,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

fn default_url() -> String { "https://api.hh.ru/vacancies".to_string() }
fn default_query_param() -> String { "text".to_string() }
fn default_results_key() -> String { "items".to_string() }
fn default_timeout_secs() -> u64 { 30 }
fn default_user_agent() -> String { "querycheck/0.1 (search semantics harness)".to_string() }

impl Default for EndpointConfig {
    fn default() -> Self {
        Self {
            url: default_url(),
            query_param: default_query_param(),
            results_key: default_results_key(),
            timeout_secs: default_timeout_secs(),
            user_agent: default_user_agent(),
        }
    }
}

impl EndpointConfig {
    /// Defaults pointed at another URL; handy for fake servers in tests.
    pub fn with_url(url: impl Into<String>) -> Self {
        Self { url: url.into(), ..Self::default() }
    }
}

/// `[fields.<NAME>]`: maps a grammar field name to a record path.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct FieldAlias {
    /// Dotted path into the record, e.g. `employer.name`.
    pub path: String,
    /// Compare case-sensitively against the raw field value.
    #[serde(default)]
    pub exact: bool,
}

/// All `[fields]` aliases, looked up case-insensitively by grammar name.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(transparent)]
pub struct FieldMap(BTreeMap<String, FieldAlias>);

impl FieldMap {
    pub fn new() -> Self {
        Self(BTreeMap::new())
    }

    pub fn insert(&mut self, name: impl Into<String>, alias: FieldAlias) {
        self.0.insert(name.into(), alias);
    }

    pub fn resolve(&self, name: &str) -> Option<&FieldAlias> {
        self.0
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, alias)| alias)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl Default for FieldMap {
    fn default() -> Self {
        let mut fields = Self::new();
        fields.insert("NAME", FieldAlias { path: "name".into(), exact: false });
        fields.insert("COMPANY_NAME", FieldAlias { path: "employer.name".into(), exact: true });
        fields
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::defaults()
    }
}

impl Config {
    /// Load the layered configuration. `explicit` must exist if given; the
    /// user file is optional.
    pub fn load(explicit: Option<&Path>) -> anyhow::Result<Self> {
        let mut builder = config::Config::builder()
            .add_source(config::File::from_str(DEFAULT_CONFIG, config::FileFormat::Toml))
            .add_source(config::File::from(config_path().as_path()).required(false));

        if let Some(path) = explicit {
            builder = builder.add_source(config::File::from(path).required(true));
        }

        builder
            .add_source(
                config::Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("_")
                    .separator("__"),
            )
            .build()?
            .try_deserialize()
            .map_err(Into::into)
    }

    /// Return the built-in defaults without touching the filesystem.
    pub fn defaults() -> Self {
        config::Config::builder()
            .add_source(config::File::from_str(DEFAULT_CONFIG, config::FileFormat::Toml))
            .build()
            .expect("built-in default config must be valid TOML")
            .try_deserialize()
            .expect("built-in default config must deserialize correctly")
    }
}

// ---------------------------------------------------------------------------
// Path helpers
// ---------------------------------------------------------------------------

fn config_path() -> PathBuf {
    std::env::var("XDG_CONFIG_HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|_| {
            PathBuf::from(std::env::var("HOME").unwrap_or_else(|_| ".".to_string()))
                .join(".config")
        })
        .join("querycheck")
        .join("config.toml")
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

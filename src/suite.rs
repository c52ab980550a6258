//! The built-in case list and loading of extra cases from TOML.
//!
//! Case files hold an array of `[[case]]` tables. A table without `query` is
//! an endpoint probe; `expect` defaults to `conforms`:
//!
//! ```toml
//! [[case]]
//! name  = "word_forms"
//! query = "продажи"
//! expect = { kind = "stems", stems = ["продаж"] }
//! ```

use std::path::Path;

use anyhow::Context;
use querycheck_core::{Case, Expectation};
use serde::Deserialize;

/// The source suite's cases, in order.
pub fn builtin() -> Vec<Case> {
    vec![
        Case::probe("response_status_ok"),
        Case::search("query_and_result_similarity", "разработчик", Expectation::Conforms),
        Case::search("multi_word_similarity", "директор магазина", Expectation::Conforms),
        Case::search(
            "one_space_between",
            "директор магазина",
            Expectation::Pattern { pattern: r"директор.{0,2}\sмагазин".into() },
        ),
        Case::search(
            "different_word_forms",
            "продажи",
            Expectation::Stems { stems: vec!["продаж".into()] },
        ),
        Case::search("except_vacancy", "!продажи", Expectation::Conforms),
        Case::search("regexp_star", "Гео*", Expectation::Conforms),
        Case::search(
            "synonym",
            "сторожила",
            Expectation::Synonyms { synonyms: vec!["охранник".into()] },
        ),
        Case::search("or_statement", "разработчик OR кассир", Expectation::Conforms),
        Case::search("and_statement", "разработчик AND кассир", Expectation::Conforms),
        Case::search(
            "exclusion",
            "разработчик NOT кассир NOT менеджер",
            Expectation::Conforms,
        ),
        Case::search(
            "boolean_equation",
            "(столяр OR столяр-плотник) AND (электрик OR сантехник)",
            Expectation::Conforms,
        ),
        Case::search(
            "json_fields",
            "NAME:(python OR java) and COMPANY_NAME:HeadHunter",
            Expectation::Conforms,
        ),
        Case::search("invalid_request", "запроооооооооос", Expectation::NoResults),
    ]
}

#[derive(Debug, Deserialize)]
struct CaseFile {
    #[serde(default)]
    case: Vec<CaseEntry>,
}

#[derive(Debug, Deserialize)]
struct CaseEntry {
    name: String,
    query: Option<String>,
    #[serde(default)]
    expect: Expectation,
}

impl From<CaseEntry> for Case {
    fn from(entry: CaseEntry) -> Self {
        match entry.query {
            Some(query) => Case::search(entry.name, query, entry.expect),
            None => Case::probe(entry.name),
        }
    }
}

/// Read extra cases from a TOML file.
pub fn load_cases(path: &Path) -> anyhow::Result<Vec<Case>> {
    let file: CaseFile = config::Config::builder()
        .add_source(config::File::from(path).format(config::FileFormat::Toml))
        .build()
        .with_context(|| format!("reading cases from {}", path.display()))?
        .try_deserialize()
        .with_context(|| format!("parsing cases in {}", path.display()))?;

    Ok(file.case.into_iter().map(Case::from).collect())
}

/// Keep only the named cases, in suite order. Unknown names are an error so
/// a typo never silently runs nothing.
pub fn select(cases: Vec<Case>, only: &[String]) -> anyhow::Result<Vec<Case>> {
    if only.is_empty() {
        return Ok(cases);
    }
    if let Some(missing) = only.iter().find(|name| !cases.iter().any(|c| &c.name == *name)) {
        anyhow::bail!("no case named {missing:?}");
    }
    Ok(cases.into_iter().filter(|c| only.contains(&c.name)).collect())
}

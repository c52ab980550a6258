//! Per-case and per-suite reports.
//!
//! Reports serialize to JSON for machines and render as aligned text lines
//! for humans. Failing records are printed in full so the offending vacancy
//! can be inspected without re-running the query.

use chrono::{DateTime, Utc};
use querycheck_core::{GrammarFeature, Verdict, Violation};
use serde::Serialize;

/// How one case ended.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum Outcome {
    Passed { checked: usize },
    Failed { violation: Violation },
    /// Transport, decoding or compile error; the assertion never ran.
    Errored { error: String },
}

impl From<Verdict> for Outcome {
    fn from(verdict: Verdict) -> Self {
        match verdict {
            Verdict::Pass { checked } => Outcome::Passed { checked },
            Verdict::Fail { violation } => Outcome::Failed { violation },
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct CaseReport {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub feature: Option<GrammarFeature>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub query: Option<String>,
    #[serde(flatten)]
    pub outcome: Outcome,
    pub elapsed_ms: u64,
}

impl CaseReport {
    pub fn passed(&self) -> bool {
        matches!(self.outcome, Outcome::Passed { .. })
    }
}

impl std::fmt::Display for CaseReport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let tag = match self.outcome {
            Outcome::Passed { .. } => "PASS ",
            Outcome::Failed { .. } => "FAIL ",
            Outcome::Errored { .. } => "ERROR",
        };
        write!(f, "{tag} {}", self.name)?;
        if let Some(feature) = self.feature {
            write!(f, " [{feature}]")?;
        }
        if let Some(query) = &self.query {
            write!(f, " {query:?}")?;
        }

        match &self.outcome {
            Outcome::Passed { checked } => write!(f, " ({checked} records)"),
            Outcome::Errored { error } => write!(f, "\n    {error}"),
            Outcome::Failed { violation } => {
                write!(f, "\n    {violation}")?;
                if let Violation::Records { failures, .. } = violation {
                    for failure in failures {
                        write!(f, "\n    #{}: {}", failure.index, failure.record)?;
                    }
                }
                Ok(())
            }
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct SuiteReport {
    pub started_at: DateTime<Utc>,
    pub endpoint: String,
    pub cases: Vec<CaseReport>,
}

impl SuiteReport {
    pub fn passed(&self) -> bool {
        self.cases.iter().all(CaseReport::passed)
    }

    pub fn failed_count(&self) -> usize {
        self.cases.iter().filter(|c| !c.passed()).count()
    }

    /// Process exit status: 0 iff every case passed.
    pub fn exit_code(&self) -> i32 {
        if self.passed() { 0 } else { 1 }
    }

    pub fn render_text(&self) -> String {
        let mut out = String::new();
        for case in &self.cases {
            out.push_str(&case.to_string());
            out.push('\n');
        }
        out.push_str(&format!(
            "{} cases against {}: {} passed, {} failed\n",
            self.cases.len(),
            self.endpoint,
            self.cases.len() - self.failed_count(),
            self.failed_count(),
        ));
        out
    }
}

//! Executes cases one at a time and records their outcomes.

use std::time::Instant;

use chrono::Utc;
use querycheck_client::{QueryClient, StatusCode};
use querycheck_core::{Case, Check, FieldMap, SemanticPredicate, Violation};
use tracing::{info, warn};

use crate::report::{CaseReport, Outcome, SuiteReport};

/// Run one case. Every error is captured in the report, never returned.
pub async fn run_case(client: &QueryClient, case: &Case, fields: &FieldMap) -> CaseReport {
    let started = Instant::now();
    let outcome = match &case.check {
        Check::Probe => probe(client).await,
        Check::Search { query, expect } => match SemanticPredicate::compile(query, expect, fields) {
            Err(e) => Outcome::Errored { error: e.to_string() },
            Ok(predicate) => match client.search(query).await {
                Err(e) => Outcome::Errored { error: e.to_string() },
                Ok(records) => predicate.evaluate(&records).into(),
            },
        },
    };

    let report = CaseReport {
        name: case.name.clone(),
        feature: case.feature(),
        query: case.query().map(|q| q.as_str().to_string()),
        outcome,
        elapsed_ms: started.elapsed().as_millis() as u64,
    };

    if report.passed() {
        info!(case = %report.name, elapsed_ms = report.elapsed_ms, "case passed");
    } else {
        warn!(case = %report.name, outcome = ?report.outcome, "case did not pass");
    }
    report
}

async fn probe(client: &QueryClient) -> Outcome {
    match client.probe().await {
        Ok(status) if status == StatusCode::OK => Outcome::Passed { checked: 0 },
        Ok(status) => Outcome::Failed {
            violation: Violation::Status { expected: 200, actual: status.as_u16() },
        },
        Err(e) => Outcome::Errored { error: e.to_string() },
    }
}

/// Run every case in order.
pub async fn run_suite(client: &QueryClient, cases: &[Case], fields: &FieldMap) -> SuiteReport {
    let started_at = Utc::now();
    let mut reports = Vec::with_capacity(cases.len());
    for case in cases {
        reports.push(run_case(client, case, fields).await);
    }

    SuiteReport {
        started_at,
        endpoint: client.endpoint().url.clone(),
        cases: reports,
    }
}

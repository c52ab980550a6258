//! Domain-specific assertion macros for querycheck harnesses.
//!
//! These add context-rich failure messages that make it clear *which* query
//! semantic was violated and *which* record broke it.

// ---------------------------------------------------------------------------
// Verdict assertions
// ---------------------------------------------------------------------------

/// Assert that a `Verdict` passed, printing the violation otherwise.
///
/// ```rust
/// assert_passes!(predicate.evaluate(&records));
/// ```
#[macro_export]
macro_rules! assert_passes {
    ($verdict:expr) => {{
        let verdict: querycheck_core::Verdict = $verdict;
        if let querycheck_core::Verdict::Fail { violation } = &verdict {
            panic!("assert_passes! failed:\n  {}\n  {:?}", violation, violation);
        }
    }};
}

/// Assert that a `Verdict` failed because of the records at `indices`.
///
/// ```rust
/// assert_record_failures!(predicate.evaluate(&records), [2]);
/// ```
#[macro_export]
macro_rules! assert_record_failures {
    ($verdict:expr, [$($index:expr),* $(,)?]) => {{
        let verdict: querycheck_core::Verdict = $verdict;
        let expected: Vec<usize> = vec![$($index),*];
        match verdict {
            querycheck_core::Verdict::Fail {
                violation: querycheck_core::Violation::Records { failures, .. },
            } => {
                let actual: Vec<usize> = failures.iter().map(|f| f.index).collect();
                if actual != expected {
                    panic!(
                        "assert_record_failures! failed:\n  expected indices: {:?}\n  actual:           {:?}",
                        expected, actual
                    );
                }
            }
            other => panic!(
                "assert_record_failures! failed: expected record failures, got {:?}",
                other
            ),
        }
    }};
}

/// Assert that a `Verdict` failed for a set-level reason matching a pattern.
///
/// ```rust
/// assert_violation!(verdict, Violation::NotEmpty { count: 1 });
/// ```
#[macro_export]
macro_rules! assert_violation {
    ($verdict:expr, $pattern:pat) => {{
        let verdict: querycheck_core::Verdict = $verdict;
        match &verdict {
            querycheck_core::Verdict::Fail { violation: $pattern } => {}
            other => panic!(
                "assert_violation! failed:\n  expected: {}\n  actual:   {:?}",
                stringify!($pattern),
                other
            ),
        }
    }};
}

// ---------------------------------------------------------------------------
// Report assertions
// ---------------------------------------------------------------------------

/// Assert the outcome tag of a named case in a `SuiteReport`.
///
/// ```rust
/// assert_case!(report, "synonym", Outcome::Failed { .. });
/// ```
#[macro_export]
macro_rules! assert_case {
    ($report:expr, $name:expr, $pattern:pat) => {{
        let report: &querycheck::SuiteReport = &$report;
        let name: &str = $name;
        match report.cases.iter().find(|c| c.name == name) {
            Some(case) => match &case.outcome {
                $pattern => {}
                other => panic!(
                    "assert_case! failed for {:?}:\n  expected: {}\n  actual:   {:?}",
                    name,
                    stringify!($pattern),
                    other
                ),
            },
            None => panic!(
                "assert_case! failed: no case {:?} in report.\n  Available: {:?}",
                name,
                report.cases.iter().map(|c| c.name.as_str()).collect::<Vec<_>>()
            ),
        }
    }};
}

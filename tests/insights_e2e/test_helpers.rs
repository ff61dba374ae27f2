//! Shared test helpers for insights E2E tests.

use serde_json::{Value, json};
use test_insights_lib::models::Report;
use test_insights_lib::services::storage::parse_report;

/// Build a report from a summary and test entries given as JSON.
pub fn report_from(summary: Value, tests: Value) -> Report {
    let raw = json!({
        "reportFormat": "CTRF",
        "specVersion": "0.0.0",
        "results": {
            "tool": { "name": "playwright" },
            "summary": summary,
            "tests": tests,
        }
    });
    parse_report(&raw.to_string()).expect("test report should parse")
}

/// Report with a default summary starting at `start`.
pub fn report_at(start: i64, tests: Value) -> Report {
    report_from(
        json!({ "passed": 0, "failed": 0, "start": start, "stop": start + 1000 }),
        tests,
    )
}

/// The two-report history used throughout the suite.
///
/// Report 1: `a` passed (100ms), `b` failed (50ms).
/// Report 2: `a` failed after one retry (120ms).
pub fn two_report_history() -> (Report, Report) {
    let first = report_at(
        2000,
        json!([
            { "name": "a", "status": "passed", "duration": 100 },
            { "name": "b", "status": "failed", "duration": 50 }
        ]),
    );
    let second = report_at(
        1000,
        json!([{ "name": "a", "status": "failed", "retries": 1, "duration": 120 }]),
    );
    (first, second)
}

//! E2E tests: historical run extraction.

use serde_json::json;
use test_insights_lib::models::RunStatus;
use test_insights_lib::services::extract_historical_runs;

use super::test_helpers::*;

#[test]
fn test_fallback_identity_and_duration() {
    let reports = vec![
        report_at(10, json!([])),
        report_at(20, json!([])),
        report_from(
            json!({ "start": 1000, "stop": 5000, "passed": 5, "failed": 0 }),
            json!([]),
        ),
    ];

    let runs = extract_historical_runs(&reports);
    assert_eq!(runs.len(), 3);
    assert_eq!(runs[2].id, "1000_2");
    assert_eq!(runs[2].status, RunStatus::Passed);
    assert_eq!(runs[2].duration, 4000);
}

#[test]
fn test_records_serialize_for_trend_display() {
    let mut report = report_from(
        json!({ "start": 0, "stop": 60000, "passed": 3, "failed": 2, "skipped": 1, "pending": 1 }),
        json!([{ "name": "x", "status": "passed", "flaky": true, "duration": 1 }]),
    );
    report.results.environment = serde_json::from_value(json!({
        "buildNumber": "99",
        "buildUrl": "https://ci.example/runs/99",
        "branchName": "main"
    }))
    .unwrap();

    let runs = extract_historical_runs(std::slice::from_ref(&report));
    let value = serde_json::to_value(&runs[0]).unwrap();

    assert_eq!(value["id"], "99");
    assert_eq!(value["status"], "mixed");
    assert_eq!(value["skipped"], 2);
    assert_eq!(value["flaky"], 1);
    assert_eq!(value["buildUrl"], "https://ci.example/runs/99");
    assert_eq!(value["branchName"], "main");
    assert_eq!(value["date"], "1970-01-01T00:00:00Z");
}

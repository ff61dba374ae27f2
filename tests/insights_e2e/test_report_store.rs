//! E2E tests: loading history from disk and writing enriched reports.

use serde_json::json;
use test_insights_lib::services::{IdentityMode, enrich_report, storage};

use super::test_helpers::*;

#[tokio::test]
async fn test_enrich_from_disk_round_trip() {
    let dir = tempfile::tempdir().unwrap();
    let history_dir = dir.path().join("history");
    std::fs::create_dir_all(&history_dir).unwrap();

    let (first, second) = two_report_history();
    let older = enrich_report(&second, &[], None, IdentityMode::Name);
    storage::save_report(&history_dir.join("run-1.json"), &older)
        .await
        .unwrap();
    std::fs::write(history_dir.join("garbage.json"), "not json").unwrap();

    let current_path = dir.path().join("current.json");
    storage::save_report(&current_path, &first).await.unwrap();

    let current = storage::load_report(&current_path).await.unwrap();
    let previous = storage::load_history(&history_dir, 10, Some(&current_path))
        .await
        .unwrap();
    assert_eq!(previous.len(), 1);

    let enriched = enrich_report(&current, &previous, previous.first(), IdentityMode::Name);
    let output = dir.path().join("out.json");
    storage::save_report(&output, &enriched).await.unwrap();

    let written: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(&output).unwrap()).unwrap();
    assert_eq!(written["insights"]["failRate"]["current"], 66.67);
    assert_eq!(written["insights"]["failRate"]["previous"], 100.0);
    assert_eq!(written["insights"]["reportsAnalyzed"], 2);
    assert_eq!(written["results"]["tests"][0]["insights"]["appearsInRuns"], 2);
    assert_eq!(written["results"]["tool"]["name"], "playwright");
}

#[tokio::test]
async fn test_unknown_fields_survive_enrichment() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("report.json");
    let raw = json!({
        "reportFormat": "CTRF",
        "generatedBy": "custom-reporter",
        "results": {
            "tool": { "name": "jest", "url": "https://jestjs.io" },
            "summary": { "start": 1, "stop": 2, "passed": 1, "suites": 4 },
            "tests": [{ "name": "t", "status": "passed", "duration": 1, "browser": "webkit" }],
            "environment": { "buildNumber": 42, "runnerImage": "ubuntu-24.04" }
        }
    });
    std::fs::write(&path, raw.to_string()).unwrap();

    let report = storage::load_report(&path).await.unwrap();
    let enriched = enrich_report(&report, &[], None, IdentityMode::Name);
    storage::save_report(&path, &enriched).await.unwrap();

    let written: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
    assert_eq!(written["generatedBy"], "custom-reporter");
    assert_eq!(written["results"]["tests"][0]["browser"], "webkit");
    assert_eq!(written["results"]["summary"]["suites"], 4);
    assert_eq!(written["results"]["tool"]["url"], "https://jestjs.io");
    assert_eq!(written["results"]["environment"]["runnerImage"], "ubuntu-24.04");
    assert_eq!(written["results"]["environment"]["buildNumber"], "42");
}

#[tokio::test]
async fn test_bad_test_entry_survives_overwrite() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("report.json");
    let bad_entry = json!({ "name": "broken", "status": "failed", "duration": 5, "retries": -1 });
    let raw = json!({
        "results": {
            "tool": { "name": "jest" },
            "summary": { "start": 1, "stop": 2, "passed": 1, "failed": 1 },
            "tests": [
                { "name": "ok", "status": "passed", "duration": 10 },
                bad_entry.clone()
            ]
        }
    });
    std::fs::write(&path, raw.to_string()).unwrap();

    let report = storage::load_report(&path).await.unwrap();
    let enriched = enrich_report(&report, &[], None, IdentityMode::Name);
    storage::save_report(&path, &enriched).await.unwrap();

    let written: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
    let tests = written["results"]["tests"].as_array().unwrap();
    assert_eq!(tests.len(), 2);
    assert_eq!(tests[0]["name"], "ok");
    assert_eq!(tests[0]["insights"]["appearsInRuns"], 1);
    assert_eq!(tests[1], bad_entry);

    // The report still counts; only the parsable entry feeds the rates.
    assert_eq!(written["insights"]["reportsAnalyzed"], 1);
    assert_eq!(written["insights"]["failRate"]["current"], 0.0);
}

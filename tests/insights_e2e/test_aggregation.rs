//! E2E tests: aggregation and snapshot composition across reports.

use serde_json::json;
use test_insights_lib::services::{
    IdentityMode, aggregate, attach_test_insights, compose_run_insights, compose_test_insights,
};

use super::test_helpers::*;

#[test]
fn test_two_report_history_counters() {
    let (first, second) = two_report_history();
    let aggregation = aggregate([&first, &second], IdentityMode::Name);

    let a = aggregation.get("a").expect("a aggregated");
    assert_eq!(a.counters.total_results, 2);
    assert_eq!(a.counters.total_results_failed, 1);
    assert_eq!(a.counters.total_results_passed, 1);
    assert_eq!(a.counters.total_attempts, 3);
    assert_eq!(a.counters.total_results_duration, 220.0);
    assert_eq!(a.appears_in_runs, 2);

    let run = compose_run_insights([&first, &second], IdentityMode::Name);
    assert_eq!(run.fail_rate.current, 66.67);
    assert_eq!(run.reports_analyzed, 2);
}

#[test]
fn test_retried_pass_is_flaky_not_failed() {
    let report = report_at(
        0,
        json!([{ "name": "retry-pass", "status": "passed", "retries": 2, "duration": 30 }]),
    );

    let insights = compose_test_insights("retry-pass", [&report], IdentityMode::Name);
    // One flaky result over three attempts.
    assert_eq!(insights.flaky_rate.current, 33.33);
    assert_eq!(insights.fail_rate.current, 0.0);
}

#[test]
fn test_retried_fail_is_failed_not_flaky() {
    let report = report_at(
        0,
        json!([{ "name": "retry-fail", "status": "failed", "retries": 3, "duration": 30 }]),
    );

    let insights = compose_test_insights("retry-fail", [&report], IdentityMode::Name);
    assert_eq!(insights.flaky_rate.current, 0.0);
    assert_eq!(insights.fail_rate.current, 100.0);
}

#[test]
fn test_duplicated_report_caps_appearances() {
    let (first, _) = two_report_history();

    let single = aggregate([&first], IdentityMode::Name);
    let double = aggregate([&first, &first], IdentityMode::Name);

    for (name, metrics) in &double.tests {
        let once = single.get(name).unwrap();
        assert_eq!(metrics.appears_in_runs, 2);
        assert_eq!(metrics.counters.total_results, 2 * once.counters.total_results);
        assert_eq!(metrics.counters.total_attempts, 2 * once.counters.total_attempts);
    }
}

#[test]
fn test_malformed_history_is_ignored() {
    let (first, second) = two_report_history();
    let broken = report_from(json!({ "start": 5, "stop": 6 }), json!("not a list"));

    let with_broken = compose_run_insights([&first, &broken, &second], IdentityMode::Name);
    let without = compose_run_insights([&first, &second], IdentityMode::Name);

    assert_eq!(with_broken, without);
}

#[test]
fn test_empty_reports_produce_zero_rates() {
    let empty = report_at(0, json!([]));
    let run = compose_run_insights([&empty], IdentityMode::Name);

    assert_eq!(run.reports_analyzed, 1);
    assert_eq!(run.flaky_rate.current, 0.0);
    assert_eq!(run.fail_rate.current, 0.0);
    assert_eq!(run.skipped_rate.current, 0.0);
    assert_eq!(run.average_test_duration.current, 0.0);
    assert_eq!(run.average_run_duration.current, 0.0);
}

#[test]
fn test_attach_covers_every_current_test() {
    let (first, second) = two_report_history();
    let enriched = attach_test_insights(&first, std::slice::from_ref(&second), IdentityMode::Name);

    let tests = enriched.tests().unwrap();
    assert!(tests.iter().all(|t| t.insights.is_some()));
    assert!(enriched.insights.is_none());
    assert!(first.tests().unwrap().iter().all(|t| t.insights.is_none()));
}

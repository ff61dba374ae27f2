//! E2E tests: comparing snapshots across successive runs.

use serde_json::json;
use test_insights_lib::models::{Insights, InsightsMetric};
use test_insights_lib::services::{IdentityMode, diff_insights, enrich_report};

use super::test_helpers::*;

#[test]
fn test_diff_flaky_rate() {
    let current = Insights {
        flaky_rate: InsightsMetric::current_only(10.0),
        ..Default::default()
    };
    let previous = Insights {
        flaky_rate: InsightsMetric::current_only(4.0),
        ..Default::default()
    };

    let diffed = diff_insights(Some(&current), Some(&previous));
    assert_eq!(diffed.flaky_rate.current, 10.0);
    assert_eq!(diffed.flaky_rate.previous, 4.0);
    assert_eq!(diffed.flaky_rate.change, 6.0);
}

#[test]
fn test_missing_baseline_is_degraded_not_fatal() {
    let current = Insights {
        fail_rate: InsightsMetric::current_only(12.0),
        reports_analyzed: 3,
        ..Default::default()
    };

    let diffed = diff_insights(Some(&current), None);
    assert_eq!(diffed.fail_rate.previous, 0.0);
    assert_eq!(diffed.fail_rate.change, 0.0);
    assert_eq!(diffed.reports_analyzed, 3);
}

#[test]
fn test_successive_runs_chain_baselines() {
    let (first, second) = two_report_history();

    // Older run enriched on its own, then persisted by the caller.
    let older = enrich_report(&second, &[], None, IdentityMode::Name);

    // Newer run compared against the persisted one.
    let history = vec![older];
    let newer = enrich_report(&first, &history, history.first(), IdentityMode::Name);

    let run = newer.insights.as_ref().unwrap();
    assert_eq!(run.fail_rate.previous, 100.0);
    assert_eq!(run.fail_rate.current, 66.67);
    assert_eq!(run.fail_rate.change, -33.33);
    assert_eq!(run.reports_analyzed, 2);

    // A third run with a new skipped test.
    let third = report_at(
        3000,
        json!([
            { "name": "a", "status": "passed", "duration": 80 },
            { "name": "c", "status": "skipped", "duration": 0 }
        ]),
    );
    let history = vec![newer, history.into_iter().next().unwrap()];
    let latest = enrich_report(&third, &history, history.first(), IdentityMode::Name);

    let run = latest.insights.as_ref().unwrap();
    assert_eq!(run.reports_analyzed, 3);
    assert_eq!(run.skipped_rate.current, 20.0);
    assert_eq!(run.skipped_rate.previous, 0.0);
    assert_eq!(run.skipped_rate.change, 20.0);

    let tests = latest.tests().unwrap();
    let a = tests[0].insights.as_ref().unwrap();
    assert_eq!(a.appears_in_runs, 3);
    assert_eq!(a.fail_rate.current, 33.33);
    assert_eq!(a.fail_rate.previous, 50.0);
    assert_eq!(a.fail_rate.change, -16.67);

    let c = tests[1].insights.as_ref().unwrap();
    assert_eq!(c.skipped_rate.current, 100.0);
    assert_eq!(c.skipped_rate.change, 0.0);
}

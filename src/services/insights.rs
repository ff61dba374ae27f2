//! Insight snapshot composition and report enrichment.

use std::collections::HashMap;

use tracing::{debug, info};

use crate::models::{Insights, InsightsMetric, Report, TestInsights};
use crate::services::aggregation::{Aggregation, IdentityMode, TestMetrics, aggregate};
use crate::services::baseline::{diff_insights, diff_test_insights};
use crate::services::rates;

/// Build a current-only run snapshot from an aggregation.
pub fn run_insights_from(aggregation: &Aggregation) -> Insights {
    let run = aggregation.consolidate();
    let counters = &run.counters;

    Insights {
        flaky_rate: InsightsMetric::current_only(rates::flaky_rate(counters)),
        fail_rate: InsightsMetric::current_only(rates::fail_rate(counters)),
        skipped_rate: InsightsMetric::current_only(rates::skipped_rate(counters)),
        average_test_duration: InsightsMetric::current_only(rates::average_test_duration(
            counters,
        )),
        average_run_duration: InsightsMetric::current_only(rates::average_run_duration(
            counters,
            run.reports_analyzed,
        )),
        reports_analyzed: run.reports_analyzed,
        extra: serde_json::to_value(run).ok(),
    }
}

/// Build a current-only test snapshot from one test's accumulated metrics.
pub fn test_insights_from(metrics: &TestMetrics) -> TestInsights {
    let counters = &metrics.counters;

    TestInsights {
        flaky_rate: InsightsMetric::current_only(rates::flaky_rate(counters)),
        fail_rate: InsightsMetric::current_only(rates::fail_rate(counters)),
        skipped_rate: InsightsMetric::current_only(rates::skipped_rate(counters)),
        average_test_duration: InsightsMetric::current_only(rates::average_test_duration(
            counters,
        )),
        appears_in_runs: metrics.appears_in_runs,
        extra: serde_json::to_value(metrics).ok(),
    }
}

/// Compose the run-level snapshot for a set of reports.
pub fn compose_run_insights<'a, I>(reports: I, mode: IdentityMode) -> Insights
where
    I: IntoIterator<Item = &'a Report>,
{
    run_insights_from(&aggregate(reports, mode))
}

/// Compose the snapshot of one test across a set of reports.
///
/// A test never observed in any report yields an all-zero snapshot.
pub fn compose_test_insights<'a, I>(key: &str, reports: I, mode: IdentityMode) -> TestInsights
where
    I: IntoIterator<Item = &'a Report>,
{
    aggregate(reports, mode)
        .get(key)
        .map(test_insights_from)
        .unwrap_or_default()
}

/// Return a copy of `current` whose tests carry insights computed across
/// `current` and `previous`.
pub fn attach_test_insights(current: &Report, previous: &[Report], mode: IdentityMode) -> Report {
    let aggregation = aggregate(std::iter::once(current).chain(previous), mode);
    let mut report = current.clone();

    if let Some(tests) = report.results.tests.as_mut() {
        for test in tests.iter_mut() {
            if let Some(metrics) = aggregation.get(&mode.key(test)) {
                test.insights = Some(test_insights_from(metrics));
            }
        }
    }

    report
}

/// Return a copy of `current` carrying run insights and per-test insights.
///
/// Snapshots are computed over `current` followed by `previous`. When a
/// `baseline` report with attached insights is given, every snapshot is
/// compared against its counterpart there; tests absent from the baseline
/// keep a current-only snapshot.
pub fn enrich_report(
    current: &Report,
    previous: &[Report],
    baseline: Option<&Report>,
    mode: IdentityMode,
) -> Report {
    let aggregation = aggregate(std::iter::once(current).chain(previous), mode);
    info!(
        "Aggregated {} reports ({} skipped), {} distinct tests",
        aggregation.reports_analyzed,
        aggregation.reports_skipped,
        aggregation.tests.len()
    );

    let run_insights = run_insights_from(&aggregation);
    let baseline_insights = baseline.and_then(|b| b.insights.as_ref());

    let mut report = current.clone();
    report.insights = Some(match baseline_insights {
        Some(previous_insights) => diff_insights(Some(&run_insights), Some(previous_insights)),
        None => {
            info!("No baseline run insights available; reporting current values only");
            run_insights
        }
    });

    let baseline_tests = baseline_test_insights(baseline, mode);

    if let Some(tests) = report.results.tests.as_mut() {
        for test in tests.iter_mut() {
            let key = mode.key(test);
            let Some(metrics) = aggregation.get(&key) else {
                continue;
            };
            let snapshot = test_insights_from(metrics);

            test.insights = Some(match baseline_tests.get(key.as_str()).copied() {
                Some(previous_snapshot) => {
                    diff_test_insights(Some(&snapshot), Some(previous_snapshot))
                }
                None => {
                    debug!("Test '{}' has no baseline insights", key);
                    snapshot
                }
            });
        }
    }

    report
}

/// Attached test insights of a baseline report keyed by identity.
///
/// The first occurrence wins when an identity repeats within the report.
fn baseline_test_insights(
    baseline: Option<&Report>,
    mode: IdentityMode,
) -> HashMap<String, &TestInsights> {
    let mut map = HashMap::new();

    let Some(tests) = baseline.and_then(Report::tests) else {
        return map;
    };

    for test in tests {
        if let Some(insights) = test.insights.as_ref() {
            map.entry(mode.key(test)).or_insert(insights);
        }
    }

    map
}

//! Baseline comparison between two insight snapshots.
//!
//! Both snapshots must already carry current values; nothing is aggregated
//! here. A missing snapshot is not an error: the current snapshot comes back
//! unchanged and a warning is logged, so `previous`/`change` stay at 0.

use tracing::warn;

use crate::models::{Insights, TestInsights};

/// Compare a run snapshot against the one computed for a prior run.
pub fn diff_insights(current: Option<&Insights>, previous: Option<&Insights>) -> Insights {
    match (current, previous) {
        (Some(current), Some(previous)) => Insights {
            flaky_rate: current.flaky_rate.against(&previous.flaky_rate),
            fail_rate: current.fail_rate.against(&previous.fail_rate),
            skipped_rate: current.skipped_rate.against(&previous.skipped_rate),
            average_test_duration: current
                .average_test_duration
                .against(&previous.average_test_duration),
            average_run_duration: current
                .average_run_duration
                .against(&previous.average_run_duration),
            reports_analyzed: current.reports_analyzed,
            extra: current.extra.clone(),
        },
        (Some(current), None) => {
            warn!("No baseline insights to compare against; previous and change left at 0");
            current.clone()
        }
        (None, _) => {
            warn!("No current insights to compare; returning an empty snapshot");
            Insights::default()
        }
    }
}

/// Compare a test snapshot against the same test's snapshot from a prior run.
pub fn diff_test_insights(
    current: Option<&TestInsights>,
    previous: Option<&TestInsights>,
) -> TestInsights {
    match (current, previous) {
        (Some(current), Some(previous)) => TestInsights {
            flaky_rate: current.flaky_rate.against(&previous.flaky_rate),
            fail_rate: current.fail_rate.against(&previous.fail_rate),
            skipped_rate: current.skipped_rate.against(&previous.skipped_rate),
            average_test_duration: current
                .average_test_duration
                .against(&previous.average_test_duration),
            appears_in_runs: current.appears_in_runs,
            extra: current.extra.clone(),
        },
        (Some(current), None) => {
            warn!("No baseline test insights to compare against; previous and change left at 0");
            current.clone()
        }
        (None, _) => {
            warn!("No current test insights to compare; returning an empty snapshot");
            TestInsights::default()
        }
    }
}

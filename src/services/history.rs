//! Historical run extraction for trend displays.

use chrono::{DateTime, Utc};

use crate::models::{HistoricalRun, Report, RunStatus, TestResult};

/// Condense each report into a run record, preserving input order.
///
/// Without a build number the id falls back to `{start}_{index}`, which is
/// positional: it is only stable while the input order is.
pub fn extract_historical_runs(reports: &[Report]) -> Vec<HistoricalRun> {
    reports
        .iter()
        .enumerate()
        .map(|(index, report)| historical_run(report, index))
        .collect()
}

/// Condense a single report found at `index` of its list.
pub fn historical_run(report: &Report, index: usize) -> HistoricalRun {
    let summary = report.summary();
    let environment = report.environment();

    let build_number = environment
        .and_then(|env| env.build_number.clone())
        .filter(|number| !number.is_empty());

    let id = match &build_number {
        Some(number) => number.clone(),
        None => format!("{}_{}", summary.start, index),
    };

    let flaky = report
        .tests()
        .map(|tests| tests.iter().filter(|t| TestResult::is_flaky(t)).count())
        .map(|count| u32::try_from(count).unwrap_or(u32::MAX))
        .unwrap_or(0);

    HistoricalRun {
        id,
        date: DateTime::<Utc>::from_timestamp_millis(summary.start).unwrap_or_default(),
        status: RunStatus::from_counts(summary.passed, summary.failed),
        passed: summary.passed,
        failed: summary.failed,
        skipped: summary.skipped_like(),
        flaky,
        duration: summary.duration_ms(),
        build_number,
        build_url: environment.and_then(|env| env.build_url.clone()),
        build_name: environment.and_then(|env| env.build_name.clone()),
        branch_name: environment.and_then(|env| env.branch_name.clone()),
        commit: environment.and_then(|env| env.commit.clone()),
    }
}

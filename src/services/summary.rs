//! Markdown summary of an enriched report.

use std::fmt::Write;

use serde_json::json;

use crate::models::{HistoricalRun, InsightsMetric, Report};
use crate::services::formatting::FormatterRegistry;
use crate::services::ranking::{RankBy, top_tests};

/// Options controlling which tests appear in the summary rankings.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SummaryOptions {
    /// Minimum flaky rate for the flaky table
    pub flaky_threshold: f64,
    /// Minimum fail rate for the failing table
    pub fail_threshold: f64,
    /// Maximum rows per table
    pub top_n: usize,
}

impl Default for SummaryOptions {
    fn default() -> Self {
        SummaryOptions {
            flaky_threshold: 0.0,
            fail_threshold: 0.0,
            top_n: 10,
        }
    }
}

/// Render run insights, rankings and recent runs as Markdown.
pub fn render_markdown_summary(
    report: &Report,
    history: &[HistoricalRun],
    helpers: &FormatterRegistry,
    options: &SummaryOptions,
) -> String {
    let mut out = String::new();
    let title = report
        .environment()
        .and_then(|env| env.report_name.clone())
        .unwrap_or_else(|| "test insights".to_string());

    let _ = writeln!(out, "## {}", helpers.format_or_raw("toTitleCase", &json!(title)));
    let _ = writeln!(out);

    match report.insights.as_ref() {
        Some(insights) => {
            let _ = writeln!(out, "Analyzed {} reports.\n", insights.reports_analyzed);
            let _ = writeln!(out, "| Metric | Current | Previous | Change |");
            let _ = writeln!(out, "| --- | --- | --- | --- |");
            write_metric_row(&mut out, helpers, "Flaky rate", "formatRate", &insights.flaky_rate);
            write_metric_row(&mut out, helpers, "Fail rate", "formatRate", &insights.fail_rate);
            write_metric_row(
                &mut out,
                helpers,
                "Skipped rate",
                "formatRate",
                &insights.skipped_rate,
            );
            write_metric_row(
                &mut out,
                helpers,
                "Average test duration",
                "formatDuration",
                &insights.average_test_duration,
            );
            write_metric_row(
                &mut out,
                helpers,
                "Average run duration",
                "formatDuration",
                &insights.average_run_duration,
            );
        }
        None => {
            let _ = writeln!(out, "No insights available.");
        }
    }

    write_ranking(
        &mut out,
        report,
        helpers,
        "Flaky tests",
        RankBy::FlakyRate,
        options.flaky_threshold,
        options.top_n,
    );
    write_ranking(
        &mut out,
        report,
        helpers,
        "Failing tests",
        RankBy::FailRate,
        options.fail_threshold,
        options.top_n,
    );

    if !history.is_empty() {
        let _ = writeln!(out, "\n### Recent runs\n");
        let _ = writeln!(
            out,
            "| Run | Date | Status | Passed | Failed | Skipped | Flaky | Duration |"
        );
        let _ = writeln!(out, "| --- | --- | --- | --- | --- | --- | --- | --- |");
        for run in history {
            let id = helpers.format_or_raw("escapeMarkdown", &json!(run.id));
            let id = match &run.build_url {
                Some(url) => format!("[{}]({})", id, url),
                None => id,
            };
            let _ = writeln!(
                out,
                "| {} | {} | {} | {} | {} | {} | {} | {} |",
                id,
                helpers.format_or_raw("formatTimestamp", &json!(run.date.timestamp_millis())),
                run.status,
                run.passed,
                run.failed,
                run.skipped,
                run.flaky,
                helpers.format_or_raw("formatDuration", &json!(run.duration)),
            );
        }
    }

    out
}

fn write_metric_row(
    out: &mut String,
    helpers: &FormatterRegistry,
    label: &str,
    value_helper: &str,
    metric: &InsightsMetric,
) {
    let _ = writeln!(
        out,
        "| {} | {} | {} | {} |",
        label,
        helpers.format_or_raw(value_helper, &json!(metric.current)),
        helpers.format_or_raw(value_helper, &json!(metric.previous)),
        helpers.format_or_raw("formatChange", &json!(metric.change)),
    );
}

fn write_ranking(
    out: &mut String,
    report: &Report,
    helpers: &FormatterRegistry,
    heading: &str,
    by: RankBy,
    threshold: f64,
    limit: usize,
) {
    let tests = top_tests(report, by, threshold, limit);
    if tests.is_empty() {
        return;
    }

    let _ = writeln!(out, "\n### {}\n", heading);
    let _ = writeln!(out, "| Test | Rate | Change | Runs |");
    let _ = writeln!(out, "| --- | --- | --- | --- |");

    for test in tests {
        let Some(insights) = test.insights.as_ref() else {
            continue;
        };
        let metric = match by {
            RankBy::FlakyRate => &insights.flaky_rate,
            RankBy::FailRate => &insights.fail_rate,
            RankBy::AverageDuration => &insights.average_test_duration,
        };
        let _ = writeln!(
            out,
            "| {} | {} | {} | {} |",
            helpers.format_or_raw("escapeMarkdown", &json!(test.name)),
            helpers.format_or_raw("formatRate", &json!(metric.current)),
            helpers.format_or_raw("formatChange", &json!(metric.change)),
            insights.appears_in_runs,
        );
    }
}

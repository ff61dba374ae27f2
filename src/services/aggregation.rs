//! Per-test metrics aggregation across reports.
//!
//! Folds an ordered collection of reports into accumulated counters keyed by
//! test identity. The fold is pure: nothing is retained between calls and the
//! input reports are never modified.

use std::collections::{BTreeMap, HashSet};

use serde::Serialize;
use tracing::debug;

use crate::models::{Report, TestResult, TestStatus};

/// How tests in different reports are matched to each other.
///
/// Name-only matching treats two tests with the same name in different suites
/// as one test. `SuiteAndName` avoids that at the cost of splitting history
/// when a test moves between suites.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum IdentityMode {
    #[default]
    Name,
    SuiteAndName,
}

impl IdentityMode {
    /// Parse from configuration string.
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "name" => Some(Self::Name),
            "suite-name" | "suite_name" | "suite" => Some(Self::SuiteAndName),
            _ => None,
        }
    }

    /// Identity key for a test.
    pub fn key(&self, test: &TestResult) -> String {
        match (self, test.suite.as_deref()) {
            (Self::SuiteAndName, Some(suite)) if !suite.is_empty() => {
                format!("{} > {}", suite, test.name)
            }
            _ => test.name.clone(),
        }
    }
}

/// Raw counters shared by per-test and run-level metrics.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Counters {
    /// Executions including retries
    pub total_attempts: u64,
    /// Executions that failed, including the failures that triggered retries
    pub total_attempts_failed: u64,
    /// Final outcomes, one per appearance
    pub total_results: u64,
    pub total_results_failed: u64,
    pub total_results_passed: u64,
    /// Skipped, pending and other outcomes
    pub total_results_skipped: u64,
    pub total_results_flaky: u64,
    /// Sum of final-outcome durations in milliseconds
    pub total_results_duration: f64,
}

impl Counters {
    /// Account for one final test outcome.
    pub fn record(&mut self, test: &TestResult) {
        let retries = u64::from(test.retry_count());

        self.total_results += 1;
        self.total_attempts += 1 + retries;
        // Every retry follows a failed attempt; the final attempt only counts
        // when it failed too.
        self.total_attempts_failed += retries;

        match test.status {
            TestStatus::Failed => {
                self.total_results_failed += 1;
                self.total_attempts_failed += 1;
            }
            TestStatus::Passed => self.total_results_passed += 1,
            TestStatus::Skipped | TestStatus::Pending | TestStatus::Other => {
                self.total_results_skipped += 1
            }
        }

        if test.is_flaky() {
            self.total_results_flaky += 1;
        }

        self.total_results_duration += test.duration;
    }

    /// Add another bundle of counters into this one.
    pub fn merge(&mut self, other: &Counters) {
        self.total_attempts += other.total_attempts;
        self.total_attempts_failed += other.total_attempts_failed;
        self.total_results += other.total_results;
        self.total_results_failed += other.total_results_failed;
        self.total_results_passed += other.total_results_passed;
        self.total_results_skipped += other.total_results_skipped;
        self.total_results_flaky += other.total_results_flaky;
        self.total_results_duration += other.total_results_duration;
    }
}

/// Accumulated metrics for one test identity.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TestMetrics {
    #[serde(flatten)]
    pub counters: Counters,
    /// Number of reports containing this test at least once
    pub appears_in_runs: u32,
}

/// Counters consolidated over every test of an aggregation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RunMetrics {
    #[serde(flatten)]
    pub counters: Counters,
    /// Structurally valid reports folded
    pub reports_analyzed: u32,
    /// Distinct test identities observed
    pub tests_observed: u32,
}

/// Result of folding a set of reports.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Aggregation {
    /// Accumulated metrics per test identity
    pub tests: BTreeMap<String, TestMetrics>,
    /// Structurally valid reports folded
    pub reports_analyzed: u32,
    /// Reports skipped because `results.tests` was missing or not a list
    pub reports_skipped: u32,
}

impl Aggregation {
    /// Metrics for one test identity.
    pub fn get(&self, key: &str) -> Option<&TestMetrics> {
        self.tests.get(key)
    }

    /// Sum the per-test counters into one run-level bundle.
    pub fn consolidate(&self) -> RunMetrics {
        let mut counters = Counters::default();
        for metrics in self.tests.values() {
            counters.merge(&metrics.counters);
        }

        RunMetrics {
            counters,
            reports_analyzed: self.reports_analyzed,
            tests_observed: u32::try_from(self.tests.len()).unwrap_or(u32::MAX),
        }
    }
}

/// Fold reports into per-test counters.
///
/// Reports are processed in the order given. A report whose tests are missing
/// or malformed contributes nothing and is not an error. `appears_in_runs`
/// increases at most once per report, even when a name recurs within it.
pub fn aggregate<'a, I>(reports: I, mode: IdentityMode) -> Aggregation
where
    I: IntoIterator<Item = &'a Report>,
{
    let mut aggregation = Aggregation::default();

    for (index, report) in reports.into_iter().enumerate() {
        let Some(tests) = report.tests() else {
            debug!(
                "Skipping report {} (start {}): results.tests missing or not a list",
                index,
                report.summary().start
            );
            aggregation.reports_skipped += 1;
            continue;
        };

        aggregation.reports_analyzed += 1;
        let mut seen_in_report: HashSet<String> = HashSet::new();

        for test in tests {
            let key = mode.key(test);
            let metrics = aggregation.tests.entry(key.clone()).or_default();
            metrics.counters.record(test);

            if seen_in_report.insert(key) {
                metrics.appears_in_runs += 1;
            }
        }
    }

    aggregation
}

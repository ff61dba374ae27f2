//! Test rankings over attached insights.

use std::cmp::Ordering;

use crate::models::{Report, TestInsights, TestResult};

/// Metric used to order tests.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RankBy {
    FlakyRate,
    FailRate,
    AverageDuration,
}

impl RankBy {
    /// Current value of this metric in a test snapshot.
    pub fn value(&self, insights: &TestInsights) -> f64 {
        match self {
            Self::FlakyRate => insights.flaky_rate.current,
            Self::FailRate => insights.fail_rate.current,
            Self::AverageDuration => insights.average_test_duration.current,
        }
    }
}

/// Tests of `report` ordered by a metric, highest first.
///
/// Only tests with attached insights and a non-zero value of at least
/// `min_value` are kept. Ties are ordered by name. At most `limit` tests are
/// returned.
pub fn top_tests(report: &Report, by: RankBy, min_value: f64, limit: usize) -> Vec<&TestResult> {
    let Some(tests) = report.tests() else {
        return Vec::new();
    };

    let mut ranked: Vec<(&TestResult, f64)> = tests
        .iter()
        .filter_map(|test| {
            let value = by.value(test.insights.as_ref()?);
            (value > 0.0 && value >= min_value).then_some((test, value))
        })
        .collect();

    ranked.sort_by(|(a, a_value), (b, b_value)| {
        b_value
            .partial_cmp(a_value)
            .unwrap_or(Ordering::Equal)
            .then_with(|| a.name.cmp(&b.name))
    });

    ranked.into_iter().take(limit).map(|(test, _)| test).collect()
}

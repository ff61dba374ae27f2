//! Insight snapshot models.
//!
//! A snapshot is a point-in-time read of accumulated statistics. Each metric
//! carries its current value and, once compared against a baseline, the
//! previous value and the signed change.

use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;

/// Round half away from zero to two decimal places.
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// A single metric: current value, baseline value, and the difference.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct InsightsMetric {
    pub current: f64,
    #[serde(default)]
    pub previous: f64,
    #[serde(default)]
    pub change: f64,
}

impl InsightsMetric {
    /// Metric with no baseline yet.
    pub fn current_only(current: f64) -> Self {
        InsightsMetric {
            current,
            previous: 0.0,
            change: 0.0,
        }
    }

    /// Compare against the metric from a previous snapshot.
    pub fn against(&self, previous: &InsightsMetric) -> Self {
        InsightsMetric {
            current: self.current,
            previous: previous.current,
            change: round2(self.current - previous.current),
        }
    }
}

/// Run-level insight snapshot.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Insights {
    pub flaky_rate: InsightsMetric,
    pub fail_rate: InsightsMetric,
    pub skipped_rate: InsightsMetric,
    pub average_test_duration: InsightsMetric,
    pub average_run_duration: InsightsMetric,
    /// Number of structurally valid reports folded into this snapshot
    pub reports_analyzed: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub extra: Option<JsonValue>,
}

/// Test-level insight snapshot.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TestInsights {
    pub flaky_rate: InsightsMetric,
    pub fail_rate: InsightsMetric,
    pub skipped_rate: InsightsMetric,
    pub average_test_duration: InsightsMetric,
    /// Number of reports in which this test appears
    pub appears_in_runs: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub extra: Option<JsonValue>,
}

//! Test result model representing a single test outcome in a CTRF report.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value as JsonValue};

use super::TestInsights;

/// Final test execution status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TestStatus {
    Passed,
    Failed,
    Skipped,
    Pending,
    /// Any status string the producing tool reports that is not one of the above.
    #[serde(other)]
    Other,
}

impl TestStatus {
    /// Convert to the CTRF string representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Passed => "passed",
            Self::Failed => "failed",
            Self::Skipped => "skipped",
            Self::Pending => "pending",
            Self::Other => "other",
        }
    }

    /// Parse from string representation.
    pub fn parse(s: &str) -> Self {
        match s {
            "passed" => Self::Passed,
            "failed" => Self::Failed,
            "skipped" => Self::Skipped,
            "pending" => Self::Pending,
            _ => Self::Other,
        }
    }

    /// Whether the status counts towards the skipped bucket.
    ///
    /// Pending and other outcomes have no bucket of their own.
    pub fn is_skipped_like(&self) -> bool {
        matches!(self, Self::Skipped | Self::Pending | Self::Other)
    }
}

impl std::fmt::Display for TestStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Individual test outcome. `status` is the final outcome after retries.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TestResult {
    /// Test name, the cross-report identity key
    pub name: String,
    /// Final status
    pub status: TestStatus,
    /// Execution duration in milliseconds
    pub duration: f64,
    /// Suite (describe block or file) the test belongs to
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub suite: Option<String>,
    /// Additional attempts beyond the first
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub retries: Option<u32>,
    /// Explicit flaky flag set by the producing tool
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub flaky: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub trace: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file_path: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<String>>,
    /// Insights computed across this and previous reports
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub insights: Option<TestInsights>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub extra: Option<JsonValue>,
    /// Unrecognized fields, preserved on round-trip
    #[serde(flatten)]
    pub other: Map<String, JsonValue>,
}

impl TestResult {
    /// Create a new test result with no optional fields set.
    pub fn new(name: impl Into<String>, status: TestStatus, duration: f64) -> Self {
        TestResult {
            name: name.into(),
            status,
            duration,
            suite: None,
            retries: None,
            flaky: None,
            message: None,
            trace: None,
            file_path: None,
            tags: None,
            insights: None,
            extra: None,
            other: Map::new(),
        }
    }

    /// Retry count, zero when the tool did not report one.
    pub fn retry_count(&self) -> u32 {
        self.retries.unwrap_or(0)
    }

    /// Whether this outcome counts as flaky.
    ///
    /// A tool-reported flag wins. Otherwise a test that needed retries and
    /// ended up passing is flaky; one that retried and still failed is not.
    pub fn is_flaky(&self) -> bool {
        self.flaky == Some(true) || (self.retry_count() > 0 && self.status == TestStatus::Passed)
    }
}

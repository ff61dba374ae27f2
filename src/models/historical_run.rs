//! Condensed run record used for trend lists.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Coarse outcome of a whole run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RunStatus {
    /// No failures.
    Passed,
    /// Failures and no passes.
    Failed,
    /// Both passes and failures.
    Mixed,
}

impl RunStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Passed => "passed",
            Self::Failed => "failed",
            Self::Mixed => "mixed",
        }
    }

    /// Classify a run from its pass and fail counts.
    pub fn from_counts(passed: u32, failed: u32) -> Self {
        match (passed, failed) {
            (_, 0) => Self::Passed,
            (0, _) => Self::Failed,
            _ => Self::Mixed,
        }
    }
}

impl std::fmt::Display for RunStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Display-oriented summary of one historical report.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoricalRun {
    /// Build number, or `{start}_{index}` when the report has none
    pub id: String,
    /// Run start time
    pub date: DateTime<Utc>,
    pub status: RunStatus,
    pub passed: u32,
    pub failed: u32,
    /// Skipped, pending and other outcomes
    pub skipped: u32,
    pub flaky: u32,
    /// `stop - start` in milliseconds
    pub duration: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub build_number: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub build_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub build_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub branch_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub commit: Option<String>,
}

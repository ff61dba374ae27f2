//! Report summary statistics model.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value as JsonValue};

/// Summary statistics for a report, as written by the producing tool.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportStats {
    /// Total number of tests
    #[serde(default)]
    pub tests: u32,
    #[serde(default)]
    pub passed: u32,
    #[serde(default)]
    pub failed: u32,
    #[serde(default)]
    pub skipped: u32,
    #[serde(default)]
    pub pending: u32,
    #[serde(default)]
    pub other: u32,
    /// Run start, epoch milliseconds
    #[serde(default)]
    pub start: i64,
    /// Run stop, epoch milliseconds (never before `start`)
    #[serde(default)]
    pub stop: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub extra: Option<JsonValue>,
    /// Unrecognized fields such as `suites`, preserved on round-trip
    #[serde(flatten)]
    pub other_fields: Map<String, JsonValue>,
}

impl ReportStats {
    /// Create new report stats.
    pub fn new(passed: u32, failed: u32, skipped: u32, start: i64, stop: i64) -> Self {
        ReportStats {
            tests: passed.saturating_add(failed).saturating_add(skipped),
            passed,
            failed,
            skipped,
            pending: 0,
            other: 0,
            start,
            stop,
            extra: None,
            other_fields: Map::new(),
        }
    }

    /// Wall-clock duration of the run in milliseconds.
    pub fn duration_ms(&self) -> i64 {
        self.stop.saturating_sub(self.start).max(0)
    }

    /// Skipped, pending and other outcomes folded into one count.
    pub fn skipped_like(&self) -> u32 {
        self.skipped
            .saturating_add(self.pending)
            .saturating_add(self.other)
    }
}

//! Domain models for CTRF reports and the insights computed from them.

pub mod historical_run;
pub mod insights;
pub mod report;
pub mod report_stats;
pub mod test_result;

// Re-export commonly used types
pub use historical_run::{HistoricalRun, RunStatus};
pub use insights::{Insights, InsightsMetric, TestInsights, round2};
pub use report::{Environment, Report, Results, TestList, Tool};
pub use report_stats::ReportStats;
pub use test_result::{TestResult, TestStatus};

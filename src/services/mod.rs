//! Insights engine and its collaborators.

pub mod aggregation;
pub mod baseline;
pub mod formatting;
pub mod history;
pub mod insights;
pub mod ranking;
pub mod rates;
pub mod storage;
pub mod summary;

pub use aggregation::{Aggregation, IdentityMode, TestMetrics, aggregate};
pub use baseline::{diff_insights, diff_test_insights};
pub use formatting::FormatterRegistry;
pub use history::extract_historical_runs;
pub use insights::{
    attach_test_insights, compose_run_insights, compose_test_insights, enrich_report,
};
pub use summary::{SummaryOptions, render_markdown_summary};

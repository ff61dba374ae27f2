//! Insights E2E test suite.
//!
//! Exercises the public library API end-to-end: aggregation across report
//! histories, baseline comparison, historical runs and the report store.
//!
//! Run with: cargo test --test insights_e2e

mod test_helpers;

mod test_aggregation;
mod test_baseline;
mod test_history;
mod test_report_store;

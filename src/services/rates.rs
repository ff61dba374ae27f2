//! Rate and average derivation from accumulated counters.
//!
//! Every function returns a value rounded to two decimals. A zero denominator
//! yields 0, never NaN or infinity.

use crate::models::round2;
use crate::services::aggregation::Counters;

fn ratio(numerator: f64, denominator: f64) -> f64 {
    if denominator == 0.0 {
        0.0
    } else {
        numerator / denominator
    }
}

/// Percentage of attempts that were flaky.
pub fn flaky_rate(counters: &Counters) -> f64 {
    round2(100.0 * ratio(counters.total_results_flaky as f64, counters.total_attempts as f64))
}

/// Percentage of final results that failed.
pub fn fail_rate(counters: &Counters) -> f64 {
    round2(100.0 * ratio(counters.total_results_failed as f64, counters.total_results as f64))
}

/// Percentage of final results that were skipped, pending or other.
pub fn skipped_rate(counters: &Counters) -> f64 {
    round2(100.0 * ratio(counters.total_results_skipped as f64, counters.total_results as f64))
}

/// Mean duration of a final result in milliseconds.
pub fn average_test_duration(counters: &Counters) -> f64 {
    round2(ratio(counters.total_results_duration, counters.total_results as f64))
}

/// Mean summed test duration per analyzed report in milliseconds.
pub fn average_run_duration(counters: &Counters, reports_analyzed: u32) -> f64 {
    round2(ratio(counters.total_results_duration, f64::from(reports_analyzed)))
}

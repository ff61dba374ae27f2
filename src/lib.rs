//! Test insights library.
//!
//! Computes flakiness, failure, skip and duration insights for CTRF test
//! reports across a history of runs, compares them against a baseline, and
//! condenses runs for trend displays.

pub mod config;
pub mod error;
pub mod models;
pub mod services;

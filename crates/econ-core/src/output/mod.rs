//! Metrics records and stats output.

pub mod stats;

pub use stats::{gini, median, variance, write_stats, RunResult, RunStats, StepMetrics};

//! Parameter sweep harness.
//!
//! Repeatedly invokes the simulation entry point with one overridden
//! parameter at a time and summarizes how the outcomes respond. The
//! simulation itself is a black box behind `econ_core::run_simulation`;
//! this crate only varies configurations and reads back result records.
//!
//! ```text
//! base SimConfig + SweepRange ──▶ run_sweep ──▶ SweepReport ──▶ report.json
//! ```

pub mod ranges;
pub mod report;
pub mod runner;

pub use ranges::{default_ranges, linspace, SweepParam, SweepRange};
pub use report::{write_report, SweepError, SweepReport, SweepSummary};
pub use runner::{run_sweep, SweepRecord};

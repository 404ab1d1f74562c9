//! Sweep execution.

use econ_core::{run_simulation, ConfigError, RunResult, SimConfig};
use serde::{Deserialize, Serialize};

use crate::ranges::SweepRange;
use crate::report::SweepReport;

/// One completed run within a sweep.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SweepRecord {
    pub run_id: String,
    pub param: String,
    pub value: f64,
    pub result: RunResult,
}

/// Generates a run ID with the given sequence number.
pub fn generate_run_id(sequence: u64) -> String {
    format!("run_{:04}", sequence)
}

/// Run every (parameter, value) combination against the base config.
///
/// Each run gets `base_seed + run index` as its seed: runs stay
/// independent of each other while the whole sweep reproduces from a
/// single seed.
pub fn run_sweep(
    base: &SimConfig,
    ranges: &[SweepRange],
    base_seed: u64,
) -> Result<SweepReport, ConfigError> {
    let mut records = Vec::new();
    let mut run_index = 0u64;

    for range in ranges {
        tracing::info!(param = range.param.key(), runs = range.values.len(), "sweeping parameter");
        for &value in &range.values {
            let mut config = base.clone();
            range.param.apply(&mut config, value);
            let result = run_simulation(&config, base_seed.wrapping_add(run_index))?;
            tracing::debug!(
                param = range.param.key(),
                value,
                bankruptcies = result.bankruptcies,
                "sweep run complete"
            );
            records.push(SweepRecord {
                run_id: generate_run_id(run_index),
                param: range.param.key().to_string(),
                value,
                result,
            });
            run_index += 1;
        }
    }

    Ok(SweepReport::new(records))
}

//! Sweep report and analysis.
//!
//! Picks out the parameter values that optimize the outcomes the sweep
//! cares about and writes the full record set as JSON.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use thiserror::Error;

use crate::runner::SweepRecord;

/// All records from a completed sweep.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SweepReport {
    records: Vec<SweepRecord>,
}

/// Condensed analysis of a sweep.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SweepSummary {
    pub total_runs: usize,
    /// Tax rate that minimized bankruptcies, if the sweep varied it.
    pub best_tax_rate: Option<f64>,
    /// Regen rate that maximized average final balance, if swept.
    pub best_regen_rate: Option<f64>,
}

impl SweepReport {
    pub fn new(records: Vec<SweepRecord>) -> Self {
        Self { records }
    }

    pub fn records(&self) -> &[SweepRecord] {
        &self.records
    }

    fn for_param<'a>(&'a self, key: &'a str) -> impl Iterator<Item = &'a SweepRecord> + 'a {
        self.records.iter().filter(move |r| r.param == key)
    }

    /// The tax-rate run with the fewest bankruptcies.
    pub fn best_tax_rate(&self) -> Option<&SweepRecord> {
        self.for_param("tax_rate").min_by_key(|r| r.result.bankruptcies)
    }

    /// The regen-rate run with the highest average final balance.
    pub fn best_regen_rate(&self) -> Option<&SweepRecord> {
        self.for_param("regen_rate").max_by(|a, b| {
            a.result
                .avg_final_balance
                .partial_cmp(&b.result.avg_final_balance)
                .unwrap_or(std::cmp::Ordering::Equal)
        })
    }

    pub fn summary(&self) -> SweepSummary {
        SweepSummary {
            total_runs: self.records.len(),
            best_tax_rate: self.best_tax_rate().map(|r| r.value),
            best_regen_rate: self.best_regen_rate().map(|r| r.value),
        }
    }
}

/// Sweep output error type
#[derive(Debug, Error)]
pub enum SweepError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Serialization error: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// Write the full report as pretty JSON, creating parent directories as
/// needed.
pub fn write_report(path: impl AsRef<Path>, report: &SweepReport) -> Result<(), SweepError> {
    let path = path.as_ref();
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            fs::create_dir_all(parent)?;
        }
    }
    let json = serde_json::to_string_pretty(report)?;
    fs::write(path, json)?;
    Ok(())
}

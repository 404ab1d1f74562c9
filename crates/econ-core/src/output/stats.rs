//! Statistics Output
//!
//! Inequality and dispersion measures, the per-step metrics record, the
//! final run result, and the JSON stats writer.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::config::SimConfig;

/// Gini coefficient of a balance distribution, 0 = perfectly equal.
///
/// Computed over the sorted balances as
/// `(sum((i+1) * b_i) - sum((n-i) * b_i)) / (n * sum(b))`.
/// Defined as 0 for fewer than two balances or a zero total. That is a
/// boundary policy to keep degenerate steps numerically quiet, not a
/// meaningful equality measure for tiny rosters.
pub fn gini(balances: &[f64]) -> f64 {
    let n = balances.len();
    if n < 2 {
        return 0.0;
    }
    let mut sorted = balances.to_vec();
    sorted.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));

    let mut numerator = 0.0;
    let mut total = 0.0;
    for (i, &balance) in sorted.iter().enumerate() {
        numerator += (i + 1) as f64 * balance - (n - i) as f64 * balance;
        total += balance;
    }
    let denominator = n as f64 * total;
    if denominator == 0.0 {
        return 0.0;
    }
    numerator / denominator
}

/// Median of a sample; 0 for an empty one.
pub fn median(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    let mut sorted = values.to_vec();
    sorted.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));
    let mid = sorted.len() / 2;
    if sorted.len() % 2 == 1 {
        sorted[mid]
    } else {
        (sorted[mid - 1] + sorted[mid]) / 2.0
    }
}

/// Population variance of a sample; 0 for an empty one.
pub fn variance(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    let n = values.len() as f64;
    let mean = values.iter().sum::<f64>() / n;
    values.iter().map(|v| (v - mean) * (v - mean)).sum::<f64>() / n
}

/// Metrics for a single step, produced fresh after bankruptcy resolution.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StepMetrics {
    pub step: u64,
    /// Gini coefficient of active balances.
    pub gini: f64,
    pub median_balance: f64,
    /// Load/capacity ratio per pool, indexed by pool id.
    pub resource_utilization: Vec<f64>,
    pub price_variance: f64,
    /// Active agents as a fraction of the starting population.
    pub active_fraction: f64,
    /// Tax collected this step (destroyed rather than redistributed when
    /// the roster is empty).
    pub tax_redistributed: f64,
    /// Active balances plus the market value of allocated load.
    pub economic_output: f64,
}

/// Aggregate result of a completed run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunResult {
    /// Mean balance of the surviving roster; 0 when nobody survived.
    pub avg_final_balance: f64,
    pub final_gini: f64,
    /// Agents that went bankrupt at any point during the run.
    pub bankruptcies: usize,
    /// Mean price in the last recorded snapshot; 0 for a zero-step run.
    pub avg_final_price: f64,
    /// The last step's metrics record; absent for a zero-step run.
    pub last_step: Option<StepMetrics>,
}

/// Full report for a run: configuration echo, seed, histories, result.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunStats {
    pub seed: u64,
    pub config: SimConfig,
    pub balance_history: Vec<Vec<f64>>,
    pub price_history: Vec<Vec<f64>>,
    pub result: RunResult,
}

/// Write a run report as pretty JSON, creating parent directories as
/// needed.
pub fn write_stats(path: impl AsRef<Path>, stats: &RunStats) -> std::io::Result<()> {
    let path = path.as_ref();
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            fs::create_dir_all(parent)?;
        }
    }
    let json = serde_json::to_string_pretty(stats)
        .map_err(|e| std::io::Error::new(std::io::ErrorKind::Other, e))?;
    fs::write(path, json)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gini_known_value() {
        assert!((gini(&[10.0, 20.0, 30.0]) - 0.2222).abs() < 1e-3);
    }

    #[test]
    fn test_gini_equal_balances_is_zero() {
        for x in [1.0, 42.0, 1e6] {
            assert_eq!(gini(&[x, x, x]), 0.0);
        }
    }

    #[test]
    fn test_gini_degenerate_cases() {
        assert_eq!(gini(&[]), 0.0);
        assert_eq!(gini(&[17.0]), 0.0);
        assert_eq!(gini(&[0.0, 0.0, 0.0]), 0.0);
    }

    #[test]
    fn test_gini_sort_order_is_irrelevant() {
        assert_eq!(gini(&[30.0, 10.0, 20.0]), gini(&[10.0, 20.0, 30.0]));
    }

    #[test]
    fn test_gini_stays_in_unit_interval() {
        let samples: [&[f64]; 4] = [
            &[1.0, 1.0, 1.0, 1000.0],
            &[0.0, 0.0, 0.0, 5.0],
            &[3.0, 1.0, 4.0, 1.0, 5.0, 9.0, 2.0, 6.0],
            &[100.0, 100.1],
        ];
        for balances in samples {
            let g = gini(balances);
            assert!((0.0..=1.0).contains(&g), "gini {g} out of range for {balances:?}");
        }
    }

    #[test]
    fn test_median_odd_and_even() {
        assert_eq!(median(&[3.0, 1.0, 2.0]), 2.0);
        assert_eq!(median(&[4.0, 1.0, 2.0, 3.0]), 2.5);
        assert_eq!(median(&[]), 0.0);
    }

    #[test]
    fn test_variance() {
        assert_eq!(variance(&[2.0, 2.0, 2.0]), 0.0);
        assert!((variance(&[1.0, 2.0, 3.0]) - 2.0 / 3.0).abs() < 1e-12);
        assert_eq!(variance(&[]), 0.0);
    }
}

//! Sweepable parameters and their value ranges.

use econ_core::SimConfig;
use serde::{Deserialize, Serialize};

/// A configuration knob the sweep can vary, one run at a time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SweepParam {
    PriceElasticity,
    RegenRate,
    TaxRate,
    ExpenseRate,
}

impl SweepParam {
    pub fn all() -> [SweepParam; 4] {
        [
            SweepParam::PriceElasticity,
            SweepParam::RegenRate,
            SweepParam::TaxRate,
            SweepParam::ExpenseRate,
        ]
    }

    /// Stable key used in reports and logs.
    pub fn key(&self) -> &'static str {
        match self {
            SweepParam::PriceElasticity => "price_elasticity",
            SweepParam::RegenRate => "regen_rate",
            SweepParam::TaxRate => "tax_rate",
            SweepParam::ExpenseRate => "expense_rate",
        }
    }

    /// Write the value into the matching config field.
    pub fn apply(&self, config: &mut SimConfig, value: f64) {
        match self {
            SweepParam::PriceElasticity => config.price_elasticity = value,
            SweepParam::RegenRate => config.regen_rate = value,
            SweepParam::TaxRate => config.tax_rate = value,
            SweepParam::ExpenseRate => config.expense_rate = value,
        }
    }
}

/// A parameter together with the values to try for it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SweepRange {
    pub param: SweepParam,
    pub values: Vec<f64>,
}

/// Evenly spaced values from `start` to `stop` inclusive.
pub fn linspace(start: f64, stop: f64, count: usize) -> Vec<f64> {
    match count {
        0 => Vec::new(),
        1 => vec![start],
        _ => {
            let step = (stop - start) / (count - 1) as f64;
            (0..count).map(|i| start + step * i as f64).collect()
        }
    }
}

/// The standard sweep: ten points per parameter.
pub fn default_ranges() -> Vec<SweepRange> {
    vec![
        SweepRange {
            param: SweepParam::PriceElasticity,
            values: linspace(0.01, 0.1, 10),
        },
        SweepRange {
            param: SweepParam::RegenRate,
            values: linspace(0.005, 0.02, 10),
        },
        SweepRange {
            param: SweepParam::TaxRate,
            values: linspace(0.0, 0.05, 10),
        },
        SweepRange {
            param: SweepParam::ExpenseRate,
            values: linspace(0.1, 0.5, 10),
        },
    ]
}

//! Simulation Configuration
//!
//! All tuning parameters for a run, loadable from TOML for adjustment
//! without recompiling. A config is validated once at construction and
//! then treated as immutable for the whole run.

use bevy_ecs::prelude::Resource;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use thiserror::Error;

/// Default config file path
pub const DEFAULT_CONFIG_PATH: &str = "economy.toml";

/// Parameters for a single simulation run.
///
/// `population`, `steps`, `price_elasticity`, `regen_rate`, `tax_rate`,
/// `expense_rate` and the imbalance pair are the knobs callers usually
/// override; the rest are stable economy constants.
#[derive(Debug, Clone, Resource, Serialize, Deserialize)]
#[serde(default)]
pub struct SimConfig {
    /// Number of agents created at run start.
    pub population: usize,
    /// Number of resource pools. Must be at least 1.
    pub num_resources: usize,
    /// Number of discrete steps to run.
    pub steps: u64,
    /// Starting balance for every agent (before any imbalance skew).
    pub initial_balance: f64,
    /// Starting capacity of every resource pool.
    pub resource_capacity: f64,
    /// Hard ceiling on pool capacity growth.
    pub max_capacity: f64,
    /// Price of a pool at zero utilization.
    pub base_cost: f64,
    /// Linear elasticity: price = base_cost * (1 + utilization * elasticity).
    pub price_elasticity: f64,
    /// Fraction of a pool's load released every step.
    pub deallocation_rate: f64,
    /// Base multiplicative capacity regrowth per step.
    pub regen_rate: f64,
    /// Extra regrowth per unit of mean active balance.
    pub dynamic_regen_multiplier: f64,
    /// Capacity growth per unit of total economic output.
    pub capacity_output_multiplier: f64,
    /// Flat proportional tax applied to every active agent each step.
    pub tax_rate: f64,
    /// Base per-step income.
    pub base_income: f64,
    /// Extra income per unit of average resource price.
    pub dynamic_income_multiplier: f64,
    /// Ceiling on per-step income.
    pub income_ceiling: f64,
    /// Mean per-step expense; the realized expense is noisy.
    pub expense_rate: f64,
    /// Balance floor below which an agent withholds all proposals.
    pub min_balance: f64,
    /// Balance at or below which an agent is permanently retired.
    pub bankruptcy_threshold: f64,
    /// Scalar applied to every demand proposal. Static unless a
    /// [`DemandPolicy`](crate::components::agent::DemandPolicy) adjusts it.
    pub demand_multiplier: f64,
    /// Seed a deterministic wealth skew at run start.
    pub initial_imbalance: bool,
    /// Fraction of agents (lowest ids) whose starting balance is doubled
    /// when `initial_imbalance` is set; the rest are halved.
    pub imbalance_strength: f64,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            population: 100,
            num_resources: 3,
            steps: 100,
            initial_balance: 100.0,
            resource_capacity: 100.0,
            max_capacity: 1000.0,
            base_cost: 1.0,
            price_elasticity: 0.05,
            deallocation_rate: 0.1,
            regen_rate: 0.01,
            dynamic_regen_multiplier: 1e-4,
            capacity_output_multiplier: 1e-6,
            tax_rate: 0.02,
            base_income: 5.0,
            dynamic_income_multiplier: 0.5,
            income_ceiling: 15.0,
            expense_rate: 0.3,
            min_balance: 10.0,
            bankruptcy_threshold: 0.0,
            demand_multiplier: 0.1,
            initial_imbalance: false,
            imbalance_strength: 0.1,
        }
    }
}

impl SimConfig {
    /// Load configuration from a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content =
            fs::read_to_string(path.as_ref()).map_err(|e| ConfigError::Io(e.to_string()))?;
        let config: Self =
            toml::from_str(&content).map_err(|e| ConfigError::Parse(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from the default path, or use defaults if absent.
    pub fn load_or_default() -> Self {
        Self::load(DEFAULT_CONFIG_PATH).unwrap_or_else(|e| {
            tracing::warn!("could not load {}: {}; using defaults", DEFAULT_CONFIG_PATH, e);
            Self::default()
        })
    }

    /// Reject malformed configurations before a run starts.
    ///
    /// A population of zero and a step count of zero are legal degenerate
    /// runs; everything here guards against parameters that would make the
    /// arithmetic meaningless rather than merely boring.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.num_resources == 0 {
            return Err(ConfigError::Invalid("num_resources must be at least 1".into()));
        }
        if self.resource_capacity <= 0.0 {
            return Err(ConfigError::Invalid("resource_capacity must be positive".into()));
        }
        if self.max_capacity < self.resource_capacity {
            return Err(ConfigError::Invalid(
                "max_capacity must be at least resource_capacity".into(),
            ));
        }
        if self.base_cost <= 0.0 {
            return Err(ConfigError::Invalid("base_cost must be positive".into()));
        }
        if !(0.0..=1.0).contains(&self.deallocation_rate) {
            return Err(ConfigError::Invalid("deallocation_rate must be in [0, 1]".into()));
        }
        if !(0.0..=1.0).contains(&self.imbalance_strength) {
            return Err(ConfigError::Invalid("imbalance_strength must be in [0, 1]".into()));
        }
        for (name, value) in [
            ("price_elasticity", self.price_elasticity),
            ("regen_rate", self.regen_rate),
            ("dynamic_regen_multiplier", self.dynamic_regen_multiplier),
            ("capacity_output_multiplier", self.capacity_output_multiplier),
            ("tax_rate", self.tax_rate),
            ("expense_rate", self.expense_rate),
            ("demand_multiplier", self.demand_multiplier),
        ] {
            if value < 0.0 {
                return Err(ConfigError::Invalid(format!("{name} must be non-negative")));
            }
        }
        Ok(())
    }
}

/// Configuration error type
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(String),
    #[error("Parse error: {0}")]
    Parse(String),
    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

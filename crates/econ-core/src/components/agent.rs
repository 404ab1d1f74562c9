//! Agent Components
//!
//! Components for individual agents: identity, balance, demand profile,
//! and solvency state.

use bevy_ecs::prelude::*;
use rand::rngs::SmallRng;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::config::SimConfig;

/// Unique identifier for an agent, assigned densely from 0 at run start.
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AgentId(pub u32);

/// An agent's balance. Signed: it may go negative before the bankruptcy
/// phase notices, since expenses and taxes debit unconditionally.
#[derive(Component, Debug, Clone, Serialize, Deserialize)]
pub struct Wallet {
    pub balance: f64,
}

impl Wallet {
    pub fn new(balance: f64) -> Self {
        Self { balance }
    }

    pub fn credit(&mut self, amount: f64) {
        self.balance += amount;
    }

    pub fn debit(&mut self, amount: f64) {
        self.balance -= amount;
    }

    /// Unconditional debit used by the taxation phase.
    pub fn tax(&mut self, amount: f64) {
        self.balance -= amount;
    }
}

/// An agent's demand profile: one preference weight in [0, 1] per resource
/// pool, plus a scalar multiplier applied to every proposal.
#[derive(Component, Debug, Clone, Serialize, Deserialize)]
pub struct Demand {
    pub preference: Vec<f64>,
    pub multiplier: f64,
}

impl Demand {
    /// Random initial preferences, one weight per pool.
    pub fn new(num_resources: usize, multiplier: f64, rng: &mut SmallRng) -> Self {
        let preference = (0..num_resources).map(|_| rng.gen_range(0.0..1.0)).collect();
        Self { preference, multiplier }
    }

    /// Fixed preferences, for tests and deterministic scenarios.
    pub fn with_preference(preference: Vec<f64>, multiplier: f64) -> Self {
        Self { preference, multiplier }
    }

    /// Propose an amount for every pool, given the step-start price and
    /// availability snapshots.
    ///
    /// Desired amount falls linearly with price and reaches zero at five
    /// times the base cost, then is clamped to what the pool can still
    /// supply. A proposal is withheld unless the balance covers its cost
    /// at snapshot prices and sits above the configured floor.
    pub fn requests(
        &self,
        prices: &[f64],
        availability: &[f64],
        balance: f64,
        config: &SimConfig,
    ) -> Vec<(usize, f64)> {
        let mut requests = Vec::new();
        for (i, &weight) in self.preference.iter().enumerate() {
            let desired =
                weight * (1.0 - prices[i] / (config.base_cost * 5.0)) * self.multiplier;
            let amount = desired.clamp(0.0, availability[i]);
            if balance >= prices[i] * amount && balance > config.min_balance {
                requests.push((i, amount));
            }
        }
        requests
    }

    /// Random walk on the preference vector: independent uniform noise in
    /// [-0.1, 0.1] per component, clamped back into [0, 1].
    pub fn drift(&mut self, rng: &mut SmallRng) {
        for weight in self.preference.iter_mut() {
            *weight = (*weight + rng.gen_range(-0.1..0.1)).clamp(0.0, 1.0);
        }
    }
}

/// Solvency state. The flag is monotonic: once an agent goes bankrupt it
/// never returns to the active roster.
#[derive(Component, Debug, Clone, Default, Serialize, Deserialize)]
pub struct Solvency {
    pub bankrupt: bool,
}

impl Solvency {
    /// Flip to bankrupt when the balance is at or below the threshold.
    /// Returns true only on the step where the transition fires.
    pub fn check(&mut self, balance: f64, threshold: f64) -> bool {
        if balance <= threshold && !self.bankrupt {
            self.bankrupt = true;
            return true;
        }
        false
    }
}

/// Hook for evolving the demand multiplier over time.
///
/// The maintenance phase calls this every step. The default implementation
/// leaves the multiplier untouched; injecting a different policy changes
/// demand dynamics without touching the pipeline itself.
pub trait DemandPolicy: Send + Sync {
    fn adjust(&self, demand: &mut Demand, step: u64);
}

/// Default policy: the demand multiplier stays fixed.
#[derive(Debug, Default)]
pub struct StaticDemand;

impl DemandPolicy for StaticDemand {
    fn adjust(&self, _demand: &mut Demand, _step: u64) {}
}

/// The demand policy active for the current run.
#[derive(Resource)]
pub struct DemandPolicyHandle(pub Box<dyn DemandPolicy>);

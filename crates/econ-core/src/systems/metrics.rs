//! Metrics Collection
//!
//! Builds the per-step metrics record from the post-resolution active
//! roster and accumulates the run history.

use bevy_ecs::prelude::*;

use crate::components::agent::{Solvency, Wallet};
use crate::components::market::Market;
use crate::config::SimConfig;
use crate::output::stats::{gini, median, variance, StepMetrics};
use crate::systems::{StepClock, StepLedger};

/// Accumulated history for the current run. The driver keeps balance and
/// price snapshots per step plus the most recent metrics record.
#[derive(Resource, Debug, Default)]
pub struct RunHistory {
    pub balance_history: Vec<Vec<f64>>,
    pub price_history: Vec<Vec<f64>>,
    pub last_metrics: Option<StepMetrics>,
}

/// System: compute step metrics and append snapshots to the history.
pub fn collect_metrics(
    config: Res<SimConfig>,
    clock: Res<StepClock>,
    ledger: Res<StepLedger>,
    market: Res<Market>,
    mut history: ResMut<RunHistory>,
    agents: Query<(&Wallet, &Solvency)>,
) {
    let balances: Vec<f64> = agents
        .iter()
        .filter(|(_, solvency)| !solvency.bankrupt)
        .map(|(wallet, _)| wallet.balance)
        .collect();
    let prices = market.prices();

    let active_fraction = if config.population == 0 {
        0.0
    } else {
        balances.len() as f64 / config.population as f64
    };

    let metrics = StepMetrics {
        step: clock.step,
        gini: gini(&balances),
        median_balance: median(&balances),
        resource_utilization: market.pools().iter().map(|p| p.utilization()).collect(),
        price_variance: variance(&prices),
        active_fraction,
        tax_redistributed: ledger.tax_redistributed,
        economic_output: balances.iter().sum::<f64>() + market.total_load_value(),
    };

    tracing::debug!(
        step = metrics.step,
        gini = metrics.gini,
        active = balances.len(),
        "step metrics collected"
    );

    history.balance_history.push(balances);
    history.price_history.push(prices);
    history.last_metrics = Some(metrics);
}

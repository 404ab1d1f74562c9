//! Resource Dynamics Phase
//!
//! Load decay, wealth-driven capacity regrowth, and output-driven capacity
//! expansion. The two capacity adjustments compose within the step.

use bevy_ecs::prelude::*;

use crate::components::agent::{Solvency, Wallet};
use crate::components::market::Market;
use crate::config::SimConfig;

/// Total economic output: all active balances plus the market value of
/// everything currently allocated.
pub fn economic_output(active_balance_sum: f64, market: &Market) -> f64 {
    active_balance_sum + market.total_load_value()
}

/// System: apply per-step resource dynamics.
pub fn resource_dynamics(
    config: Res<SimConfig>,
    mut market: ResMut<Market>,
    agents: Query<(&Wallet, &Solvency)>,
) {
    let cfg = &*config;

    let mut balance_sum = 0.0;
    let mut active = 0usize;
    for (wallet, solvency) in agents.iter() {
        if solvency.bankrupt {
            continue;
        }
        balance_sum += wallet.balance;
        active += 1;
    }
    let avg_balance = if active > 0 { balance_sum / active as f64 } else { 0.0 };

    for pool in market.pools_mut() {
        let released = pool.current_load * cfg.deallocation_rate;
        pool.deallocate(released);
    }

    for pool in market.pools_mut() {
        pool.regenerate(avg_balance, cfg);
    }

    // Output is measured after decay and regrowth, against the step's
    // stale price snapshot.
    let output = economic_output(balance_sum, &*market);
    for pool in market.pools_mut() {
        pool.adjust_capacity(output, cfg);
    }
}

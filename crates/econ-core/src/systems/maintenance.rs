//! Agent Maintenance Phase
//!
//! Preference drift, the demand-multiplier policy hook, recurring income,
//! and recurring expense.

use bevy_ecs::prelude::*;
use rand::Rng;

use crate::components::agent::{Demand, DemandPolicyHandle, Solvency, Wallet};
use crate::components::market::Market;
use crate::config::SimConfig;
use crate::systems::StepClock;
use crate::SimRng;

/// System: evolve each active agent and apply its recurring cash flows.
///
/// Income tracks the average resource price up to a ceiling; the expense
/// is a stochastic recurring cost independent of what the agent actually
/// consumed this step.
pub fn agent_maintenance(
    config: Res<SimConfig>,
    clock: Res<StepClock>,
    market: Res<Market>,
    policy: Res<DemandPolicyHandle>,
    mut rng: ResMut<SimRng>,
    mut agents: Query<(&mut Demand, &mut Wallet, &Solvency)>,
) {
    let avg_price = market.avg_price();
    let income = (config.base_income + config.dynamic_income_multiplier * avg_price)
        .min(config.income_ceiling);

    for (mut demand, mut wallet, solvency) in agents.iter_mut() {
        if solvency.bankrupt {
            continue;
        }
        demand.drift(&mut rng.0);
        policy.0.adjust(&mut *demand, clock.step);
        wallet.credit(income);
        let expense = config.expense_rate * (1.0 + rng.0.gen_range(-0.2..0.2));
        wallet.debit(expense);
    }
}

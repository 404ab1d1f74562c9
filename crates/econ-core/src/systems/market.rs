//! Market Allocation Phase
//!
//! Matches agent demand against pool capacity. All agents trade against
//! the step-start price and availability snapshots; contention is resolved
//! by processing the pooled proposals in uniformly random order, so no
//! agent or pool has priority.

use bevy_ecs::prelude::*;
use rand::seq::SliceRandom;

use crate::components::agent::{Demand, Solvency, Wallet};
use crate::components::market::Market;
use crate::config::SimConfig;
use crate::SimRng;

/// System: allocate resources to agents for one step.
///
/// Prices are recomputed once, up front; everything later in the step sees
/// that snapshot. Proposals are clipped against remaining headroom as they
/// are applied, so a pool's load never exceeds its capacity here.
pub fn market_phase(
    config: Res<SimConfig>,
    mut rng: ResMut<SimRng>,
    mut market: ResMut<Market>,
    mut agents: Query<(Entity, &Demand, &mut Wallet, &Solvency)>,
) {
    let cfg = &*config;

    for pool in market.pools_mut() {
        pool.update_price(cfg.base_cost, cfg.price_elasticity);
    }
    let prices = market.prices();
    let availability = market.availability();

    // Pool every proposal from every active agent into one flat list.
    let mut proposals: Vec<(Entity, usize, f64)> = Vec::new();
    for (entity, demand, wallet, solvency) in agents.iter() {
        if solvency.bankrupt {
            continue;
        }
        for (pool_id, amount) in demand.requests(&prices, &availability, wallet.balance, cfg) {
            proposals.push((entity, pool_id, amount));
        }
    }

    // The contention-resolution policy: uniformly random order.
    proposals.shuffle(&mut rng.0);

    for (entity, pool_id, amount) in proposals {
        let Some(pool) = market.get_mut(pool_id) else {
            continue;
        };
        let allocated = pool.allocate(amount);
        let cost = allocated * prices[pool_id];
        if let Ok((_, _, mut wallet, _)) = agents.get_mut(entity) {
            // The load increase above stands even when the agent can no
            // longer pay; only the debit is skipped. Whether unpaid
            // consumption should instead be rejected is an open product
            // question; until it is decided, this matches the running
            // system.
            if wallet.balance >= cost {
                wallet.balance -= cost;
            }
        }
    }
}

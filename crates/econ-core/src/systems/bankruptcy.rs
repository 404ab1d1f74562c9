//! Bankruptcy Resolution Phase
//!
//! Detects and permanently retires insolvent agents at the end of the
//! step. The transition is one-way; retired agents stay addressable by id
//! but are excluded from every phase from the next step on.

use bevy_ecs::prelude::*;

use crate::components::agent::{AgentId, Solvency, Wallet};
use crate::config::SimConfig;
use crate::systems::StepLedger;

/// System: flag agents whose balance is at or below the threshold.
pub fn resolve_bankruptcies(
    config: Res<SimConfig>,
    mut ledger: ResMut<StepLedger>,
    mut agents: Query<(&AgentId, &Wallet, &mut Solvency)>,
) {
    for (id, wallet, mut solvency) in agents.iter_mut() {
        if solvency.check(wallet.balance, config.bankruptcy_threshold) {
            ledger.bankruptcies += 1;
            tracing::debug!(agent = id.0, balance = wallet.balance, "agent retired insolvent");
        }
    }
}

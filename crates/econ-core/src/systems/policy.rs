//! Economic Policy Phase
//!
//! Flat proportional taxation with equal redistribution among the living.

use bevy_ecs::prelude::*;

use crate::components::agent::{Solvency, Wallet};
use crate::config::SimConfig;
use crate::systems::StepLedger;

/// System: tax every active agent, then split the pot evenly across the
/// active roster. With an empty roster the collected tax is destroyed
/// rather than carried over.
pub fn economic_policy(
    config: Res<SimConfig>,
    mut ledger: ResMut<StepLedger>,
    mut agents: Query<(&mut Wallet, &Solvency)>,
) {
    let mut total_tax = 0.0;
    let mut active = 0usize;

    for (mut wallet, solvency) in agents.iter_mut() {
        if solvency.bankrupt {
            continue;
        }
        let tax = wallet.balance * config.tax_rate;
        wallet.tax(tax);
        total_tax += tax;
        active += 1;
    }

    if active > 0 {
        let share = total_tax / active as f64;
        for (mut wallet, solvency) in agents.iter_mut() {
            if solvency.bankrupt {
                continue;
            }
            wallet.credit(share);
        }
    }

    ledger.tax_redistributed = total_tax;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::agent::AgentId;

    fn build_world(tax_rate: f64) -> World {
        let mut world = World::new();
        world.insert_resource(SimConfig {
            tax_rate,
            ..SimConfig::default()
        });
        world.insert_resource(StepLedger::default());
        world
    }

    fn run_phase(world: &mut World) {
        let mut schedule = Schedule::default();
        schedule.add_systems(economic_policy);
        schedule.run(world);
    }

    fn balance_of(world: &mut World, id: u32) -> f64 {
        let mut query = world.query::<(&AgentId, &Wallet)>();
        query
            .iter(world)
            .find(|(agent_id, _)| agent_id.0 == id)
            .map(|(_, wallet)| wallet.balance)
            .expect("agent")
    }

    #[test]
    fn test_tax_and_redistribute_exact_arithmetic() {
        let mut world = build_world(0.1);
        world.spawn((AgentId(0), Wallet::new(100.0), Solvency::default()));
        world.spawn((AgentId(1), Wallet::new(50.0), Solvency::default()));

        run_phase(&mut world);

        // Collected: 10 + 5 = 15; each active agent gets 7.5 back.
        // post = pre * (1 - r) + T / k
        assert!((balance_of(&mut world, 0) - 97.5).abs() < 1e-9);
        assert!((balance_of(&mut world, 1) - 52.5).abs() < 1e-9);
        assert!((world.resource::<StepLedger>().tax_redistributed - 15.0).abs() < 1e-9);
    }

    #[test]
    fn test_redistribution_preserves_total_wealth() {
        let mut world = build_world(0.07);
        for (id, balance) in [(0u32, 20.0), (1, 80.0), (2, 300.0)] {
            world.spawn((AgentId(id), Wallet::new(balance), Solvency::default()));
        }

        run_phase(&mut world);

        let mut query = world.query::<&Wallet>();
        let total: f64 = query.iter(&world).map(|w| w.balance).sum();
        assert!((total - 400.0).abs() < 1e-9);
    }

    #[test]
    fn test_bankrupt_agents_neither_taxed_nor_credited() {
        let mut world = build_world(0.1);
        world.spawn((AgentId(0), Wallet::new(100.0), Solvency::default()));
        world.spawn((AgentId(1), Wallet::new(100.0), Solvency { bankrupt: true }));

        run_phase(&mut world);

        // Active agent pays 10 and gets all 10 back; the retired one is
        // untouched.
        assert!((balance_of(&mut world, 0) - 100.0).abs() < 1e-9);
        assert!((balance_of(&mut world, 1) - 100.0).abs() < 1e-9);
    }

    #[test]
    fn test_empty_roster_destroys_tax_without_error() {
        let mut world = build_world(0.1);
        world.spawn((AgentId(0), Wallet::new(100.0), Solvency { bankrupt: true }));

        run_phase(&mut world);

        assert_eq!(world.resource::<StepLedger>().tax_redistributed, 0.0);
    }
}

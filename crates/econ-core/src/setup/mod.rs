//! Run Setup
//!
//! Spawns the agent population and applies the optional deterministic
//! wealth skew.

use bevy_ecs::prelude::*;
use rand::rngs::SmallRng;

use crate::components::agent::{AgentId, Demand, Solvency, Wallet};
use crate::config::SimConfig;

/// Spawn the full population with randomized demand preferences.
///
/// With `initial_imbalance` set, agents whose id falls below
/// `population * imbalance_strength` start with double the initial
/// balance and everyone else with half. The skew keys off the id alone,
/// so it is reproducible independent of the RNG.
pub fn spawn_agents(world: &mut World, config: &SimConfig, rng: &mut SmallRng) {
    let skew_cutoff = config.population as f64 * config.imbalance_strength;
    for id in 0..config.population {
        let mut balance = config.initial_balance;
        if config.initial_imbalance {
            if (id as f64) < skew_cutoff {
                balance *= 2.0;
            } else {
                balance *= 0.5;
            }
        }
        world.spawn((
            AgentId(id as u32),
            Wallet::new(balance),
            Demand::new(config.num_resources, config.demand_multiplier, rng),
            Solvency::default(),
        ));
    }
    tracing::debug!(population = config.population, "agents spawned");
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;

    fn spawn(config: &SimConfig) -> World {
        let mut world = World::new();
        let mut rng = SmallRng::seed_from_u64(1);
        spawn_agents(&mut world, config, &mut rng);
        world
    }

    #[test]
    fn test_spawn_count_and_shape() {
        let config = SimConfig {
            population: 10,
            num_resources: 4,
            ..SimConfig::default()
        };
        let mut world = spawn(&config);

        let mut query = world.query::<(&AgentId, &Wallet, &Demand, &Solvency)>();
        let mut count = 0;
        for (_, wallet, demand, solvency) in query.iter(&world) {
            assert_eq!(wallet.balance, config.initial_balance);
            assert_eq!(demand.preference.len(), 4);
            assert!(!solvency.bankrupt);
            count += 1;
        }
        assert_eq!(count, 10);
    }

    #[test]
    fn test_imbalance_skew_is_deterministic_by_id() {
        let config = SimConfig {
            population: 10,
            initial_balance: 100.0,
            initial_imbalance: true,
            imbalance_strength: 0.3,
            ..SimConfig::default()
        };
        let mut world = spawn(&config);

        let mut query = world.query::<(&AgentId, &Wallet)>();
        for (id, wallet) in query.iter(&world) {
            if id.0 < 3 {
                assert_eq!(wallet.balance, 200.0, "agent {} should be seeded rich", id.0);
            } else {
                assert_eq!(wallet.balance, 50.0, "agent {} should be seeded poor", id.0);
            }
        }
    }
}

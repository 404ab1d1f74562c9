//! Run Driver
//!
//! Assembles a world from an immutable configuration, steps the phase
//! schedule a fixed number of times, and computes the aggregate result.
//! No global state is touched, so independent runs can execute in
//! parallel threads without coordination.

use bevy_ecs::prelude::*;
use rand::rngs::SmallRng;
use rand::SeedableRng;

use crate::components::agent::{DemandPolicyHandle, Solvency, StaticDemand, Wallet};
use crate::components::market::Market;
use crate::config::{ConfigError, SimConfig};
use crate::output::stats::{gini, RunResult, RunStats};
use crate::setup;
use crate::systems::{
    agent_maintenance, collect_metrics, economic_policy, market_phase, resolve_bankruptcies,
    resource_dynamics, RunHistory, StepClock, StepLedger,
};
use crate::SimRng;

/// Run a complete simulation and return the aggregate result.
pub fn run_simulation(config: &SimConfig, seed: u64) -> Result<RunResult, ConfigError> {
    run_with_stats(config, seed).map(|stats| stats.result)
}

/// Run a complete simulation and return the full report, including the
/// per-step balance and price histories.
pub fn run_with_stats(config: &SimConfig, seed: u64) -> Result<RunStats, ConfigError> {
    config.validate()?;

    let mut world = World::new();
    let mut rng = SmallRng::seed_from_u64(seed);
    setup::spawn_agents(&mut world, config, &mut rng);
    world.insert_resource(Market::new(config));
    world.insert_resource(SimRng(rng));
    world.insert_resource(config.clone());
    world.insert_resource(StepClock::default());
    world.insert_resource(StepLedger::default());
    world.insert_resource(RunHistory::default());
    world.insert_resource(DemandPolicyHandle(Box::new(StaticDemand)));

    let mut schedule = Schedule::default();
    schedule.add_systems(
        (
            market_phase,
            resource_dynamics,
            economic_policy,
            agent_maintenance,
            resolve_bankruptcies,
            collect_metrics,
        )
            .chain(),
    );

    tracing::info!(seed, steps = config.steps, population = config.population, "run starting");

    for step in 0..config.steps {
        world.resource_mut::<StepClock>().step = step;
        world.resource_mut::<StepLedger>().reset();
        schedule.run(&mut world);

        let newly_bankrupt = world.resource::<StepLedger>().bankruptcies;
        if newly_bankrupt > 0 {
            tracing::debug!(step, newly_bankrupt, "agents retired this step");
        }
    }

    let result = finalize(&mut world, config);
    tracing::info!(
        bankruptcies = result.bankruptcies,
        final_gini = result.final_gini,
        "run finished"
    );

    let history = world.remove_resource::<RunHistory>().unwrap_or_default();
    Ok(RunStats {
        seed,
        config: config.clone(),
        balance_history: history.balance_history,
        price_history: history.price_history,
        result,
    })
}

/// Compute the aggregate run statistics from the final world state.
fn finalize(world: &mut World, config: &SimConfig) -> RunResult {
    let mut query = world.query::<(&Wallet, &Solvency)>();
    let balances: Vec<f64> = query
        .iter(world)
        .filter(|(_, solvency)| !solvency.bankrupt)
        .map(|(wallet, _)| wallet.balance)
        .collect();

    let avg_final_balance = if balances.is_empty() {
        0.0
    } else {
        balances.iter().sum::<f64>() / balances.len() as f64
    };

    let history = world.resource::<RunHistory>();
    let avg_final_price = history
        .price_history
        .last()
        .filter(|prices| !prices.is_empty())
        .map(|prices| prices.iter().sum::<f64>() / prices.len() as f64)
        .unwrap_or(0.0);

    RunResult {
        avg_final_balance,
        final_gini: gini(&balances),
        bankruptcies: config.population - balances.len(),
        avg_final_price,
        last_step: history.last_metrics.clone(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_config_is_rejected() {
        let config = SimConfig {
            num_resources: 0,
            ..SimConfig::default()
        };
        assert!(run_simulation(&config, 1).is_err());
    }

    #[test]
    fn test_zero_step_run_has_no_metrics() {
        let config = SimConfig {
            population: 5,
            steps: 0,
            ..SimConfig::default()
        };
        let result = run_simulation(&config, 1).expect("run");
        assert_eq!(result.bankruptcies, 0);
        assert_eq!(result.avg_final_balance, config.initial_balance);
        assert_eq!(result.avg_final_price, 0.0);
        assert!(result.last_step.is_none());
    }

    #[test]
    fn test_empty_population_run_completes() {
        let config = SimConfig {
            population: 0,
            num_resources: 3,
            steps: 5,
            ..SimConfig::default()
        };
        let result = run_simulation(&config, 9).expect("run");
        assert_eq!(result.bankruptcies, 0);
        assert_eq!(result.avg_final_balance, 0.0);
        let last = result.last_step.expect("metrics");
        assert_eq!(last.step, 4);
        assert_eq!(last.active_fraction, 0.0);
        assert_eq!(last.tax_redistributed, 0.0);
    }

    #[test]
    fn test_history_lengths_match_steps() {
        let config = SimConfig {
            population: 10,
            steps: 7,
            ..SimConfig::default()
        };
        let stats = run_with_stats(&config, 3).expect("run");
        assert_eq!(stats.balance_history.len(), 7);
        assert_eq!(stats.price_history.len(), 7);
        assert_eq!(stats.result.last_step.expect("metrics").step, 6);
    }

    #[test]
    fn test_imbalance_skew_raises_initial_gini() {
        let base = SimConfig {
            population: 20,
            steps: 1,
            tax_rate: 0.0,
            ..SimConfig::default()
        };
        let skewed = SimConfig {
            initial_imbalance: true,
            imbalance_strength: 0.5,
            ..base.clone()
        };
        let flat = run_simulation(&base, 5).expect("run");
        let uneven = run_simulation(&skewed, 5).expect("run");
        assert!(uneven.final_gini > flat.final_gini);
    }
}

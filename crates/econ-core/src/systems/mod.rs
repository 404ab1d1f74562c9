//! Step pipeline systems.
//!
//! One simulation step runs these in fixed order, each reading state the
//! previous one wrote: market allocation, resource dynamics, economic
//! policy, agent maintenance, bankruptcy resolution, metrics collection.

use bevy_ecs::prelude::*;

pub mod bankruptcy;
pub mod dynamics;
pub mod maintenance;
pub mod market;
pub mod metrics;
pub mod policy;

pub use bankruptcy::resolve_bankruptcies;
pub use dynamics::resource_dynamics;
pub use maintenance::agent_maintenance;
pub use market::market_phase;
pub use metrics::{collect_metrics, RunHistory};
pub use policy::economic_policy;

/// Current step index, advanced by the run driver before each step.
#[derive(Resource, Debug, Default)]
pub struct StepClock {
    pub step: u64,
}

/// Per-step scratch totals, reset by the run driver before each step.
#[derive(Resource, Debug, Default)]
pub struct StepLedger {
    /// Total tax collected (and, with a non-empty roster, redistributed)
    /// this step.
    pub tax_redistributed: f64,
    /// Agents that transitioned to bankrupt this step.
    pub bankruptcies: u32,
}

impl StepLedger {
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

//! Entity model: agent components and the resource market.

pub mod agent;
pub mod market;

pub use agent::{AgentId, Demand, DemandPolicy, DemandPolicyHandle, Solvency, StaticDemand, Wallet};
pub use market::{Market, ResourcePool};

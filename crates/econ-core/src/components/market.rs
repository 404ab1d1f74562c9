//! Resource Market
//!
//! A fixed set of finite, price-elastic resource pools. Pools are created
//! once at run start, mutated every step, and never removed.

use bevy_ecs::prelude::*;
use serde::{Deserialize, Serialize};

use crate::config::SimConfig;

/// A finite good with a soft capacity bound and a load-driven price.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResourcePool {
    pub id: u32,
    /// Soft upper bound on load. Grows and shrinks over time, capped at
    /// the configured maximum.
    pub capacity: f64,
    /// Currently allocated amount, kept in [0, capacity] by clipping.
    pub current_load: f64,
    /// Price recomputed once per step from the load/capacity ratio.
    /// Allocations later in the same step trade against this snapshot.
    pub price: f64,
}

impl ResourcePool {
    pub fn new(id: u32, capacity: f64, base_cost: f64) -> Self {
        Self {
            id,
            capacity,
            current_load: 0.0,
            price: base_cost,
        }
    }

    /// Recompute the price from current utilization. Linear elasticity:
    /// an empty pool sells at base cost, a full one at
    /// `base_cost * (1 + elasticity)`.
    pub fn update_price(&mut self, base_cost: f64, elasticity: f64) {
        self.price = base_cost * (1.0 + self.utilization() * elasticity);
    }

    /// Allocate up to `amount`, clipped to the remaining headroom.
    /// Returns what was actually allocated.
    pub fn allocate(&mut self, amount: f64) -> f64 {
        let allocated = amount.min(self.capacity - self.current_load);
        self.current_load += allocated;
        allocated
    }

    /// Release up to `amount` of load, floored at zero.
    pub fn deallocate(&mut self, amount: f64) {
        self.current_load -= amount.min(self.current_load);
    }

    /// Multiplicative capacity regrowth, boosted by agent wealth and
    /// capped at the configured maximum.
    pub fn regenerate(&mut self, avg_balance: f64, config: &SimConfig) {
        let growth = 1.0 + config.regen_rate + config.dynamic_regen_multiplier * avg_balance;
        self.capacity = (self.capacity * growth).min(config.max_capacity);
    }

    /// Second capacity adjustment, driven by total economic output.
    /// Composes with [`ResourcePool::regenerate`] within the same step.
    pub fn adjust_capacity(&mut self, total_output: f64, config: &SimConfig) {
        let growth = 1.0 + config.capacity_output_multiplier * total_output;
        self.capacity = (self.capacity * growth).min(config.max_capacity);
    }

    pub fn utilization(&self) -> f64 {
        self.current_load / self.capacity
    }

    pub fn availability(&self) -> f64 {
        self.capacity - self.current_load
    }
}

/// Registry of all resource pools for a run.
#[derive(Resource, Debug, Clone)]
pub struct Market {
    pools: Vec<ResourcePool>,
}

impl Market {
    pub fn new(config: &SimConfig) -> Self {
        let pools = (0..config.num_resources)
            .map(|id| ResourcePool::new(id as u32, config.resource_capacity, config.base_cost))
            .collect();
        Self { pools }
    }

    pub fn len(&self) -> usize {
        self.pools.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pools.is_empty()
    }

    pub fn get(&self, id: usize) -> Option<&ResourcePool> {
        self.pools.get(id)
    }

    pub fn get_mut(&mut self, id: usize) -> Option<&mut ResourcePool> {
        self.pools.get_mut(id)
    }

    pub fn pools(&self) -> &[ResourcePool] {
        &self.pools
    }

    pub fn pools_mut(&mut self) -> impl Iterator<Item = &mut ResourcePool> {
        self.pools.iter_mut()
    }

    /// Step-start price snapshot, indexed by pool id.
    pub fn prices(&self) -> Vec<f64> {
        self.pools.iter().map(|p| p.price).collect()
    }

    /// Remaining headroom per pool, indexed by pool id.
    pub fn availability(&self) -> Vec<f64> {
        self.pools.iter().map(|p| p.availability()).collect()
    }

    pub fn avg_price(&self) -> f64 {
        if self.pools.is_empty() {
            return 0.0;
        }
        self.pools.iter().map(|p| p.price).sum::<f64>() / self.pools.len() as f64
    }

    /// Market value of everything currently allocated.
    pub fn total_load_value(&self) -> f64 {
        self.pools.iter().map(|p| p.price * p.current_load).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pool() -> ResourcePool {
        ResourcePool::new(0, 100.0, 1.0)
    }

    #[test]
    fn test_price_is_base_cost_at_zero_load() {
        let mut p = pool();
        p.update_price(1.0, 0.05);
        assert_eq!(p.price, 1.0);
    }

    #[test]
    fn test_price_strictly_increases_with_load() {
        let mut p = pool();
        let mut last = 0.0;
        for load in [0.0, 25.0, 50.0, 75.0, 100.0] {
            p.current_load = load;
            p.update_price(1.0, 0.05);
            assert!(p.price > last, "price must rise with utilization");
            last = p.price;
        }
        assert!((last - 1.05).abs() < 1e-12);
    }

    #[test]
    fn test_allocate_clips_to_headroom() {
        let mut p = pool();
        assert_eq!(p.allocate(30.0), 30.0);
        assert_eq!(p.current_load, 30.0);

        // Only 70 left; the excess is refused, not queued.
        assert_eq!(p.allocate(100.0), 70.0);
        assert_eq!(p.current_load, 100.0);
        assert_eq!(p.allocate(5.0), 0.0);
        assert!(p.current_load <= p.capacity);
    }

    #[test]
    fn test_deallocate_floors_at_zero() {
        let mut p = pool();
        p.allocate(10.0);
        p.deallocate(4.0);
        assert_eq!(p.current_load, 6.0);
        p.deallocate(100.0);
        assert_eq!(p.current_load, 0.0);
    }

    #[test]
    fn test_regenerate_caps_at_max() {
        let mut p = pool();
        let config = SimConfig {
            max_capacity: 120.0,
            regen_rate: 0.5,
            dynamic_regen_multiplier: 0.0,
            ..SimConfig::default()
        };
        p.regenerate(0.0, &config);
        assert_eq!(p.capacity, 120.0);
    }

    #[test]
    fn test_capacity_adjustments_compose() {
        let mut p = pool();
        let config = SimConfig {
            max_capacity: 1000.0,
            regen_rate: 0.1,
            dynamic_regen_multiplier: 0.0,
            capacity_output_multiplier: 0.001,
            ..SimConfig::default()
        };
        p.regenerate(0.0, &config);
        assert!((p.capacity - 110.0).abs() < 1e-9);
        p.adjust_capacity(100.0, &config);
        assert!((p.capacity - 121.0).abs() < 1e-9);
    }

    #[test]
    fn test_market_snapshots() {
        let config = SimConfig::default();
        let mut market = Market::new(&config);
        assert_eq!(market.len(), 3);
        assert_eq!(market.prices(), vec![1.0, 1.0, 1.0]);
        assert_eq!(market.availability(), vec![100.0, 100.0, 100.0]);

        market.get_mut(1).expect("pool 1").allocate(40.0);
        assert_eq!(market.availability(), vec![100.0, 60.0, 100.0]);
        assert_eq!(market.avg_price(), 1.0);
        market.get_mut(1).expect("pool 1").update_price(1.0, 0.05);
        assert!(market.total_load_value() > 40.0);
    }
}

//! Party-wide Energy pool and Tag-In pricing.
//!
//! Focus itself is stored per member (see [`crate::state::PartyMember`]);
//! this module holds the shared pool and the rule that turns Focus into a
//! Tag-In discount.

use crate::config::CombatConfig;

/// Energy shared by the whole party, refilled every player turn.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EnergyPool {
    current: u32,
    max: u32,
}

impl EnergyPool {
    /// Creates an empty pool; it is filled at the first player turn.
    pub const fn new(max: u32) -> Self {
        Self { current: 0, max }
    }

    pub const fn current(&self) -> u32 {
        self.current
    }

    pub const fn max(&self) -> u32 {
        self.max
    }

    pub fn refill(&mut self) {
        self.current = self.max;
    }

    pub const fn can_afford(&self, cost: u32) -> bool {
        self.current >= cost
    }

    /// Spends `cost` if affordable. Never spends partially.
    pub fn try_spend(&mut self, cost: u32) -> bool {
        if !self.can_afford(cost) {
            return false;
        }
        self.current -= cost;
        true
    }

    /// Adds Energy. Card effects may push the pool above its maximum.
    pub fn gain(&mut self, amount: u32) {
        self.current = self.current.saturating_add(amount);
    }
}

/// Energy price of tagging a member in.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TagInRules {
    pub energy_cost: u32,
    /// Focus at or above which the Tag-In is free.
    pub free_threshold: u8,
}

impl TagInRules {
    pub fn from_config(config: &CombatConfig) -> Self {
        Self {
            energy_cost: config.tag_in_cost,
            free_threshold: config.focus_free_threshold,
        }
    }

    pub const fn cost_for(&self, incoming_focus: u8) -> u32 {
        if incoming_focus >= self.free_threshold {
            0
        } else {
            self.energy_cost
        }
    }
}

impl Default for TagInRules {
    fn default() -> Self {
        Self::from_config(&CombatConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn spend_is_all_or_nothing() {
        let mut pool = EnergyPool::new(3);
        pool.refill();

        assert!(pool.try_spend(2));
        assert!(!pool.try_spend(2));
        assert_eq!(pool.current(), 1);
    }

    #[test]
    fn gain_can_exceed_max_until_refill() {
        let mut pool = EnergyPool::new(3);
        pool.refill();
        pool.gain(2);
        assert_eq!(pool.current(), 5);

        pool.refill();
        assert_eq!(pool.current(), 3);
    }

    #[test]
    fn full_focus_makes_tag_in_free() {
        let rules = TagInRules {
            energy_cost: 1,
            free_threshold: 3,
        };
        assert_eq!(rules.cost_for(2), 1);
        assert_eq!(rules.cost_for(3), 0);
    }
}

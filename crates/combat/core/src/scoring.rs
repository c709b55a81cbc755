//! Post-combat performance scoring.
//!
//! ```text
//! speed  = min(speed_max,  max(0, baseline(tier) × enemies − turns) × per_turn_bonus)
//! impact = min(impact_max, overkill × per_overkill)
//! risk   = risk_full if 0 incapacitations, risk_partial if 1, else 0
//! total  = speed + impact + risk
//! ```
//!
//! Pure post-processing: nothing here feeds back into combat rules.

use crate::config::ScoringConfig;
use crate::state::EnemyTier;

/// Per-combat accumulators, created at combat start.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PerformanceCounters {
    pub turns_taken: u32,
    pub total_overkill: u32,
    pub incapacitations: u32,
    /// Highest enemy tier present at combat start.
    pub baseline_tier: EnemyTier,
    /// Enemy count at combat start.
    pub enemy_count: u32,
}

impl PerformanceCounters {
    pub fn new(baseline_tier: EnemyTier, enemy_count: u32) -> Self {
        Self {
            turns_taken: 0,
            total_overkill: 0,
            incapacitations: 0,
            baseline_tier,
            enemy_count,
        }
    }

    pub fn record_overkill(&mut self, overkill: u32) {
        self.total_overkill = self.total_overkill.saturating_add(overkill);
    }

    pub fn record_incapacitation(&mut self) {
        self.incapacitations += 1;
    }
}

/// Bonus breakdown produced at combat end.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PerformanceSummary {
    pub turns_taken: u32,
    pub baseline_turns: u32,
    pub speed_bonus: u32,
    pub impact_bonus: u32,
    pub risk_bonus: u32,
    pub total: u32,
}

/// Expected turns to clear one enemy of `tier`.
pub fn baseline_turns(tier: EnemyTier, config: &ScoringConfig) -> u32 {
    match tier {
        EnemyTier::Normal => config.baseline_normal_turns,
        EnemyTier::Elite => config.baseline_elite_turns,
        EnemyTier::Boss => config.baseline_boss_turns,
    }
}

/// Converts accumulated counters into a bonus breakdown. Cannot fail.
pub fn score(counters: &PerformanceCounters, config: &ScoringConfig) -> PerformanceSummary {
    let baseline =
        baseline_turns(counters.baseline_tier, config).saturating_mul(counters.enemy_count);

    let turns_saved = baseline.saturating_sub(counters.turns_taken);
    let speed_bonus = turns_saved
        .saturating_mul(config.per_turn_bonus)
        .min(config.speed_max);

    let impact_bonus = counters
        .total_overkill
        .saturating_mul(config.per_overkill)
        .min(config.impact_max);

    let risk_bonus = match counters.incapacitations {
        0 => config.risk_full,
        1 => config.risk_partial,
        _ => 0,
    };

    PerformanceSummary {
        turns_taken: counters.turns_taken,
        baseline_turns: baseline,
        speed_bonus,
        impact_bonus,
        risk_bonus,
        total: speed_bonus
            .saturating_add(impact_bonus)
            .saturating_add(risk_bonus),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quick_clean_win_against_one_normal_enemy() {
        let config = ScoringConfig::default();
        let mut counters = PerformanceCounters::new(EnemyTier::Normal, 1);
        counters.turns_taken = 3;

        let summary = score(&counters, &config);
        assert_eq!(summary.baseline_turns, 4);
        assert_eq!(summary.speed_bonus, config.per_turn_bonus.min(config.speed_max));
        assert_eq!(summary.impact_bonus, 0);
        assert_eq!(summary.risk_bonus, config.risk_full);
        assert_eq!(
            summary.total,
            summary.speed_bonus + summary.impact_bonus + summary.risk_bonus
        );
    }

    #[test]
    fn slow_fights_earn_no_speed_bonus() {
        let mut counters = PerformanceCounters::new(EnemyTier::Normal, 1);
        counters.turns_taken = 9;
        assert_eq!(score(&counters, &ScoringConfig::default()).speed_bonus, 0);
    }

    #[test]
    fn each_component_is_clamped() {
        let config = ScoringConfig::default();
        let mut counters = PerformanceCounters::new(EnemyTier::Boss, 3);
        counters.turns_taken = 1;
        counters.record_overkill(10_000);

        let summary = score(&counters, &config);
        assert_eq!(summary.speed_bonus, config.speed_max);
        assert_eq!(summary.impact_bonus, config.impact_max);
    }

    #[test]
    fn total_saturates_with_oversized_caps() {
        let config = ScoringConfig {
            per_turn_bonus: u32::MAX,
            speed_max: u32::MAX,
            per_overkill: u32::MAX,
            impact_max: u32::MAX,
            risk_full: u32::MAX,
            ..ScoringConfig::default()
        };
        let mut counters = PerformanceCounters::new(EnemyTier::Boss, 1);
        counters.turns_taken = 1;
        counters.record_overkill(2);

        let summary = score(&counters, &config);
        assert_eq!(summary.speed_bonus, u32::MAX);
        assert_eq!(summary.total, u32::MAX);
    }

    #[test]
    fn risk_bonus_steps_down_with_incapacitations() {
        let config = ScoringConfig::default();
        let mut counters = PerformanceCounters::new(EnemyTier::Elite, 1);

        counters.record_incapacitation();
        assert_eq!(score(&counters, &config).risk_bonus, config.risk_partial);

        counters.record_incapacitation();
        assert_eq!(score(&counters, &config).risk_bonus, 0);
    }
}

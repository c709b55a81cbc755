use strum::Display;

use super::{
    BreakCondition, BreakGauge, Combatant, CombatEntity, DamageReport, GaugeTurnStart,
    TurnHookReport,
};
use crate::intent::Intent;

/// Difficulty tier, used to pick the scoring baseline.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Display)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum EnemyTier {
    Normal,
    Elite,
    Boss,
}

/// How an enemy asks the roster for a party target.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Display)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TargetingStrategy {
    #[default]
    Active,
    LowestHp,
    Random,
}

/// Which pattern the intent cursor walks.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum PatternMode {
    Normal,
    Groggy,
}

/// Hostile combatant with a cyclic action pattern and optional break gauge.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Enemy {
    pub combatant: Combatant,
    pub tier: EnemyTier,
    pub targeting: TargetingStrategy,
    pattern: Vec<Intent>,
    groggy_pattern: Vec<Intent>,
    mode: PatternMode,
    cursor: usize,
    gauge: Option<BreakGauge>,
}

impl Enemy {
    pub fn new(combatant: Combatant, tier: EnemyTier, pattern: Vec<Intent>) -> Self {
        Self {
            combatant,
            tier,
            targeting: TargetingStrategy::default(),
            pattern,
            groggy_pattern: Vec::new(),
            mode: PatternMode::Normal,
            cursor: 0,
            gauge: None,
        }
    }

    #[must_use]
    pub fn with_targeting(mut self, targeting: TargetingStrategy) -> Self {
        self.targeting = targeting;
        self
    }

    #[must_use]
    pub fn with_groggy_pattern(mut self, pattern: Vec<Intent>) -> Self {
        self.groggy_pattern = pattern;
        self
    }

    #[must_use]
    pub fn with_break(mut self, condition: BreakCondition) -> Self {
        self.gauge = Some(BreakGauge::new(condition));
        self
    }

    pub fn gauge(&self) -> Option<&BreakGauge> {
        self.gauge.as_ref()
    }

    pub fn is_broken(&self) -> bool {
        self.gauge.as_ref().is_some_and(BreakGauge::is_broken)
    }

    pub fn is_groggy(&self) -> bool {
        self.gauge.as_ref().is_some_and(BreakGauge::is_groggy)
    }

    pub fn pattern_mode(&self) -> PatternMode {
        self.mode
    }

    /// The pre-computed next action, always one step ahead of execution.
    ///
    /// A Groggy enemy without a groggy pattern idles.
    pub fn intent(&self) -> Intent {
        let pattern = match self.mode {
            PatternMode::Normal => &self.pattern,
            PatternMode::Groggy => &self.groggy_pattern,
        };
        if pattern.is_empty() {
            return Intent::Unknown;
        }
        pattern[self.cursor % pattern.len()].clone()
    }

    /// Moves the cursor past the intent that was just executed.
    pub fn advance_intent(&mut self) {
        let len = match self.mode {
            PatternMode::Normal => self.pattern.len(),
            PatternMode::Groggy => self.groggy_pattern.len(),
        };
        self.cursor = if len == 0 { 0 } else { (self.cursor + 1) % len };
    }

    /// Records a card hit against the break gauge.
    ///
    /// Returns true when this hit breaks the enemy; the intent cycle then
    /// restarts on the groggy pattern.
    pub fn register_hit(&mut self, amount: u32) -> bool {
        if !self.is_alive() {
            return false;
        }
        let Some(gauge) = self.gauge.as_mut() else {
            return false;
        };
        gauge.record_damage_and_hit(amount);
        if !gauge.check_break() {
            return false;
        }
        self.mode = PatternMode::Groggy;
        self.cursor = 0;
        true
    }

    /// Turn-start gauge logic. Returns true when Groggy just ended and the
    /// normal pattern resumed from its first intent.
    fn gauge_turn_start(&mut self) -> bool {
        let Some(gauge) = self.gauge.as_mut() else {
            return false;
        };
        if gauge.on_turn_start() != GaugeTurnStart::Recovered {
            return false;
        }
        self.mode = PatternMode::Normal;
        self.cursor = 0;
        true
    }

    /// Enemy turn start: clears Block and advances the break gauge.
    ///
    /// The flag reports a return from Groggy to Normal.
    pub fn begin_turn(&mut self) -> (TurnHookReport, bool) {
        let report = self.on_turn_start();
        let recovered = self.gauge_turn_start();
        (report, recovered)
    }

    /// Enemy turn end: ticks Groggy, then status durations.
    ///
    /// When the last Groggy turn is spent the shown intent returns to the
    /// first step of the normal pattern; the Broken flag stays set until the
    /// next turn start.
    pub fn finish_turn(&mut self) -> TurnHookReport {
        if let Some(gauge) = self.gauge.as_mut() {
            gauge.tick_groggy();
            if self.mode == PatternMode::Groggy && !gauge.is_groggy() {
                self.mode = PatternMode::Normal;
                self.cursor = 0;
            }
        }
        self.on_turn_end()
    }
}

impl CombatEntity for Enemy {
    fn combatant(&self) -> &Combatant {
        &self.combatant
    }

    fn combatant_mut(&mut self) -> &mut Combatant {
        &mut self.combatant
    }

    fn take_damage(&mut self, amount: u32) -> DamageReport {
        if !self.is_alive() {
            return DamageReport::default();
        }
        self.combatant.absorb_damage(amount)
    }
}

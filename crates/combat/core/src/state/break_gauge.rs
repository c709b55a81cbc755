//! Break gauge: the per-enemy interrupt state machine.
//!
//! ```text
//! Normal ──check_break()──▶ Broken + Groggy(n) ──tick_groggy() × n──▶ Broken
//!    ▲                                                                  │
//!    └──────────────────────────── on_turn_start() ─────────────────────┘
//! ```
//!
//! Damage and hits accumulate while `Normal`. Groggy turns are counted down
//! at the enemy's turn end; the Broken flag outlives the last Groggy turn
//! until the next turn start, which is the only way back to `Normal`.

/// Which counter a break condition watches.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum BreakKind {
    DamageThreshold,
    HitCount,
    /// Breaks when either threshold is reached.
    Both,
}

/// Static break parameters declared by an enemy.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BreakCondition {
    pub kind: BreakKind,
    #[cfg_attr(feature = "serde", serde(default))]
    pub damage_threshold: u32,
    #[cfg_attr(feature = "serde", serde(default))]
    pub hit_threshold: u32,
    pub groggy_turns: u32,
    /// Zero the counters at every turn start while not broken.
    #[cfg_attr(feature = "serde", serde(default))]
    pub reset_on_turn_start: bool,
}

impl BreakCondition {
    pub const fn damage(threshold: u32, groggy_turns: u32) -> Self {
        Self {
            kind: BreakKind::DamageThreshold,
            damage_threshold: threshold,
            hit_threshold: 0,
            groggy_turns,
            reset_on_turn_start: false,
        }
    }

    pub const fn hits(threshold: u32, groggy_turns: u32) -> Self {
        Self {
            kind: BreakKind::HitCount,
            damage_threshold: 0,
            hit_threshold: threshold,
            groggy_turns,
            reset_on_turn_start: false,
        }
    }

    pub const fn both(damage_threshold: u32, hit_threshold: u32, groggy_turns: u32) -> Self {
        Self {
            kind: BreakKind::Both,
            damage_threshold,
            hit_threshold,
            groggy_turns,
            reset_on_turn_start: false,
        }
    }

    #[must_use]
    pub const fn resetting_each_turn(mut self) -> Self {
        self.reset_on_turn_start = true;
        self
    }
}

/// What a turn start did to the gauge.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GaugeTurnStart {
    Unchanged,
    /// Counters were zeroed by the reset-on-turn-start policy.
    Reset,
    /// Groggy ended and the enemy returned to `Normal`.
    Recovered,
}

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BreakGauge {
    condition: BreakCondition,
    current_damage: u32,
    current_hits: u32,
    is_broken: bool,
    groggy_turns_left: u32,
}

impl BreakGauge {
    pub fn new(condition: BreakCondition) -> Self {
        Self {
            condition,
            current_damage: 0,
            current_hits: 0,
            is_broken: false,
            groggy_turns_left: 0,
        }
    }

    pub fn condition(&self) -> &BreakCondition {
        &self.condition
    }

    pub fn current_damage(&self) -> u32 {
        self.current_damage
    }

    pub fn current_hits(&self) -> u32 {
        self.current_hits
    }

    pub fn is_broken(&self) -> bool {
        self.is_broken
    }

    pub fn is_groggy(&self) -> bool {
        self.groggy_turns_left > 0
    }

    pub fn groggy_turns_left(&self) -> u32 {
        self.groggy_turns_left
    }

    /// Records one hit of `amount` damage. Ignored while Groggy.
    pub fn record_damage_and_hit(&mut self, amount: u32) {
        if self.is_groggy() {
            return;
        }
        self.current_damage = self.current_damage.saturating_add(amount);
        self.current_hits = self.current_hits.saturating_add(1);
    }

    /// Evaluates the condition and breaks the enemy when it is met.
    ///
    /// Returns true only on the call that performs the transition.
    pub fn check_break(&mut self) -> bool {
        if self.is_broken || self.is_groggy() {
            return false;
        }

        // A zero threshold means the counter is not part of the condition.
        let damage_met = self.condition.damage_threshold > 0
            && self.current_damage >= self.condition.damage_threshold;
        let hits_met =
            self.condition.hit_threshold > 0 && self.current_hits >= self.condition.hit_threshold;
        let met = match self.condition.kind {
            BreakKind::DamageThreshold => damage_met,
            BreakKind::HitCount => hits_met,
            BreakKind::Both => damage_met || hits_met,
        };

        if met {
            self.is_broken = true;
            self.groggy_turns_left = self.condition.groggy_turns;
        }
        met
    }

    pub fn on_turn_start(&mut self) -> GaugeTurnStart {
        if self.is_broken {
            if self.is_groggy() {
                return GaugeTurnStart::Unchanged;
            }
            self.is_broken = false;
            self.clear_counters();
            return GaugeTurnStart::Recovered;
        }

        if self.condition.reset_on_turn_start {
            self.clear_counters();
            return GaugeTurnStart::Reset;
        }
        GaugeTurnStart::Unchanged
    }

    /// Counts down one Groggy turn. Called once per enemy turn end.
    pub fn tick_groggy(&mut self) {
        self.groggy_turns_left = self.groggy_turns_left.saturating_sub(1);
    }

    pub fn damage_progress(&self) -> f32 {
        ratio(self.current_damage, self.condition.damage_threshold)
    }

    pub fn hit_progress(&self) -> f32 {
        ratio(self.current_hits, self.condition.hit_threshold)
    }

    /// Progress toward the condition that is closest to breaking.
    pub fn primary_progress(&self) -> f32 {
        match self.condition.kind {
            BreakKind::DamageThreshold => self.damage_progress(),
            BreakKind::HitCount => self.hit_progress(),
            BreakKind::Both => self.damage_progress().max(self.hit_progress()),
        }
    }

    fn clear_counters(&mut self) {
        self.current_damage = 0;
        self.current_hits = 0;
    }
}

fn ratio(current: u32, threshold: u32) -> f32 {
    if threshold == 0 {
        return 1.0;
    }
    (current as f32 / threshold as f32).clamp(0.0, 1.0)
}

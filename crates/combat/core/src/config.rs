/// Combat configuration constants and tunable parameters.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct CombatConfig {
    /// Energy available to the party at the start of every player turn.
    pub max_energy: u32,

    /// Cards drawn by the Active member at the start of every player turn.
    pub hand_size: u32,

    /// Energy paid to tag a Standby member in.
    pub tag_in_cost: u32,

    /// Focus at or above which a Tag-In costs no Energy.
    pub focus_free_threshold: u8,

    /// Cards drawn by the incoming member after a Tag-In.
    pub tag_in_draw: u32,

    pub scoring: ScoringConfig,
}

impl CombatConfig {
    // ===== compile-time constants used as type parameters =====
    /// Focus stacks a party member can hold.
    pub const MAX_FOCUS: u8 = 3;
    /// Cards a hand can hold; further draws are skipped.
    pub const MAX_HAND_SIZE: usize = 10;
    /// Damage/Block multiplier added per Focus stack at play time.
    pub const FOCUS_BONUS_PER_STACK: f64 = 0.25;

    // ===== runtime-tunable defaults =====
    pub const DEFAULT_MAX_ENERGY: u32 = 3;
    pub const DEFAULT_HAND_SIZE: u32 = 5;
    pub const DEFAULT_TAG_IN_COST: u32 = 1;
    pub const DEFAULT_FOCUS_FREE_THRESHOLD: u8 = 3;

    pub fn new() -> Self {
        Self {
            max_energy: Self::DEFAULT_MAX_ENERGY,
            hand_size: Self::DEFAULT_HAND_SIZE,
            tag_in_cost: Self::DEFAULT_TAG_IN_COST,
            focus_free_threshold: Self::DEFAULT_FOCUS_FREE_THRESHOLD,
            tag_in_draw: Self::DEFAULT_HAND_SIZE,
            scoring: ScoringConfig::default(),
        }
    }
}

impl Default for CombatConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// Balance parameters for the post-combat performance bonus.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ScoringConfig {
    /// Bonus per turn saved against the baseline.
    pub per_turn_bonus: u32,
    pub speed_max: u32,

    /// Bonus per point of overkill damage.
    pub per_overkill: u32,
    pub impact_max: u32,

    /// Risk bonus with no incapacitations.
    pub risk_full: u32,
    /// Risk bonus with exactly one incapacitation.
    pub risk_partial: u32,

    pub baseline_normal_turns: u32,
    pub baseline_elite_turns: u32,
    pub baseline_boss_turns: u32,
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            per_turn_bonus: 10,
            speed_max: 50,
            per_overkill: 1,
            impact_max: 30,
            risk_full: 30,
            risk_partial: 15,
            baseline_normal_turns: 4,
            baseline_elite_turns: 6,
            baseline_boss_turns: 10,
        }
    }
}

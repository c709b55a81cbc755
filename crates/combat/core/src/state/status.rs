//! Status effect store for combatants.
//!
//! Status effects are stacking modifiers. Two stacking models exist:
//!
//! - **Intensity** (`Strength`, `Dexterity`): stacks are a signed bonus that
//!   never decays on its own.
//! - **Duration** (`Weak`, `Vulnerable`, `Frail`, `Poison`, `Regeneration`):
//!   stacks count down by one at the owner's turn end and the effect is
//!   removed when they reach zero.
//!
//! `Poison` and `Regeneration` additionally resolve their stacks as HP loss
//! or healing during the same turn-end tick, before the countdown.

use arrayvec::ArrayVec;
use strum::{Display, EnumCount, EnumIter};

/// Types of status effects.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Display, EnumCount, EnumIter)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum StatusKind {
    // ========================================================================
    // Buffs
    // ========================================================================
    /// Adds its stacks to every attack's base damage.
    Strength,

    /// Adds its stacks to every block gain.
    Dexterity,

    /// Heals its stacks at turn end.
    Regeneration,

    // ========================================================================
    // Debuffs
    // ========================================================================
    /// Outgoing attack damage ×0.75.
    Weak,

    /// Incoming attack damage ×1.5.
    Vulnerable,

    /// Block gained ×0.75.
    Frail,

    /// Loses HP equal to its stacks at turn end, ignoring Block.
    Poison,
}

impl StatusKind {
    /// Returns true if stacks count down at turn end.
    pub const fn decays(self) -> bool {
        !matches!(self, Self::Strength | Self::Dexterity)
    }
}

/// A single status effect with its stack count.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StatusEffect {
    pub kind: StatusKind,
    pub stacks: i32,
}

/// What a turn-end tick resolved for one combatant.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct StatusTick {
    /// HP loss owed to Poison.
    pub poison: u32,
    /// Healing owed to Regeneration.
    pub regeneration: u32,
}

/// Active status effects on a combatant.
///
/// Each kind appears at most once; applying an existing kind adds to its
/// stacks. Capacity equals the number of kinds, so insertion never fails.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StatusEffects {
    effects: ArrayVec<StatusEffect, { StatusKind::COUNT }>,
}

impl StatusEffects {
    /// Creates an empty status effect set.
    pub fn empty() -> Self {
        Self {
            effects: ArrayVec::new(),
        }
    }

    /// Builds a set from `(kind, stacks)` pairs.
    pub fn from_pairs(pairs: &[(StatusKind, i32)]) -> Self {
        let mut set = Self::empty();
        for &(kind, stacks) in pairs {
            set.add(kind, stacks);
        }
        set
    }

    /// Checks if a specific status effect is present.
    pub fn has(&self, kind: StatusKind) -> bool {
        self.effects.iter().any(|e| e.kind == kind)
    }

    /// Stack count of a status effect, 0 when absent.
    pub fn stacks(&self, kind: StatusKind) -> i32 {
        self.effects
            .iter()
            .find(|e| e.kind == kind)
            .map_or(0, |e| e.stacks)
    }

    /// Adds stacks of a status effect and returns the new total.
    ///
    /// Negative stacks are allowed for intensity effects (e.g. losing Strength).
    /// A total of zero removes the effect; duration effects never go below zero.
    pub fn add(&mut self, kind: StatusKind, stacks: i32) -> i32 {
        if let Some(index) = self.effects.iter().position(|e| e.kind == kind) {
            let existing = &mut self.effects[index];
            existing.stacks += stacks;
            if kind.decays() {
                existing.stacks = existing.stacks.max(0);
            }
            let total = existing.stacks;
            if total == 0 {
                self.effects.remove(index);
            }
            return total;
        }

        let stacks = if kind.decays() { stacks.max(0) } else { stacks };
        if stacks != 0 {
            self.effects.push(StatusEffect { kind, stacks });
        }
        stacks
    }

    /// Resolves the turn-end tick: damage-over-time and healing-over-time are
    /// reported, then every duration effect loses one stack.
    pub fn tick_turn_end(&mut self) -> StatusTick {
        let tick = StatusTick {
            poison: self.stacks(StatusKind::Poison).max(0) as u32,
            regeneration: self.stacks(StatusKind::Regeneration).max(0) as u32,
        };

        for effect in self.effects.iter_mut().filter(|e| e.kind.decays()) {
            effect.stacks -= 1;
        }
        self.effects.retain(|e| e.stacks != 0);

        tick
    }

    /// Returns an iterator over all effects.
    pub fn iter(&self) -> impl Iterator<Item = &StatusEffect> {
        self.effects.iter()
    }

    /// Returns true if no status effects exist.
    pub fn is_empty(&self) -> bool {
        self.effects.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stacks_accumulate_per_kind() {
        let mut status = StatusEffects::empty();
        status.add(StatusKind::Strength, 2);
        status.add(StatusKind::Strength, 3);
        status.add(StatusKind::Weak, 1);

        assert_eq!(status.stacks(StatusKind::Strength), 5);
        assert_eq!(status.stacks(StatusKind::Weak), 1);
        assert_eq!(status.iter().count(), 2);
    }

    #[test]
    fn strength_can_go_negative_but_zero_removes() {
        let mut status = StatusEffects::empty();
        status.add(StatusKind::Strength, -2);
        assert_eq!(status.stacks(StatusKind::Strength), -2);

        status.add(StatusKind::Strength, 2);
        assert!(!status.has(StatusKind::Strength));
    }

    #[test]
    fn duration_effects_never_go_negative() {
        let mut status = StatusEffects::empty();
        assert_eq!(status.add(StatusKind::Vulnerable, -1), 0);
        assert!(!status.has(StatusKind::Vulnerable));

        status.add(StatusKind::Vulnerable, 1);
        status.add(StatusKind::Vulnerable, -5);
        assert!(!status.has(StatusKind::Vulnerable));
    }

    #[test]
    fn turn_end_tick_reports_then_decays() {
        let mut status = StatusEffects::from_pairs(&[
            (StatusKind::Poison, 3),
            (StatusKind::Regeneration, 1),
            (StatusKind::Weak, 2),
            (StatusKind::Strength, 1),
        ]);

        let tick = status.tick_turn_end();
        assert_eq!(tick.poison, 3);
        assert_eq!(tick.regeneration, 1);

        assert_eq!(status.stacks(StatusKind::Poison), 2);
        assert!(!status.has(StatusKind::Regeneration));
        assert_eq!(status.stacks(StatusKind::Weak), 1);
        assert_eq!(status.stacks(StatusKind::Strength), 1);
    }

    #[test]
    fn every_kind_fits() {
        use strum::IntoEnumIterator;

        let mut status = StatusEffects::empty();
        for kind in StatusKind::iter() {
            status.add(kind, 1);
        }
        assert_eq!(status.iter().count(), StatusKind::COUNT);
    }
}

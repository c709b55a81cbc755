//! Damage and block formulas.
//!
//! Pure functions; all combat numbers pass through here.
//!
//! # Formula
//!
//! ```text
//! attack = (base + Strength(attacker)) × 0.75 if Weak(attacker)
//!                                       × 1.5  if Vulnerable(target)
//! block  = (base + Dexterity(entity))  × 0.75 if Frail(entity)
//! focus  = value × (1 + 0.25 × min(stacks, 3))
//! ```
//!
//! Additive terms apply before multipliers. Each result is rounded to the
//! nearest integer once, after all multipliers, and floored at zero.

use crate::config::CombatConfig;
use crate::state::{StatusEffects, StatusKind};

const WEAK_MULTIPLIER: f64 = 0.75;
const VULNERABLE_MULTIPLIER: f64 = 1.5;
const FRAIL_MULTIPLIER: f64 = 0.75;

/// Calculate attack damage from attacker and target status.
pub fn compute_attack_damage(
    base: u32,
    attacker: &StatusEffects,
    target: &StatusEffects,
) -> u32 {
    let mut damage = f64::from(base) + f64::from(attacker.stacks(StatusKind::Strength));

    if attacker.has(StatusKind::Weak) {
        damage *= WEAK_MULTIPLIER;
    }
    if target.has(StatusKind::Vulnerable) {
        damage *= VULNERABLE_MULTIPLIER;
    }

    round_non_negative(damage)
}

/// Calculate block gained by an entity.
pub fn compute_block(base: u32, entity: &StatusEffects) -> u32 {
    let mut block = f64::from(base) + f64::from(entity.stacks(StatusKind::Dexterity));

    if entity.has(StatusKind::Frail) {
        block *= FRAIL_MULTIPLIER;
    }

    round_non_negative(block)
}

/// Apply the Focus multiplier to a Damage or Block value.
///
/// Stacks above [`CombatConfig::MAX_FOCUS`] are ignored.
pub fn apply_focus_bonus(value: u32, focus_stacks: u8) -> u32 {
    let stacks = focus_stacks.min(CombatConfig::MAX_FOCUS);
    let multiplier = 1.0 + CombatConfig::FOCUS_BONUS_PER_STACK * f64::from(stacks);
    round_non_negative(f64::from(value) * multiplier)
}

fn round_non_negative(value: f64) -> u32 {
    value.round().max(0.0) as u32
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn status(pairs: &[(StatusKind, i32)]) -> StatusEffects {
        StatusEffects::from_pairs(pairs)
    }

    #[test]
    fn weak_attacker_deals_three_quarters() {
        let weak = status(&[(StatusKind::Weak, 1)]);
        assert_eq!(compute_attack_damage(8, &weak, &StatusEffects::empty()), 6);
    }

    #[test]
    fn vulnerable_target_takes_half_again() {
        let vulnerable = status(&[(StatusKind::Vulnerable, 2)]);
        assert_eq!(
            compute_attack_damage(6, &StatusEffects::empty(), &vulnerable),
            9
        );
    }

    #[test]
    fn strength_applies_before_multipliers() {
        // (6 + 2) = 8 → ×0.75 = 6 → ×1.5 = 9
        let attacker = status(&[(StatusKind::Strength, 2), (StatusKind::Weak, 1)]);
        let target = status(&[(StatusKind::Vulnerable, 1)]);
        assert_eq!(compute_attack_damage(6, &attacker, &target), 9);
    }

    #[test]
    fn negative_strength_floors_at_zero() {
        let attacker = status(&[(StatusKind::Strength, -5)]);
        assert_eq!(
            compute_attack_damage(3, &attacker, &StatusEffects::empty()),
            0
        );
    }

    #[test]
    fn frail_reduces_block() {
        let frail = status(&[(StatusKind::Frail, 1), (StatusKind::Dexterity, 1)]);
        // (5 + 1) × 0.75 = 4.5 → 5
        assert_eq!(compute_block(5, &frail), 5);
        assert_eq!(compute_block(8, &status(&[(StatusKind::Frail, 1)])), 6);
    }

    #[test]
    fn full_focus_multiplier() {
        assert_eq!(apply_focus_bonus(10, 3), 18);
        assert_eq!(apply_focus_bonus(10, 0), 10);
        assert_eq!(apply_focus_bonus(10, 9), 18);
    }

    proptest! {
        #[test]
        fn strength_is_additive(base in 0u32..10_000, strength in 0i32..1_000) {
            let attacker = status(&[(StatusKind::Strength, strength)]);
            prop_assert_eq!(
                compute_attack_damage(base, &attacker, &StatusEffects::empty()),
                base + strength as u32
            );
        }

        #[test]
        fn weak_and_vulnerable_commute(base in 0u32..1_000, strength in 0i32..50) {
            let attacker = status(&[(StatusKind::Strength, strength), (StatusKind::Weak, 1)]);
            let target = status(&[(StatusKind::Vulnerable, 1)]);
            let expected = (f64::from(base) + f64::from(strength)) * 1.5 * 0.75;
            prop_assert_eq!(
                compute_attack_damage(base, &attacker, &target),
                expected.round() as u32
            );
        }

        #[test]
        fn focus_never_reduces(value in 0u32..10_000, focus in 0u8..=3) {
            prop_assert!(apply_focus_bonus(value, focus) >= value);
        }

        #[test]
        fn focus_strictly_increases(value in 4u32..10_000) {
            for focus in 0u8..3 {
                prop_assert!(apply_focus_bonus(value, focus + 1) > apply_focus_bonus(value, focus));
            }
        }
    }
}

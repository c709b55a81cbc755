use strum::Display;

use super::{Combatant, CombatEntity, DamageReport, TurnHookReport};
use crate::card::Deck;
use crate::config::CombatConfig;

/// Fixed set of playable character classes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Display)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum CharacterClass {
    Vanguard,
    Striker,
    Mystic,
    Warden,
}

/// Whether a party member holds the Active slot.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Display)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum PartyPosition {
    Active,
    Standby,
}

/// A playable character in the party.
///
/// HP reaching zero incapacitates the member instead of removing it.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PartyMember {
    pub combatant: Combatant,
    pub class: CharacterClass,
    pub position: PartyPosition,
    focus: u8,
    incapacitated: bool,
    pub deck: Deck,
}

impl PartyMember {
    pub fn new(combatant: Combatant, class: CharacterClass, position: PartyPosition) -> Self {
        Self {
            combatant,
            class,
            position,
            focus: 0,
            incapacitated: false,
            deck: Deck::default(),
        }
    }

    #[must_use]
    pub fn with_deck(mut self, deck: Deck) -> Self {
        self.deck = deck;
        self
    }

    pub fn is_active(&self) -> bool {
        self.position == PartyPosition::Active
    }

    pub fn is_incapacitated(&self) -> bool {
        self.incapacitated
    }

    pub fn focus(&self) -> u8 {
        self.focus
    }

    /// Adds Focus up to [`CombatConfig::MAX_FOCUS`] and returns the new value.
    pub fn gain_focus(&mut self, amount: u8) -> u8 {
        self.focus = self
            .focus
            .saturating_add(amount)
            .min(CombatConfig::MAX_FOCUS);
        self.focus
    }

    /// Spends Focus if enough is held.
    pub fn spend_focus(&mut self, amount: u8) -> bool {
        if self.focus < amount {
            return false;
        }
        self.focus -= amount;
        true
    }

    /// Drops all Focus and returns how much was held.
    pub fn consume_focus(&mut self) -> u8 {
        std::mem::take(&mut self.focus)
    }

    /// Brings an incapacitated member back with `hp` health.
    ///
    /// Returns false if the member was not incapacitated.
    pub fn revive(&mut self, hp: u32) -> bool {
        if !self.incapacitated {
            return false;
        }
        self.incapacitated = false;
        let health = &mut self.combatant.health;
        health.current = hp.clamp(1, health.maximum.max(1));
        true
    }

    fn mark_incapacitated(&mut self, report: &DamageReport) {
        if report.lethal {
            self.incapacitated = true;
            self.focus = 0;
            self.combatant.block = 0;
        }
    }
}

impl CombatEntity for PartyMember {
    fn combatant(&self) -> &Combatant {
        &self.combatant
    }

    fn combatant_mut(&mut self) -> &mut Combatant {
        &mut self.combatant
    }

    fn is_alive(&self) -> bool {
        !self.incapacitated
    }

    fn take_damage(&mut self, amount: u32) -> DamageReport {
        if self.incapacitated {
            return DamageReport::default();
        }
        let report = self.combatant.absorb_damage(amount);
        self.mark_incapacitated(&report);
        report
    }

    /// Only the Active member clears its Block; Standby members keep theirs.
    fn on_turn_start(&mut self) -> TurnHookReport {
        if self.incapacitated || !self.is_active() {
            return TurnHookReport::default();
        }
        TurnHookReport {
            block_cleared: self.clear_block(),
            ..TurnHookReport::default()
        }
    }

    fn on_turn_end(&mut self) -> TurnHookReport {
        if self.incapacitated {
            return TurnHookReport::default();
        }
        let tick = self.combatant.status.tick_turn_end();
        let poison = (tick.poison > 0).then(|| self.combatant.lose_hp(tick.poison));
        if let Some(report) = &poison {
            self.mark_incapacitated(report);
        }
        let regenerated = if tick.regeneration > 0 {
            self.heal(tick.regeneration)
        } else {
            0
        };

        TurnHookReport {
            block_cleared: 0,
            poison,
            regenerated,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::{EntityId, StatusKind};

    fn member(position: PartyPosition) -> PartyMember {
        PartyMember::new(
            Combatant::new(EntityId(0), "Aria", 30),
            CharacterClass::Vanguard,
            position,
        )
    }

    #[test]
    fn focus_is_capped() {
        let mut member = member(PartyPosition::Standby);
        for _ in 0..5 {
            member.gain_focus(1);
        }
        assert_eq!(member.focus(), CombatConfig::MAX_FOCUS);
        assert!(member.spend_focus(2));
        assert!(!member.spend_focus(2));
        assert_eq!(member.consume_focus(), 1);
    }

    #[test]
    fn standby_keeps_block_at_turn_start() {
        let mut standby = member(PartyPosition::Standby);
        standby.gain_block(5);
        assert_eq!(standby.on_turn_start().block_cleared, 0);
        assert_eq!(standby.block(), 5);

        let mut active = member(PartyPosition::Active);
        active.gain_block(5);
        assert_eq!(active.on_turn_start().block_cleared, 5);
        assert_eq!(active.block(), 0);
    }

    #[test]
    fn lethal_damage_incapacitates() {
        let mut member = member(PartyPosition::Active);
        member.gain_focus(2);
        let report = member.take_damage(40);

        assert!(report.lethal);
        assert!(member.is_incapacitated());
        assert!(!member.is_alive());
        assert_eq!(member.focus(), 0);
        assert_eq!(member.heal(10), 0);
        assert_eq!(member.take_damage(5), DamageReport::default());
    }

    #[test]
    fn poison_can_incapacitate_at_turn_end() {
        let mut member = member(PartyPosition::Standby);
        member.combatant.health.current = 2;
        member.apply_status(StatusKind::Poison, 3);

        let report = member.on_turn_end();
        assert!(report.poison.is_some_and(|p| p.lethal));
        assert!(member.is_incapacitated());
    }

    #[test]
    fn revive_restores_health() {
        let mut member = member(PartyPosition::Standby);
        member.take_damage(100);
        assert!(member.revive(12));
        assert_eq!(member.health().current, 12);
        assert!(!member.revive(5));
    }
}

//! Enemy intents and their execution.
//!
//! An [`Enemy`] walks a fixed cycle of [`Intent`]s; this module resolves the
//! current one against the party. Targets come from the roster's targeting
//! lookup, damage goes through [`crate::formula`].

use rand::RngCore;
use strum::{Display, EnumDiscriminants};

use crate::event::{CombatEvent, EventLog};
use crate::formula::{compute_attack_damage, compute_block};
use crate::roster::{PartyRoster, handle_incapacitation};
use crate::scoring::PerformanceCounters;
use crate::state::{CombatEntity, Enemy, EntityId, StatusKind};

/// A status applied by an intent, to the enemy itself or to its target.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StatusApplication {
    pub status: StatusKind,
    pub stacks: i32,
}

impl StatusApplication {
    pub const fn new(status: StatusKind, stacks: i32) -> Self {
        Self { status, stacks }
    }
}

/// An enemy's pre-committed action.
#[derive(Clone, Debug, PartialEq, Eq, EnumDiscriminants)]
#[strum_discriminants(name(IntentKind), derive(Display, Hash))]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    strum_discriminants(derive(serde::Serialize, serde::Deserialize))
)]
pub enum Intent {
    /// `damage` per hit, `hits` times.
    Attack { damage: u32, hits: u32 },
    Defend { block: u32 },
    /// Attack, then apply `buff` to the enemy itself.
    AttackBuff {
        damage: u32,
        hits: u32,
        buff: StatusApplication,
    },
    /// Attack, then apply `debuff` to the target.
    AttackDebuff {
        damage: u32,
        hits: u32,
        debuff: StatusApplication,
    },
    Buff { status: StatusApplication },
    Debuff { status: StatusApplication },
    /// Does nothing. Also shown while a Groggy enemy has no pattern.
    Unknown,
}

impl Intent {
    /// Whether this intent needs a party target.
    pub fn targets_party(&self) -> bool {
        matches!(
            self,
            Self::Attack { .. }
                | Self::AttackBuff { .. }
                | Self::AttackDebuff { .. }
                | Self::Debuff { .. }
        )
    }
}

/// Resolves `enemy`'s current intent and advances its cursor.
///
/// The cursor advances even when the intent fizzles for lack of a target.
pub(crate) fn execute_intent(
    enemy: &mut Enemy,
    roster: &mut dyn PartyRoster,
    rng: &mut dyn RngCore,
    events: &mut EventLog,
    counters: &mut PerformanceCounters,
) {
    let intent = enemy.intent();
    let target = if intent.targets_party() {
        roster.target(enemy.targeting, rng)
    } else {
        None
    };

    match &intent {
        Intent::Attack { damage, hits } => {
            if let Some(target) = target {
                attack(enemy, target, *damage, *hits, roster, events, counters);
            }
        }
        Intent::Defend { block } => gain_block(enemy, *block, events),
        Intent::AttackBuff { damage, hits, buff } => {
            if let Some(target) = target {
                attack(enemy, target, *damage, *hits, roster, events, counters);
            }
            buff_self(enemy, *buff, events);
        }
        Intent::AttackDebuff {
            damage,
            hits,
            debuff,
        } => {
            if let Some(target) = target {
                attack(enemy, target, *damage, *hits, roster, events, counters);
                debuff_member(target, *debuff, roster, events);
            }
        }
        Intent::Buff { status } => buff_self(enemy, *status, events),
        Intent::Debuff { status } => {
            if let Some(target) = target {
                debuff_member(target, *status, roster, events);
            }
        }
        Intent::Unknown => {}
    }

    if intent.targets_party() && target.is_none() {
        events.push(CombatEvent::EffectFizzled { source: enemy.id() });
    }
    events.push(CombatEvent::IntentExecuted {
        enemy: enemy.id(),
        intent: IntentKind::from(&intent),
        target,
    });
    enemy.advance_intent();
}

fn attack(
    enemy: &Enemy,
    target: EntityId,
    damage: u32,
    hits: u32,
    roster: &mut dyn PartyRoster,
    events: &mut EventLog,
    counters: &mut PerformanceCounters,
) {
    for _ in 0..hits {
        let Some(member) = roster.member_mut(target) else {
            return;
        };
        if member.is_incapacitated() {
            return;
        }
        let amount = compute_attack_damage(damage, enemy.status(), member.status());
        let report = member.take_damage(amount);
        events.push(CombatEvent::DamageDealt {
            source: Some(enemy.id()),
            target,
            amount: report.amount,
            blocked: report.blocked,
            hp_lost: report.hp_lost,
            overkill: report.overkill,
        });
        if report.lethal {
            handle_incapacitation(roster, target, events, counters);
            return;
        }
    }
}

fn gain_block(enemy: &mut Enemy, base: u32, events: &mut EventLog) {
    let amount = compute_block(base, enemy.status());
    enemy.gain_block(amount);
    events.push(CombatEvent::BlockGained {
        entity: enemy.id(),
        amount,
    });
}

fn buff_self(enemy: &mut Enemy, application: StatusApplication, events: &mut EventLog) {
    let total = enemy.apply_status(application.status, application.stacks);
    events.push(CombatEvent::StatusApplied {
        target: enemy.id(),
        status: application.status,
        stacks: application.stacks,
        total,
    });
}

fn debuff_member(
    target: EntityId,
    application: StatusApplication,
    roster: &mut dyn PartyRoster,
    events: &mut EventLog,
) {
    let Some(member) = roster.member_mut(target) else {
        return;
    };
    if member.is_incapacitated() {
        return;
    }
    let total = member.apply_status(application.status, application.stacks);
    events.push(CombatEvent::StatusApplied {
        target,
        status: application.status,
        stacks: application.stacks,
        total,
    });
}

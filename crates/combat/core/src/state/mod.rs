//! Combat entity state.
//!
//! Party members and enemies share a [`Combatant`] record (HP, Block, status
//! store) and the [`CombatEntity`] capability trait; kind-specific fields live
//! on [`PartyMember`] and [`Enemy`].
mod break_gauge;
mod combatant;
mod common;
mod enemy;
mod party;
mod status;

pub use break_gauge::{BreakCondition, BreakGauge, BreakKind, GaugeTurnStart};
pub use combatant::{CombatEntity, Combatant, DamageReport, TurnHookReport};
pub use common::{EntityId, HealthMeter};
pub use enemy::{Enemy, EnemyTier, PatternMode, TargetingStrategy};
pub use party::{CharacterClass, PartyMember, PartyPosition};
pub use status::{StatusEffect, StatusEffects, StatusKind, StatusTick};

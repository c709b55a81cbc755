//! Deterministic turn-based combat rules for a card-driven party roguelike.
//!
//! `combat-core` decides whose turn it is, what a played card does, how
//! damage and block are computed, how Break interrupts an enemy's pattern,
//! and how a finished combat is scored. It performs no I/O: content arrives
//! as already-built records and every mutation is reported back as an
//! ordered list of [`CombatEvent`]s. All state lives in a
//! [`CombatSession`].
pub mod card;
pub mod config;
pub mod effect;
pub mod error;
pub mod event;
pub mod formula;
pub mod intent;
pub mod resources;
pub mod roster;
pub mod scoring;
pub mod session;
pub mod state;
pub mod template;
pub mod turn;

pub use card::{CardData, CardEffect, CardId, CardInstance, Deck, TargetSelector};
pub use config::{CombatConfig, ScoringConfig};
pub use error::{ErrorSeverity, GameError};
pub use event::{CombatEvent, CombatResult, EventLog};
pub use formula::{apply_focus_bonus, compute_attack_damage, compute_block};
pub use intent::{Intent, IntentKind, StatusApplication};
pub use resources::{EnergyPool, TagInRules};
pub use roster::{Party, PartyRoster};
pub use scoring::{PerformanceCounters, PerformanceSummary};
pub use session::{ActionError, CombatSession, SetupError};
pub use state::{
    BreakCondition, BreakGauge, BreakKind, CharacterClass, CombatEntity, Combatant, Enemy,
    EnemyTier, EntityId, HealthMeter, PartyMember, PartyPosition, StatusEffects, StatusKind,
    TargetingStrategy,
};
pub use template::{CardCatalog, CharacterTemplate, EnemyTemplate};
pub use turn::{Phase, TransitionError, TurnSequencer};

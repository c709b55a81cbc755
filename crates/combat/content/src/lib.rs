//! Data-driven combat content and loaders.
//!
//! This crate loads the static records the combat engine consumes from
//! RON/TOML data files:
//! - Card catalog (`cards.ron`)
//! - Enemy templates (`enemies.ron`)
//! - Party lineup (`party.ron`)
//! - Encounter tables (`encounters.ron`)
//! - Combat configuration (`config.toml`)
//!
//! [`ContentFactory`] ties them together and assembles a ready
//! [`combat_core::CombatSession`] for a named encounter.

#[cfg(feature = "loaders")]
pub mod loaders;

#[cfg(feature = "loaders")]
pub use loaders::{
    CardLoader, ConfigLoader, ContentFactory, Encounter, EncounterLoader, EnemyLoader,
    LoadResult, PartyLineup, PartyLoader,
};

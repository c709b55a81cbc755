//! Content factory for assembling combat sessions from data files.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use anyhow::Context;
use combat_core::{
    CardCatalog, CombatConfig, CombatSession, Enemy, EnemyTemplate, EntityId, Party,
    PartyPosition, TagInRules,
};

use crate::loaders::{
    CardLoader, ConfigLoader, Encounter, EncounterLoader, EnemyLoader, LoadResult, PartyLineup,
    PartyLoader,
};

/// Content factory that loads all combat content from a data directory.
///
/// # Directory Structure
///
/// ```text
/// data_dir/
/// ├── config.toml
/// ├── cards.ron
/// ├── enemies.ron
/// ├── party.ron
/// └── encounters.ron
/// ```
pub struct ContentFactory {
    data_dir: PathBuf,
}

impl ContentFactory {
    /// Creates a new content factory pointing to a data directory.
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
        }
    }

    /// Load combat configuration from `config.toml`.
    pub fn load_config(&self) -> LoadResult<CombatConfig> {
        ConfigLoader::load(&self.data_dir.join("config.toml"))
    }

    /// Load the card catalog from `cards.ron`.
    pub fn load_cards(&self) -> LoadResult<CardCatalog> {
        CardLoader::load(&self.data_dir.join("cards.ron"))
    }

    /// Load enemy templates from `enemies.ron`.
    pub fn load_enemies(&self) -> LoadResult<HashMap<String, EnemyTemplate>> {
        EnemyLoader::load(&self.data_dir.join("enemies.ron"))
    }

    /// Load the party lineup from `party.ron`.
    pub fn load_party(&self) -> LoadResult<PartyLineup> {
        PartyLoader::load(&self.data_dir.join("party.ron"))
    }

    /// Load encounter tables from `encounters.ron`.
    pub fn load_encounters(&self) -> LoadResult<HashMap<String, Encounter>> {
        EncounterLoader::load(&self.data_dir.join("encounters.ron"))
    }

    /// Loads every content file and builds an idle session for `encounter`.
    ///
    /// Party members get ids from 0 in lineup order; enemies get ids from
    /// [`EntityId::ENEMY_BASE`] in encounter order.
    pub fn build_session(&self, encounter: &str, seed: u64) -> LoadResult<CombatSession> {
        let config = self.load_config()?;
        let catalog = self.load_cards()?;
        let templates = self.load_enemies()?;
        let lineup = self.load_party()?;
        let encounters = self.load_encounters()?;

        let fight = encounters.get(encounter).with_context(|| {
            let mut known: Vec<_> = encounters.keys().map(String::as_str).collect();
            known.sort_unstable();
            format!(
                "Unknown encounter '{}' (available: {})",
                encounter,
                known.join(", ")
            )
        })?;

        let party = build_party(&lineup, &catalog, &config)?;
        let enemies = build_enemies(fight, &templates)
            .with_context(|| format!("Failed to build encounter '{}'", encounter))?;

        tracing::debug!(
            encounter,
            seed,
            party = lineup.members.len(),
            enemies = enemies.len(),
            "Assembled combat session"
        );

        CombatSession::new(config, party, enemies, seed)
            .with_context(|| format!("Invalid setup for encounter '{}'", encounter))
    }

    /// Returns the data directory path.
    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }
}

/// Spawns every lineup member with its deck resolved from `catalog`.
pub fn build_party(
    lineup: &PartyLineup,
    catalog: &CardCatalog,
    config: &CombatConfig,
) -> LoadResult<Party> {
    let members = lineup
        .members
        .iter()
        .enumerate()
        .map(|(index, template)| {
            let position = if index == lineup.active {
                PartyPosition::Active
            } else {
                PartyPosition::Standby
            };
            template
                .spawn(EntityId(index as u32), position, catalog)
                .map_err(|card| {
                    anyhow::anyhow!(
                        "Character '{}' references unknown card {:?}",
                        template.name,
                        card
                    )
                })
        })
        .collect::<LoadResult<Vec<_>>>()?;

    Ok(Party::new(members, TagInRules::from_config(config)))
}

/// Spawns the encounter's enemies from their templates.
pub fn build_enemies(
    encounter: &Encounter,
    templates: &HashMap<String, EnemyTemplate>,
) -> LoadResult<Vec<Enemy>> {
    encounter
        .enemies
        .iter()
        .enumerate()
        .map(|(index, key)| {
            let template = templates
                .get(key)
                .with_context(|| format!("Unknown enemy template '{}'", key))?;
            Ok(template.spawn(EntityId(EntityId::ENEMY_BASE.0 + index as u32)))
        })
        .collect()
}

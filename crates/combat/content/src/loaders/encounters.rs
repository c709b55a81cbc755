//! Encounter table loader.

use std::collections::HashMap;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::loaders::{LoadResult, read_file};

/// A fight: the enemy templates it spawns, in order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Encounter {
    /// Enemy template keys from `enemies.ron`. Repeats spawn separate enemies.
    pub enemies: Vec<String>,
}

/// Loader for encounter tables from RON files.
pub struct EncounterLoader;

impl EncounterLoader {
    /// Load encounters from a RON file.
    ///
    /// RON format: `Vec<(String, Encounter)>`.
    pub fn load(path: &Path) -> LoadResult<HashMap<String, Encounter>> {
        let content = read_file(path)?;
        Self::parse(&content)
    }

    pub fn parse(content: &str) -> LoadResult<HashMap<String, Encounter>> {
        let raw: Vec<(String, Encounter)> = ron::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse encounter RON: {}", e))?;

        let mut encounters = HashMap::with_capacity(raw.len());
        for (name, encounter) in raw {
            anyhow::ensure!(
                !encounter.enemies.is_empty(),
                "Encounter '{}' has no enemies",
                name
            );
            if encounters.insert(name.clone(), encounter).is_some() {
                anyhow::bail!("Duplicate encounter '{}'", name);
            }
        }

        Ok(encounters)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_named_encounters() {
        let encounters = EncounterLoader::parse(
            r#"[
                ("pair", (enemies: ["slime", "slime"])),
                ("boss", (enemies: ["warden"])),
            ]"#,
        )
        .expect("encounters should parse");

        assert_eq!(encounters.len(), 2);
        assert_eq!(encounters["pair"].enemies, vec!["slime", "slime"]);
    }

    #[test]
    fn rejects_empty_encounter() {
        assert!(EncounterLoader::parse(r#"[("empty", (enemies: []))]"#).is_err());
    }
}

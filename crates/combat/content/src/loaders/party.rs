//! Party lineup loader.

use std::path::Path;

use combat_core::CharacterTemplate;
use serde::{Deserialize, Serialize};

use crate::loaders::{LoadResult, read_file};

/// The characters brought into combat, in roster order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PartyLineup {
    pub members: Vec<CharacterTemplate>,
    /// Index into `members` of the character that starts Active.
    #[serde(default)]
    pub active: usize,
}

/// Loader for the party lineup from RON files.
pub struct PartyLoader;

impl PartyLoader {
    pub fn load(path: &Path) -> LoadResult<PartyLineup> {
        let content = read_file(path)?;
        Self::parse(&content)
    }

    pub fn parse(content: &str) -> LoadResult<PartyLineup> {
        let lineup: PartyLineup = ron::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse party RON: {}", e))?;

        anyhow::ensure!(!lineup.members.is_empty(), "Party lineup is empty");
        anyhow::ensure!(
            lineup.active < lineup.members.len(),
            "Active index {} is out of range for {} members",
            lineup.active,
            lineup.members.len()
        );
        if let Some(member) = lineup.members.iter().find(|m| m.max_hp == 0) {
            anyhow::bail!("Character '{}' has no HP", member.name);
        }

        Ok(lineup)
    }
}

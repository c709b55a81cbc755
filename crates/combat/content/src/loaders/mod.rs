//! File loaders for the combat content set.

pub mod cards;
pub mod config;
pub mod encounters;
pub mod enemies;
pub mod factory;
pub mod party;

pub use cards::CardLoader;
pub use config::ConfigLoader;
pub use encounters::{Encounter, EncounterLoader};
pub use enemies::EnemyLoader;
pub use factory::ContentFactory;
pub use party::{PartyLineup, PartyLoader};

use std::path::Path;

/// Result type for loader operations.
pub type LoadResult<T> = anyhow::Result<T>;

/// Helper function to read a file to string.
pub(crate) fn read_file(path: &Path) -> LoadResult<String> {
    std::fs::read_to_string(path)
        .map_err(|e| anyhow::anyhow!("Failed to read file {}: {}", path.display(), e))
}

//! Card catalog loader.

use std::path::Path;
use std::sync::Arc;

use combat_core::{CardCatalog, CardData};
use serde::{Deserialize, Serialize};

use crate::loaders::{LoadResult, read_file};

/// Card catalog structure for RON files.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CardCatalogFile {
    pub cards: Vec<CardData>,
}

/// Loader for the card catalog from RON files.
pub struct CardLoader;

impl CardLoader {
    /// Load the card catalog from a RON file.
    ///
    /// # Errors
    ///
    /// Fails on unreadable files, malformed RON, and duplicate card ids.
    pub fn load(path: &Path) -> LoadResult<CardCatalog> {
        let content = read_file(path)?;
        Self::parse(&content)
    }

    pub fn parse(content: &str) -> LoadResult<CardCatalog> {
        let file: CardCatalogFile = ron::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse card catalog RON: {}", e))?;

        let mut catalog = CardCatalog::with_capacity(file.cards.len());
        for card in file.cards {
            if let Some(upgraded) = &card.upgraded {
                anyhow::ensure!(
                    upgraded.id == card.id,
                    "Card '{}' has an upgrade with a different id ({:?})",
                    card.name,
                    upgraded.id
                );
            }
            let id = card.id;
            let name = card.name.clone();
            if catalog.insert(id, Arc::new(card)).is_some() {
                anyhow::bail!("Duplicate card id {:?} ('{}')", id, name);
            }
        }

        Ok(catalog)
    }
}

//! Enemy template loader.

use std::collections::HashMap;
use std::path::Path;

use combat_core::{EnemyTemplate, Intent};

use crate::loaders::{LoadResult, read_file};

/// Loader for enemy templates from RON files.
pub struct EnemyLoader;

impl EnemyLoader {
    /// Load enemy templates from a RON file.
    ///
    /// RON format: `Vec<(String, EnemyTemplate)>`, keyed by the name
    /// encounters refer to.
    pub fn load(path: &Path) -> LoadResult<HashMap<String, EnemyTemplate>> {
        let content = read_file(path)?;
        Self::parse(&content)
    }

    pub fn parse(content: &str) -> LoadResult<HashMap<String, EnemyTemplate>> {
        let raw: Vec<(String, EnemyTemplate)> = ron::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse enemy catalog RON: {}", e))?;

        let mut templates = HashMap::with_capacity(raw.len());
        for (key, template) in raw {
            anyhow::ensure!(template.max_hp > 0, "Enemy '{}' has no HP", key);
            anyhow::ensure!(
                !template.pattern.is_empty(),
                "Enemy '{}' has an empty action pattern",
                key
            );
            anyhow::ensure!(
                !has_zero_hit_attack(&template.pattern),
                "Enemy '{}' has an attack with zero hits",
                key
            );
            if templates.insert(key.clone(), template).is_some() {
                anyhow::bail!("Duplicate enemy template '{}'", key);
            }
        }

        Ok(templates)
    }
}

fn has_zero_hit_attack(pattern: &[Intent]) -> bool {
    pattern.iter().any(|intent| {
        matches!(
            intent,
            Intent::Attack { hits: 0, .. }
                | Intent::AttackBuff { hits: 0, .. }
                | Intent::AttackDebuff { hits: 0, .. }
        )
    })
}

//! Combat configuration loader.

use std::path::Path;

use combat_core::CombatConfig;

use crate::loaders::{LoadResult, read_file};

/// Loader for combat configuration from TOML files.
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load config data from a TOML file.
    ///
    /// Keys missing from the file keep their [`CombatConfig::default`] value.
    pub fn load(path: &Path) -> LoadResult<CombatConfig> {
        let content = read_file(path)?;
        Self::parse(&content)
    }

    pub fn parse(content: &str) -> LoadResult<CombatConfig> {
        let config: CombatConfig = toml::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse config TOML: {}", e))?;

        anyhow::ensure!(config.max_energy > 0, "max_energy must be positive");
        anyhow::ensure!(
            config.hand_size as usize <= CombatConfig::MAX_HAND_SIZE,
            "hand_size {} exceeds the hand limit of {}",
            config.hand_size,
            CombatConfig::MAX_HAND_SIZE
        );
        anyhow::ensure!(
            config.focus_free_threshold <= CombatConfig::MAX_FOCUS,
            "focus_free_threshold {} is unreachable (Focus caps at {})",
            config.focus_free_threshold,
            CombatConfig::MAX_FOCUS
        );

        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_keys_fall_back_to_defaults() {
        let config = ConfigLoader::parse("max_energy = 4\n[scoring]\nspeed_max = 80\n")
            .expect("partial config should parse");

        assert_eq!(config.max_energy, 4);
        assert_eq!(config.hand_size, CombatConfig::DEFAULT_HAND_SIZE);
        assert_eq!(config.scoring.speed_max, 80);
        assert_eq!(config.scoring.per_turn_bonus, 10);
    }

    #[test]
    fn rejects_oversized_hand() {
        let err = ConfigLoader::parse("hand_size = 11").unwrap_err();
        assert!(err.to_string().contains("hand limit"));
    }

    #[test]
    fn rejects_unreachable_free_threshold() {
        assert!(ConfigLoader::parse("focus_free_threshold = 4").is_err());
    }
}

//! Simulator settings read from the environment.
use std::env;
use std::path::PathBuf;

/// Headless simulator configuration.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SimConfig {
    /// Directory holding the content files.
    pub data_dir: PathBuf,
    /// Encounter name from `encounters.ron`.
    pub encounter: String,
    pub seed: u64,
    /// Player turns played before the run is abandoned.
    pub max_turns: u32,
}

impl SimConfig {
    /// Construct simulator configuration from environment variables.
    ///
    /// Environment variables:
    /// - `COMBAT_DATA_DIR` - Content directory (default: `data`)
    /// - `COMBAT_ENCOUNTER` - Encounter to fight (default: `slimes`)
    /// - `COMBAT_SEED` - RNG seed (default: 0)
    /// - `COMBAT_MAX_TURNS` - Turn limit (default: 50, minimum 1)
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Some(dir) = read_env::<PathBuf>("COMBAT_DATA_DIR") {
            config.data_dir = dir;
        }
        if let Some(encounter) = read_env::<String>("COMBAT_ENCOUNTER") {
            config.encounter = encounter;
        }
        if let Some(seed) = read_env::<u64>("COMBAT_SEED") {
            config.seed = seed;
        }
        if let Some(turns) = read_env::<u32>("COMBAT_MAX_TURNS") {
            config.max_turns = turns.max(1);
        }

        config
    }
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("data"),
            encounter: "slimes".to_string(),
            seed: 0,
            max_turns: 50,
        }
    }
}

fn read_env<T>(key: &str) -> Option<T>
where
    T: std::str::FromStr,
{
    env::var(key).ok()?.parse().ok()
}

//! Game configuration.
//!
//! Settings come from an optional JSON file; any field left out keeps its
//! default. Command-line flags are applied on top by the binary.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::game::MIN_PLAYERS;

/// Errors raised while loading or checking a configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("cannot read config '{}': {}", path.display(), source)]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to parse config JSON: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("invalid config: {0}")]
    Invalid(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Directory map file names are resolved against.
    pub maps_dir: PathBuf,
    /// Players required before `startgame` succeeds.
    pub min_players: usize,
    /// Seed for randomized country ids. Sequential ids when absent.
    pub id_seed: Option<u64>,
}

impl Default for GameConfig {
    fn default() -> Self {
        GameConfig {
            maps_dir: PathBuf::from("."),
            min_players: MIN_PLAYERS,
            id_seed: None,
        }
    }
}

impl GameConfig {
    /// Reads and validates a JSON config file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let data = fs::read_to_string(path).map_err(|e| ConfigError::Read {
            path: path.to_path_buf(),
            source: e,
        })?;
        Self::from_json(&data)
    }

    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: GameConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.min_players < MIN_PLAYERS {
            return Err(ConfigError::Invalid(format!(
                "min_players must be at least {}, got {}",
                MIN_PLAYERS, self.min_players
            )));
        }
        Ok(())
    }
}

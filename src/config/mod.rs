// Configuration management for the organizer
// Handles loading/saving settings, with sensible defaults when config is missing

use dirs::config_dir;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{OrganizerError, Result};
use crate::shuffle::{ShuffleAllocator, ShuffleStrategy, StdRandom};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub library: LibraryConfig,
    pub shuffle: ShuffleConfig,
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LibraryConfig {
    pub directory: PathBuf,
    pub extension: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ShuffleConfig {
    pub strategy: ShuffleStrategy,
    /// Fixed seed for reproducible shuffles; entropy when unset.
    pub seed: Option<u64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// `EnvFilter` directive, overridden by `RUST_LOG`.
    pub filter: String,
    pub directory: PathBuf,
}

impl Default for LibraryConfig {
    fn default() -> Self {
        Self {
            directory: PathBuf::from("audio"),
            extension: "mp3".to_string(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            filter: "info".to_string(),
            directory: PathBuf::from("logs"),
        }
    }
}

impl ShuffleConfig {
    pub fn allocator(&self) -> ShuffleAllocator {
        ShuffleAllocator::new(self.strategy)
    }

    pub fn random_source(&self) -> StdRandom {
        match self.seed {
            Some(seed) => StdRandom::seeded(seed),
            None => StdRandom::from_entropy(),
        }
    }
}

impl Config {
    /// Load from the user config dir, writing defaults on first run.
    pub fn load() -> Result<Self> {
        let config_path = Self::config_path()?;

        if config_path.exists() {
            Self::load_from(&config_path)
        } else {
            let config = Config::default();
            config.save_to(&config_path)?;
            Ok(config)
        }
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|e| OrganizerError::io(path, e))?;
        let config: Config = toml::from_str(&content)?;
        Ok(config)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|e| OrganizerError::io(parent, e))?;
        }

        let content = toml::to_string_pretty(self)?;
        fs::write(path, content).map_err(|e| OrganizerError::io(path, e))?;

        Ok(())
    }

    fn config_path() -> Result<PathBuf> {
        let config_dir = config_dir()
            .ok_or(OrganizerError::NoConfigDir)?
            .join("music-organizer");

        Ok(config_dir.join("config.toml"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_trip_through_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");

        let mut config = Config::default();
        config.shuffle.strategy = ShuffleStrategy::FillAndRepair;
        config.shuffle.seed = Some(1234);
        config.save_to(&path).unwrap();

        assert_eq!(Config::load_from(&path).unwrap(), config);
    }

    #[test]
    fn test_partial_file_uses_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "[shuffle]\nstrategy = \"fill_and_repair\"\n").unwrap();

        let config = Config::load_from(&path).unwrap();
        assert_eq!(config.shuffle.strategy, ShuffleStrategy::FillAndRepair);
        assert_eq!(config.shuffle.seed, None);
        assert_eq!(config.library, LibraryConfig::default());
        assert_eq!(config.logging.filter, "info");
    }

    #[test]
    fn test_bad_toml_is_parse_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "shuffle = [nope").unwrap();

        assert!(matches!(
            Config::load_from(&path),
            Err(OrganizerError::ConfigParse(_))
        ));
    }
}

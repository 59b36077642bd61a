//! Configuration loading
//!
//! Config is loaded with a two-layer resolution:
//! 1. An explicit path, or the override in the data dir
//!    (~/.local/share/tally/config/tally.toml) when it exists
//! 2. Fall back to embedded defaults (compiled into binary)
//!
//! Missing keys in an override file keep their default values.

use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use tracing::debug;

use crate::categorizer::MatchPolicy;
use crate::error::{Error, Result};

/// Embedded default config (compiled into binary)
const DEFAULT_CONFIG: &str = include_str!("../../../config/tally.toml");

/// Database settings
#[derive(Debug, Clone, PartialEq)]
pub struct DatabaseConfig {
    pub path: PathBuf,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from("tally.db"),
        }
    }
}

/// Categorizer settings
#[derive(Debug, Clone, PartialEq)]
pub struct CategorizerConfig {
    pub learned_match: MatchPolicy,
    pub replay_on_start: bool,
}

impl Default for CategorizerConfig {
    fn default() -> Self {
        Self {
            learned_match: MatchPolicy::LongestKey,
            replay_on_start: true,
        }
    }
}

/// Resolved configuration
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Config {
    pub database: DatabaseConfig,
    pub categorizer: CategorizerConfig,
    /// File the config was read from (None when using embedded defaults)
    pub source: Option<PathBuf>,
}

impl Config {
    /// Load from `path` if given, else the default override location, else
    /// embedded defaults
    ///
    /// An explicit path that does not exist is an error; a missing default
    /// override is not.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        if let Some(path) = path {
            return Self::from_file(path);
        }

        match default_config_path() {
            Some(default_path) if default_path.exists() => Self::from_file(&default_path),
            _ => Self::from_toml(DEFAULT_CONFIG),
        }
    }

    /// Read and parse a config file
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|e| {
            Error::Config(format!("Failed to read config {}: {}", path.display(), e))
        })?;
        let mut config = Self::from_toml(&content)?;
        config.source = Some(path.to_path_buf());
        debug!("Loaded config from {}", path.display());
        Ok(config)
    }

    /// Parse config from TOML content
    pub fn from_toml(content: &str) -> Result<Self> {
        let raw: RawConfig = toml::from_str(content)
            .map_err(|e| Error::Config(format!("Invalid config TOML: {}", e)))?;

        let mut config = Config::default();

        if let Some(database) = raw.database {
            if let Some(path) = database.path {
                config.database.path = path;
            }
        }

        if let Some(categorizer) = raw.categorizer {
            if let Some(policy) = categorizer.learned_match {
                config.categorizer.learned_match = policy.parse().map_err(Error::Config)?;
            }
            if let Some(replay) = categorizer.replay_on_start {
                config.categorizer.replay_on_start = replay;
            }
        }

        Ok(config)
    }
}

/// Default config override path
pub fn default_config_path() -> Option<PathBuf> {
    dirs::data_local_dir().map(|d| d.join("tally").join("config").join("tally.toml"))
}

/// Raw config structure for TOML parsing
#[derive(Debug, Deserialize)]
struct RawConfig {
    database: Option<RawDatabase>,
    categorizer: Option<RawCategorizer>,
}

#[derive(Debug, Deserialize)]
struct RawDatabase {
    path: Option<PathBuf>,
}

#[derive(Debug, Deserialize)]
struct RawCategorizer {
    learned_match: Option<String>,
    replay_on_start: Option<bool>,
}

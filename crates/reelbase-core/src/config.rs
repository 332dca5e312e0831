//! Configuration management for Reelbase.
//!
//! This module provides configuration loading, saving, and defaults.
//! Configuration is stored in TOML format in a platform-appropriate location.

use crate::error::{ReelError, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Main configuration structure for Reelbase.
///
/// ## Example Configuration File (reelbase.toml)
///
/// ```toml
/// [general]
/// log_level = "warn"
///
/// [storage]
/// path = "/home/me/movies.csv"
///
/// [omdb]
/// api_key = "abcd1234"
/// timeout_secs = 10
///
/// [search]
/// fuzzy_threshold = 50
///
/// [countries]
/// path = "/home/me/countries.json"
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// General settings
    pub general: GeneralConfig,

    /// Catalog file location
    pub storage: StorageConfig,

    /// OMDb lookup settings
    pub omdb: OmdbConfig,

    /// Title search tuning
    pub search: SearchConfig,

    /// Country code table
    pub countries: CountriesConfig,
}

/// General configuration options
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneralConfig {
    /// Log level (trace, debug, info, warn, error)
    pub log_level: String,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        GeneralConfig {
            log_level: "warn".to_string(),
        }
    }
}

/// Storage configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct StorageConfig {
    /// Catalog file (None = movies.json in the data directory).
    /// The extension selects the format.
    pub path: Option<PathBuf>,
}

/// OMDb configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OmdbConfig {
    /// API key; may also be supplied through the environment
    pub api_key: Option<String>,

    /// Endpoint queried with `?apikey=..&t=..`
    pub base_url: String,

    /// Request timeout in seconds
    pub timeout_secs: u64,
}

impl Default for OmdbConfig {
    fn default() -> Self {
        OmdbConfig {
            api_key: None,
            base_url: "https://www.omdbapi.com/".to_string(),
            timeout_secs: 10,
        }
    }
}

/// Search configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchConfig {
    /// Similarity (0-100) a title must exceed to be suggested
    pub fuzzy_threshold: u8,
}

impl Default for SearchConfig {
    fn default() -> Self {
        SearchConfig {
            fuzzy_threshold: crate::search::DEFAULT_THRESHOLD,
        }
    }
}

/// Country table configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct CountriesConfig {
    /// JSON file mapping code to country name (None = bundled table)
    pub path: Option<PathBuf>,
}

impl Config {
    /// Load configuration from the default location.
    ///
    /// Returns default config if no config file exists.
    pub fn load() -> Result<Self> {
        let config_path = Self::default_config_path()?;
        Self::load_from(&config_path)
    }

    /// Load configuration from a specific path.
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            debug!(path = %path.display(), "Config file not found, using defaults");
            return Ok(Config::default());
        }

        info!(path = %path.display(), "Loading configuration");
        let contents = fs::read_to_string(path)?;
        let config: Config = toml::from_str(&contents).map_err(|e| ReelError::ConfigError {
            reason: format!("Failed to parse config: {}", e),
        })?;

        Ok(config)
    }

    /// Get the default configuration file path.
    pub fn default_config_path() -> Result<PathBuf> {
        let dirs = ProjectDirs::from("", "", "reelbase").ok_or_else(|| ReelError::ConfigError {
            reason: "Could not determine config directory".to_string(),
        })?;

        Ok(dirs.config_dir().join("reelbase.toml"))
    }

    /// Get the default data directory path.
    pub fn default_data_dir() -> Result<PathBuf> {
        let dirs = ProjectDirs::from("", "", "reelbase").ok_or_else(|| ReelError::ConfigError {
            reason: "Could not determine data directory".to_string(),
        })?;

        Ok(dirs.data_dir().to_path_buf())
    }

    /// Get the catalog file (from config or default).
    pub fn store_path(&self) -> Result<PathBuf> {
        if let Some(ref path) = self.storage.path {
            Ok(path.clone())
        } else {
            Ok(Self::default_data_dir()?.join("movies.json"))
        }
    }
}

//! Configuration loading and management
//!
//! Handles parsing of the `config.toml` file in the platform config
//! directory (or a path given with `--config`). A missing or unparseable
//! file falls back to defaults.

use std::path::{Path, PathBuf};

use directories::ProjectDirs;
use serde::{Deserialize, Serialize};

use crate::error::Result;

/// Name of the config file inside the config directory
pub const CONFIG_FILE: &str = "config.toml";

/// Main configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Storage configuration
    #[serde(default)]
    pub storage: StorageConfig,

    /// Task validation configuration
    #[serde(default)]
    pub tasks: TasksConfig,
}

/// Storage-related configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StorageConfig {
    /// Explicit path to the task blob; overrides the platform default
    #[serde(default)]
    pub file: Option<PathBuf>,
}

/// Task-validation configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TasksConfig {
    /// Treat an empty description as a validation failure
    #[serde(default)]
    pub require_description: bool,
}

impl Config {
    /// Load configuration from an explicit file path
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        Ok(config)
    }

    /// Load the conventional config file, falling back to defaults when it
    /// is missing or malformed
    pub fn load_default() -> Self {
        match Self::default_path() {
            Some(path) if path.exists() => Self::load(&path).unwrap_or_default(),
            _ => Self::default(),
        }
    }

    /// Platform default config file path, when one can be determined
    pub fn default_path() -> Option<PathBuf> {
        ProjectDirs::from("", "", "tsk").map(|dirs| dirs.config_dir().join(CONFIG_FILE))
    }

    /// Save configuration to a file
    pub fn save(&self, path: &Path) -> Result<()> {
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }
}

//! Configuration schema, loading, and persistence.

use crate::error::ConfigError;
use crate::paths;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Top-level PassVault configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Vault storage settings.
    pub vault: VaultConfig,

    /// Logging settings.
    pub logging: LoggingConfig,
}

/// Vault storage settings.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct VaultConfig {
    /// Which storage backend to use.
    pub backend: VaultBackend,

    /// Override for the vault data directory. Tilde-expanded.
    /// Defaults to `~/.passvault/vault` when unset.
    pub dir: Option<String>,
}

/// Storage backend selection.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VaultBackend {
    /// In-memory state, lost on process exit. Useful for tests and dry runs.
    Memory,
    /// JSON file persistence with atomic writes.
    #[default]
    File,
}

/// Logging settings.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Minimum level emitted.
    pub level: LogLevel,
}

/// Log verbosity level.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Error,
    Warn,
    #[default]
    Info,
    Debug,
    Trace,
}

impl Config {
    /// Load configuration from the default path.
    pub fn load_default() -> Result<Self, ConfigError> {
        let path = paths::config_file()?;
        Self::load(&path)
    }

    /// Load configuration from a file path.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            return Err(ConfigError::NotFound(path.to_path_buf()));
        }

        let content = fs::read_to_string(path)?;
        Self::parse(&content)
    }

    /// Parse configuration from a string.
    pub fn parse(content: &str) -> Result<Self, ConfigError> {
        json5::from_str(content).map_err(|e| ConfigError::Json5(e.to_string()))
    }

    /// Save configuration to a file path.
    pub fn save(&self, path: &Path) -> Result<(), ConfigError> {
        let content = self.to_json5()?;

        // Ensure parent directory exists
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        // Write atomically
        let temp_path = path.with_extension("tmp");
        fs::write(&temp_path, &content)?;
        fs::rename(&temp_path, path)?;

        Ok(())
    }

    /// Serialize to JSON5 string.
    pub fn to_json5(&self) -> Result<String, ConfigError> {
        // json5 doesn't have a serializer, so we use serde_json with pretty print
        serde_json::to_string_pretty(self).map_err(|e| ConfigError::Parse(e.to_string()))
    }

    /// Validate the configuration, collecting all errors before returning.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let mut errors = Vec::new();

        if let Some(dir) = &self.vault.dir {
            if dir.trim().is_empty() {
                errors.push("vault.dir must not be blank when set".to_string());
            }
        }

        if self.vault.backend == VaultBackend::Memory && self.vault.dir.is_some() {
            errors.push("vault.dir has no effect with the memory backend".to_string());
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(ConfigError::Validation(errors.join("; ")))
        }
    }

    /// Load configuration from the default path, falling back to defaults
    /// if no file exists.
    pub fn load_or_default() -> Self {
        match Self::load_default() {
            Ok(config) => config,
            Err(_) => Self::default(),
        }
    }

    /// Resolve the vault data directory, honoring the config override.
    pub fn vault_dir(&self) -> Result<PathBuf, ConfigError> {
        match &self.vault.dir {
            Some(dir) => Ok(paths::expand_tilde(dir)),
            None => paths::vault_dir(),
        }
    }
}

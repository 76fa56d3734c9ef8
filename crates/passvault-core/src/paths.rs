//! Path resolution utilities.

use crate::error::ConfigError;
use std::path::PathBuf;

/// Get the PassVault base directory (~/.passvault).
pub fn base_dir() -> Result<PathBuf, ConfigError> {
    let home = dirs::home_dir().ok_or_else(|| {
        ConfigError::Validation("Could not determine home directory".to_string())
    })?;
    Ok(home.join(".passvault"))
}

/// Get the main config file path (~/.passvault/passvault.json5).
pub fn config_file() -> Result<PathBuf, ConfigError> {
    Ok(base_dir()?.join("passvault.json5"))
}

/// Get the vault data directory (~/.passvault/vault).
pub fn vault_dir() -> Result<PathBuf, ConfigError> {
    Ok(base_dir()?.join("vault"))
}

/// Ensure all required directories exist.
pub fn ensure_dirs() -> Result<(), ConfigError> {
    let dirs = [base_dir()?, vault_dir()?];

    for dir in dirs {
        std::fs::create_dir_all(&dir)?;
    }

    Ok(())
}

/// Expand tilde (~) in a path.
pub fn expand_tilde(path: &str) -> PathBuf {
    if path.starts_with("~/") {
        if let Some(home) = dirs::home_dir() {
            return home.join(&path[2..]);
        }
    }
    PathBuf::from(path)
}

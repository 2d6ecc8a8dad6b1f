//! Path management for subtrack
//!
//! Provides XDG-compliant path resolution for the settings file.
//!
//! ## Path Resolution Order
//!
//! 1. `SUBTRACK_DATA_DIR` environment variable (if set)
//! 2. Unix (Linux/macOS): `$XDG_CONFIG_HOME/subtrack` or `~/.config/subtrack`
//! 3. Windows: `%APPDATA%\subtrack`

use std::path::{Path, PathBuf};

use crate::error::SubtrackError;

/// Environment variable overriding the base directory
pub const DATA_DIR_ENV: &str = "SUBTRACK_DATA_DIR";

/// Manages all paths used by subtrack
#[derive(Debug, Clone)]
pub struct SubtrackPaths {
    base_dir: PathBuf,
}

impl SubtrackPaths {
    /// Resolve the base directory from the environment
    ///
    /// # Errors
    ///
    /// Returns an error if no home or config directory can be determined.
    pub fn new() -> Result<Self, SubtrackError> {
        let base_dir = match std::env::var(DATA_DIR_ENV) {
            Ok(custom) if !custom.is_empty() => PathBuf::from(custom),
            _ => resolve_default_path()?,
        };

        Ok(Self { base_dir })
    }

    /// Create SubtrackPaths with a custom base directory (useful for testing)
    pub fn with_base_dir(base_dir: PathBuf) -> Self {
        Self { base_dir }
    }

    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    /// Get the path to the settings file
    pub fn settings_file(&self) -> PathBuf {
        self.base_dir.join("config.json")
    }

    /// Ensure the base directory exists
    pub fn ensure_directories(&self) -> Result<(), SubtrackError> {
        std::fs::create_dir_all(&self.base_dir)
            .map_err(|e| SubtrackError::Io(format!("Failed to create base directory: {}", e)))
    }

    /// Check if a settings file has been written
    pub fn is_initialized(&self) -> bool {
        self.settings_file().exists()
    }
}

#[cfg(not(windows))]
fn resolve_default_path() -> Result<PathBuf, SubtrackError> {
    let config_base = match std::env::var("XDG_CONFIG_HOME") {
        Ok(xdg) if !xdg.is_empty() => PathBuf::from(xdg),
        _ => {
            let home = std::env::var("HOME").map_err(|_| {
                SubtrackError::Config("Could not determine HOME directory".into())
            })?;
            PathBuf::from(home).join(".config")
        }
    };
    Ok(config_base.join("subtrack"))
}

#[cfg(windows)]
fn resolve_default_path() -> Result<PathBuf, SubtrackError> {
    let appdata = std::env::var("APPDATA")
        .map_err(|_| SubtrackError::Config("Could not determine APPDATA directory".into()))?;
    Ok(PathBuf::from(appdata).join("subtrack"))
}

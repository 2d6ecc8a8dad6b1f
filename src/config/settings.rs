//! User settings for subtrack
//!
//! Display preferences (currency symbol, date format, calendar markers) and
//! the default log filter.

use std::fmt::Write;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::paths::SubtrackPaths;
use crate::error::SubtrackError;
use crate::reports::DEFAULT_MARKER_LIMIT;

/// User settings for subtrack
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    /// Schema version for migration support
    #[serde(default = "default_schema_version")]
    pub schema_version: u32,

    /// Currency symbol used when formatting amounts
    #[serde(default = "default_currency")]
    pub currency_symbol: String,

    /// Date format preference (strftime format)
    #[serde(default = "default_date_format")]
    pub date_format: String,

    /// Subscriptions shown per calendar day before collapsing into "+N"
    #[serde(default = "default_marker_limit")]
    pub marker_limit: usize,

    /// tracing filter directive used when `SUBTRACK_LOG` is unset
    #[serde(default = "default_log_filter")]
    pub log_filter: String,
}

fn default_schema_version() -> u32 {
    1
}

fn default_currency() -> String {
    "€".to_string()
}

fn default_date_format() -> String {
    "%Y-%m-%d".to_string()
}

fn default_marker_limit() -> usize {
    DEFAULT_MARKER_LIMIT
}

fn default_log_filter() -> String {
    "subtrack=warn".to_string()
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            schema_version: default_schema_version(),
            currency_symbol: default_currency(),
            date_format: default_date_format(),
            marker_limit: default_marker_limit(),
            log_filter: default_log_filter(),
        }
    }
}

impl Settings {
    /// Load settings from disk, or fall back to defaults if the file doesn't exist
    pub fn load_or_create(paths: &SubtrackPaths) -> Result<Self, SubtrackError> {
        let settings_path = paths.settings_file();

        if !settings_path.exists() {
            // Don't save yet - let caller decide when to persist
            return Ok(Settings::default());
        }

        let contents = std::fs::read_to_string(&settings_path)
            .map_err(|e| SubtrackError::Io(format!("Failed to read settings file: {}", e)))?;

        let settings: Settings = serde_json::from_str(&contents).map_err(|e| {
            SubtrackError::Config(format!("Failed to parse settings file: {}", e))
        })?;

        settings.validate()?;
        Ok(settings)
    }

    /// Save settings to disk
    pub fn save(&self, paths: &SubtrackPaths) -> Result<(), SubtrackError> {
        paths.ensure_directories()?;

        let contents = serde_json::to_string_pretty(self).map_err(|e| {
            SubtrackError::Config(format!("Failed to serialize settings: {}", e))
        })?;

        std::fs::write(paths.settings_file(), contents)
            .map_err(|e| SubtrackError::Io(format!("Failed to write settings file: {}", e)))?;

        Ok(())
    }

    fn validate(&self) -> Result<(), SubtrackError> {
        if self.marker_limit == 0 {
            return Err(SubtrackError::Config(
                "marker_limit must be at least 1".into(),
            ));
        }
        if self.date_format.trim().is_empty() {
            return Err(SubtrackError::Config("date_format cannot be empty".into()));
        }

        let mut rendered = String::new();
        write!(rendered, "{}", NaiveDate::default().format(&self.date_format)).map_err(|_| {
            SubtrackError::Config(format!(
                "date_format '{}' is not a valid strftime pattern",
                self.date_format
            ))
        })?;

        Ok(())
    }
}

//! Display configuration for the task listing.
//!
//! The settings file (`config.yml`) lives in the store directory and
//! supplies the date format pattern and per-role style specs. A missing
//! file yields the defaults.

use std::collections::BTreeMap;
use std::path::Path;

use chrono::format::{Item, StrftimeItems};
use serde::Deserialize;

/// Style spec strings per semantic role. The strings are parsed into
/// terminal styles by [`crate::style::Theme`]; here they are opaque.
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct StyleConfig {
    pub list: String,
    pub index: String,
    pub completed: String,
    pub notes: String,
    pub tags: String,
    pub due: String,
    /// Priority level -> style spec. Levels missing from the map render
    /// unstyled.
    pub priority: BTreeMap<u8, String>,
}

impl Default for StyleConfig {
    fn default() -> Self {
        Self {
            list: "bright cyan bold".to_string(),
            index: "bright black".to_string(),
            completed: "bright black".to_string(),
            notes: "magenta".to_string(),
            tags: "blue".to_string(),
            due: "red".to_string(),
            priority: BTreeMap::from([
                (1, "cyan".to_string()),
                (2, "yellow".to_string()),
                (3, "red bold".to_string()),
            ]),
        }
    }
}

/// Settings loaded from `config.yml` in the store directory.
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct Settings {
    /// chrono strftime pattern for due/completed dates.
    pub dateformat: String,

    pub styles: StyleConfig,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            dateformat: "%Y-%m-%d".to_string(),
            styles: StyleConfig::default(),
        }
    }
}

/// Errors that can occur when loading or validating settings.
#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    #[error("failed to read settings file: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse settings file: {0}")]
    Parse(#[from] serde_yaml::Error),

    #[error("invalid date format pattern '{0}'")]
    BadDateFormat(String),
}

impl Settings {
    /// Load settings from a file path.
    ///
    /// Returns the defaults if the file doesn't exist.
    pub fn load(path: &Path) -> Result<Self, SettingsError> {
        let settings = match std::fs::read_to_string(path) {
            Ok(content) => serde_yaml::from_str::<Settings>(&content)?,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Self::default(),
            Err(e) => return Err(SettingsError::Io(e)),
        };

        settings.validate()?;
        Ok(settings)
    }

    /// Reject date patterns chrono cannot format.
    fn validate(&self) -> Result<(), SettingsError> {
        let has_error = StrftimeItems::new(&self.dateformat).any(|i| matches!(i, Item::Error));
        if has_error {
            return Err(SettingsError::BadDateFormat(self.dateformat.clone()));
        }
        Ok(())
    }
}

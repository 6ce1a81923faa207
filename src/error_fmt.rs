use std::fmt;

use owo_colors::OwoColorize;

use crate::filter::FilterError;
use crate::settings::SettingsError;
use crate::store::StoreReadError;
use crate::style::ThemeError;

/// Application error with context for actionable error messages.
#[derive(Debug)]
pub enum AppError {
    /// Store directory could not be read or held invalid records
    Store(StoreReadError),
    /// Settings file failed to load or validate
    Settings(SettingsError),
    /// Filter expression failed to parse
    Filter(FilterError),
    /// A style spec in the settings failed to parse
    Theme(ThemeError),
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::Store(e) => write!(f, "{}", format_store_error(e)),
            AppError::Settings(e) => write!(f, "{}", format_settings_error(e)),
            AppError::Filter(e) => write!(f, "{}", format_filter_error(e)),
            AppError::Theme(e) => write!(f, "{}", format_theme_error(e)),
        }
    }
}

impl std::error::Error for AppError {}

impl From<StoreReadError> for AppError {
    fn from(e: StoreReadError) -> Self {
        AppError::Store(e)
    }
}

impl From<SettingsError> for AppError {
    fn from(e: SettingsError) -> Self {
        AppError::Settings(e)
    }
}

impl From<FilterError> for AppError {
    fn from(e: FilterError) -> Self {
        AppError::Filter(e)
    }
}

impl From<ThemeError> for AppError {
    fn from(e: ThemeError) -> Self {
        AppError::Theme(e)
    }
}

// ============================================================================
// Formatting functions (internal implementation)
// ============================================================================

fn format_store_error(error: &StoreReadError) -> String {
    let mut out = String::new();

    out.push_str(&format!("{}: could not read tasks\n", "error".red().bold()));
    out.push('\n');
    for line in error.to_string().lines() {
        out.push_str(&format!("  {}\n", line));
    }
    out.push('\n');
    out.push_str(&format!(
        "  {}\n",
        "Fix the listed files and run the command again.".dimmed()
    ));

    out
}

fn format_settings_error(error: &SettingsError) -> String {
    let mut out = String::new();

    out.push_str(&format!("{}: {}\n", "error".red().bold(), error));
    out.push('\n');
    out.push_str(&format!(
        "  {}\n",
        "Check config.yml in the store directory.".dimmed()
    ));

    out
}

fn format_filter_error(error: &FilterError) -> String {
    let mut out = String::new();

    out.push_str(&format!("{}: {}\n", "error".red().bold(), error));
    out.push('\n');
    out.push_str(&format!(
        "  {}\n",
        "Filter terms: list:<name> tag:<name> priority:<n> status:<active|done>, or plain words matched against task names.".dimmed()
    ));

    out
}

fn format_theme_error(error: &ThemeError) -> String {
    let mut out = String::new();

    out.push_str(&format!("{}: {}\n", "error".red().bold(), error));
    out.push('\n');
    out.push_str(&format!(
        "  {}\n",
        "Style specs are words like 'bright cyan bold' in the styles section of config.yml.".dimmed()
    ));

    out
}

//! Core error types for laneline-core.
//!
//! Every failure in the core is a local validation failure reported
//! synchronously to the caller. Nothing here is process-fatal.

use std::path::PathBuf;
use thiserror::Error;

use crate::item::ItemId;

/// Core error type for laneline-core.
#[derive(Error, Debug)]
pub enum CoreError {
    /// Date, item and commit validation errors
    #[error("Timeline error: {0}")]
    Timeline(#[from] TimelineError),

    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Validation errors raised while normalizing items or applying commits.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TimelineError {
    /// A date string did not parse into year, month and day.
    #[error("Invalid date string: {input:?}")]
    InvalidDateFormat { input: String },

    /// Neither `startDate`/`endDate` nor `start`/`end` was present.
    #[error("Item {id} has no startDate/endDate or start/end pair")]
    MissingDateField { id: ItemId },

    /// A range whose start lies after its end.
    #[error("Inverted range: start day {start_day} is after end day {end_day}")]
    InvertedRange { start_day: i64, end_day: i64 },

    /// A day number outside the calendar range chrono can represent.
    #[error("Day number {day} is outside the representable calendar range")]
    DayOutOfRange { day: i64 },

    /// A commit addressed an id the collection does not contain.
    #[error("No item with id {id}")]
    UnknownItem { id: ItemId },
}

/// Configuration-specific errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Failed to load configuration
    #[error("Failed to load configuration from {path}: {message}")]
    LoadFailed { path: PathBuf, message: String },

    /// Failed to save configuration
    #[error("Failed to save configuration to {path}: {message}")]
    SaveFailed { path: PathBuf, message: String },

    /// Failed to parse configuration
    #[error("Failed to parse configuration: {0}")]
    ParseFailed(String),

    /// Dot-path key that names no configuration field
    #[error("Unknown configuration key: {0}")]
    UnknownKey(String),

    /// Invalid configuration value
    #[error("Invalid configuration value for '{key}': {message}")]
    InvalidValue { key: String, message: String },
}

impl From<toml::de::Error> for ConfigError {
    fn from(err: toml::de::Error) -> Self {
        ConfigError::ParseFailed(err.to_string())
    }
}

/// Result type alias for CoreError
pub type Result<T, E = CoreError> = std::result::Result<T, E>;

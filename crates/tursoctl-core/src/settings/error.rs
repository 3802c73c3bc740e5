//! Error types for settings operations

use thiserror::Error;

/// Errors that can occur while reading or writing the settings file
#[derive(Error, Debug)]
pub enum SettingsError {
    #[error("Failed to load settings from {path}: {source}")]
    LoadError {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to save settings to {path}: {source}")]
    SaveError {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse settings: {0}")]
    ParseError(#[from] toml::de::Error),

    #[error("Failed to serialize settings: {0}")]
    SerializeError(#[from] toml::ser::Error),

    #[error("Failed to determine settings directory")]
    SettingsDirError,
}

/// Result type for settings operations
pub type Result<T> = std::result::Result<T, SettingsError>;

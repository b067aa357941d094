//! Error types for settings loading and the extension settings host.

use std::path::PathBuf;
use thiserror::Error;

/// Errors produced while reading settings or talking to a settings host.
///
/// The file-level variants (`Read`, `Parse`, `NotAnObject`) are swallowed by
/// [`crate::config::load_settings_file`]; they only surface through
/// [`crate::config::try_load_settings_file`].
#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("Failed to read settings file {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid JSON in settings file {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Settings file {} must contain a JSON object, found {found}", path.display())]
    NotAnObject { path: PathBuf, found: &'static str },

    #[error("Config for extension '{extension}' does not match the expected shape: {source}")]
    Schema {
        extension: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("Unknown setting '{id}' for extension '{extension}'")]
    UnknownSetting { extension: String, id: String },

    #[error("Invalid value '{value}' for setting '{id}' of extension '{extension}' (allowed: {})", allowed.join(", "))]
    InvalidValue {
        extension: String,
        id: String,
        value: String,
        allowed: Vec<String>,
    },
}

/// Result type for settings operations.
pub type SettingsResult<T> = std::result::Result<T, SettingsError>;

/// Human-readable name of a JSON value's type, used in diagnostics.
pub fn json_type_name(value: &serde_json::Value) -> &'static str {
    match value {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "boolean",
        serde_json::Value::Number(_) => "number",
        serde_json::Value::String(_) => "string",
        serde_json::Value::Array(_) => "array",
        serde_json::Value::Object(_) => "object",
    }
}

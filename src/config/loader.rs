//! Settings file loading.
//!
//! A settings file maps extension names to their config objects. Missing or
//! unreadable files never abort the caller; they load as an empty mapping.

use crate::error::{SettingsError, SettingsResult, json_type_name};
use serde_json::{Map, Value};
use std::io::ErrorKind;
use std::path::Path;
use tracing::{debug, warn};

/// On-disk contents of one `settings-extensions.json`, keyed by extension name.
pub type SettingsFile = Map<String, Value>;

/// Read and parse a settings file, reporting every failure kind.
///
/// Returns `Ok(None)` when no file exists at `path`.
pub fn try_load_settings_file(path: &Path) -> SettingsResult<Option<SettingsFile>> {
    let content = match std::fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
        Err(source) => {
            return Err(SettingsError::Read {
                path: path.to_path_buf(),
                source,
            });
        }
    };

    let value: Value = serde_json::from_str(&content).map_err(|source| SettingsError::Parse {
        path: path.to_path_buf(),
        source,
    })?;

    match value {
        Value::Object(map) => Ok(Some(map)),
        other => Err(SettingsError::NotAnObject {
            path: path.to_path_buf(),
            found: json_type_name(&other),
        }),
    }
}

/// Load a settings file, falling back to an empty mapping.
///
/// Absence is logged at debug level; read errors, invalid JSON and non-object
/// documents are logged as warnings.
pub fn load_settings_file(path: &Path) -> SettingsFile {
    match try_load_settings_file(path) {
        Ok(Some(settings)) => {
            debug!(path = %path.display(), extensions = settings.len(), "Loaded settings file");
            settings
        }
        Ok(None) => {
            debug!(path = %path.display(), "Settings file not found, using empty settings");
            SettingsFile::new()
        }
        Err(e) => {
            warn!(path = %path.display(), error = %e, "Ignoring unusable settings file");
            SettingsFile::new()
        }
    }
}

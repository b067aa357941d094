//! Per-extension config resolution across the global and project tiers.

use super::loader::{SettingsFile, load_settings_file};
use super::merge::deep_merge;
use super::paths::SettingsPaths;
use crate::error::{SettingsError, SettingsResult, json_type_name};
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};
use std::path::PathBuf;
use tracing::{debug, warn};

/// Config for one extension, taken from one settings file.
pub type ExtensionConfig = Map<String, Value>;

/// Merged config returned to the extension.
pub type ResolvedConfig = Map<String, Value>;

/// Configuration tier, lowest priority first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum SettingsTier {
    /// `<agent-dir>/settings-extensions.json`
    Global = 0,
    /// `<cwd>/.pi/settings-extensions.json`
    Project = 1,
}

impl std::fmt::Display for SettingsTier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SettingsTier::Global => write!(f, "global"),
            SettingsTier::Project => write!(f, "project"),
        }
    }
}

/// One tier's contribution to an extension's config.
#[derive(Debug, Clone, PartialEq)]
pub struct ConfigLayer {
    pub tier: SettingsTier,
    /// File the layer was read from
    pub path: PathBuf,
    /// Extension config from that file (empty if absent or unusable)
    pub config: ExtensionConfig,
}

/// Both tiers of an extension's config before merging.
#[derive(Debug, Clone, PartialEq)]
pub struct ConfigLayers {
    pub global: ConfigLayer,
    pub project: ConfigLayer,
}

impl ConfigLayers {
    /// Merge the project layer over the global layer.
    pub fn merge(self) -> ResolvedConfig {
        deep_merge(self.global.config, self.project.config)
    }
}

/// Resolves extension configs from the global and project settings files.
///
/// Nothing is cached: every call re-reads both files.
#[derive(Debug, Clone, Default)]
pub struct ConfigResolver {
    paths: SettingsPaths,
}

impl ConfigResolver {
    /// Create a resolver over explicit paths.
    pub fn new(paths: SettingsPaths) -> Self {
        Self { paths }
    }

    /// Create a resolver over paths discovered from the environment.
    pub fn discover() -> Self {
        Self::new(SettingsPaths::discover())
    }

    /// Get the paths this resolver reads from.
    pub fn paths(&self) -> &SettingsPaths {
        &self.paths
    }

    /// Load the global and project configs for `name` without merging them.
    pub fn layers(&self, name: &str) -> ConfigLayers {
        ConfigLayers {
            global: self.load_layer(SettingsTier::Global, name),
            project: self.load_layer(SettingsTier::Project, name),
        }
    }

    /// Resolve the config for extension `name`, project values taking precedence.
    ///
    /// Never fails: missing or unusable files contribute an empty object.
    pub fn resolve(&self, name: &str) -> ResolvedConfig {
        let resolved = self.layers(name).merge();
        debug!(extension = %name, keys = resolved.len(), "Resolved extension config");
        resolved
    }

    /// Resolve the config for `name` and deserialize it into `T`.
    ///
    /// File problems are still swallowed; only a mismatch between the merged
    /// config and `T` is reported.
    pub fn resolve_as<T: DeserializeOwned>(&self, name: &str) -> SettingsResult<T> {
        let resolved = self.resolve(name);
        serde_json::from_value(Value::Object(resolved)).map_err(|source| SettingsError::Schema {
            extension: name.to_string(),
            source,
        })
    }

    fn load_layer(&self, tier: SettingsTier, name: &str) -> ConfigLayer {
        let path = match tier {
            SettingsTier::Global => self.paths.global_settings_path(),
            SettingsTier::Project => self.paths.project_settings_path(),
        };
        let settings = load_settings_file(&path);
        let config = extract_extension_config(settings, name, tier);
        ConfigLayer { tier, path, config }
    }
}

/// Take the object stored under `name`, or an empty object.
fn extract_extension_config(
    mut settings: SettingsFile,
    name: &str,
    tier: SettingsTier,
) -> ExtensionConfig {
    match settings.remove(name) {
        Some(Value::Object(config)) => config,
        None => ExtensionConfig::new(),
        Some(other) => {
            warn!(
                extension = %name,
                tier = %tier,
                found = json_type_name(&other),
                "Extension settings must be a JSON object, ignoring"
            );
            ExtensionConfig::new()
        }
    }
}

/// Load config for extension `name` from the discovered global and project
/// settings files, with project values taking precedence.
///
/// Each file contains a JSON object with extension names as keys:
/// ```json
/// {
///   "my-extension": { "timeout": 30 },
///   "another-extension": { "debug": true }
/// }
/// ```
pub fn load_config(name: &str) -> ResolvedConfig {
    ConfigResolver::discover().resolve(name)
}

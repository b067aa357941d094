//! Extension-facing settings host.
//!
//! Extensions declare user-facing settings by sending a
//! [`SettingsRegistration`] on the [`REGISTER_EVENT`] channel, then read and
//! write values through a [`SettingsHost`]. The real host lives in the agent
//! runtime; [`MemorySettingsHost`] is an in-process implementation backed by
//! the layered settings files.

pub mod example;

use crate::config::ConfigResolver;
use crate::error::{SettingsError, SettingsResult, json_type_name};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::{BTreeMap, HashMap};
use std::sync::{Mutex, MutexGuard};
use tracing::{debug, warn};

/// Event name used to register an extension's settings with the host.
pub const REGISTER_EVENT: &str = "pi-extension-settings:register";

/// A single user-facing setting.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SettingDefinition {
    pub id: String,
    pub label: String,
    pub description: String,
    pub default_value: String,
    /// Allowed values; any value is accepted when absent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub values: Option<Vec<String>>,
}

impl SettingDefinition {
    pub fn new(
        id: impl Into<String>,
        label: impl Into<String>,
        description: impl Into<String>,
        default_value: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
            description: description.into(),
            default_value: default_value.into(),
            values: None,
        }
    }

    /// Restrict the setting to an enumerated set of values.
    pub fn with_values<I, S>(mut self, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.values = Some(values.into_iter().map(Into::into).collect());
        self
    }

    /// Check whether `value` is acceptable for this setting.
    pub fn allows(&self, value: &str) -> bool {
        match self.values {
            Some(ref allowed) => allowed.iter().any(|v| v == value),
            None => true,
        }
    }
}

/// Payload of a [`REGISTER_EVENT`]: all settings declared by one extension.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SettingsRegistration {
    /// Extension name, also its key in `settings-extensions.json`
    pub name: String,
    pub settings: Vec<SettingDefinition>,
}

impl SettingsRegistration {
    pub fn new(name: impl Into<String>, settings: Vec<SettingDefinition>) -> Self {
        Self {
            name: name.into(),
            settings,
        }
    }

    /// Find a setting by id.
    pub fn setting(&self, id: &str) -> Option<&SettingDefinition> {
        self.settings.iter().find(|s| s.id == id)
    }
}

/// Services the agent runtime exposes to extensions for their settings.
pub trait SettingsHost {
    /// Declare an extension's settings, replacing any earlier registration.
    fn register(&self, registration: SettingsRegistration);

    /// Current value of a setting, or `default` if nothing better is known.
    fn get_setting(&self, extension: &str, id: &str, default: &str) -> String;

    /// Change a registered setting's value.
    fn set_setting(&self, extension: &str, id: &str, value: &str) -> SettingsResult<()>;
}

#[derive(Debug, Default)]
struct HostState {
    registrations: BTreeMap<String, SettingsRegistration>,
    /// extension name -> setting id -> value
    values: HashMap<String, HashMap<String, String>>,
}

/// In-memory [`SettingsHost`].
///
/// Lookup order for [`get_setting`](SettingsHost::get_setting):
/// 1. a value set during this session
/// 2. the extension's resolved config (when a resolver is attached)
/// 3. the registered default
/// 4. the caller's default
///
/// Values are never written back to the settings files.
#[derive(Debug, Default)]
pub struct MemorySettingsHost {
    state: Mutex<HostState>,
    resolver: Option<ConfigResolver>,
}

impl MemorySettingsHost {
    /// Create a host with no file-backed values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Read persisted values from the layered settings files.
    pub fn with_resolver(mut self, resolver: ConfigResolver) -> Self {
        self.resolver = Some(resolver);
        self
    }

    /// Registration for an extension, if any.
    pub fn registration(&self, extension: &str) -> Option<SettingsRegistration> {
        self.lock().registrations.get(extension).cloned()
    }

    /// Names of all registered extensions, sorted.
    pub fn extensions(&self) -> Vec<String> {
        self.lock().registrations.keys().cloned().collect()
    }

    fn lock(&self) -> MutexGuard<'_, HostState> {
        self.state.lock().unwrap_or_else(|e| e.into_inner())
    }

    /// Value for `id` from the extension's resolved config, if usable.
    fn config_value(
        &self,
        extension: &str,
        definition: Option<&SettingDefinition>,
        id: &str,
    ) -> Option<String> {
        let resolver = self.resolver.as_ref()?;
        let value = match resolver.resolve(extension).remove(id)? {
            Value::String(s) => s,
            v @ (Value::Bool(_) | Value::Number(_)) => v.to_string(),
            other => {
                warn!(
                    extension = %extension,
                    setting = %id,
                    found = json_type_name(&other),
                    "Setting value in settings file must be a scalar, ignoring"
                );
                return None;
            }
        };

        if let Some(def) = definition
            && !def.allows(&value)
        {
            warn!(
                extension = %extension,
                setting = %id,
                value = %value,
                "Setting value in settings file is not an allowed value, ignoring"
            );
            return None;
        }
        Some(value)
    }
}

impl SettingsHost for MemorySettingsHost {
    fn register(&self, registration: SettingsRegistration) {
        debug!(
            event = REGISTER_EVENT,
            extension = %registration.name,
            settings = registration.settings.len(),
            "Registered extension settings"
        );
        let mut state = self.lock();

        // Drop session values the new registration no longer accepts
        if let Some(values) = state.values.get_mut(&registration.name) {
            values.retain(|id, value| {
                registration
                    .setting(id)
                    .is_some_and(|def| def.allows(value))
            });
        }
        state
            .registrations
            .insert(registration.name.clone(), registration);
    }

    fn get_setting(&self, extension: &str, id: &str, default: &str) -> String {
        let definition = {
            let state = self.lock();
            if let Some(value) = state.values.get(extension).and_then(|v| v.get(id)) {
                return value.clone();
            }
            state
                .registrations
                .get(extension)
                .and_then(|r| r.setting(id))
                .cloned()
        };

        if let Some(value) = self.config_value(extension, definition.as_ref(), id) {
            return value;
        }

        match definition {
            Some(def) => def.default_value,
            None => default.to_string(),
        }
    }

    fn set_setting(&self, extension: &str, id: &str, value: &str) -> SettingsResult<()> {
        let mut state = self.lock();
        let definition = state
            .registrations
            .get(extension)
            .and_then(|r| r.setting(id))
            .ok_or_else(|| SettingsError::UnknownSetting {
                extension: extension.to_string(),
                id: id.to_string(),
            })?;

        if !definition.allows(value) {
            return Err(SettingsError::InvalidValue {
                extension: extension.to_string(),
                id: id.to_string(),
                value: value.to_string(),
                allowed: definition.values.clone().unwrap_or_default(),
            });
        }

        state
            .values
            .entry(extension.to_string())
            .or_default()
            .insert(id.to_string(), value.to_string());
        debug!(extension = %extension, setting = %id, "Setting updated");
        Ok(())
    }
}

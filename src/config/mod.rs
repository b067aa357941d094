//! Layered extension configuration.
//!
//! Each extension's config is read from two tiers and merged field-by-field:
//! 1. **Global** - `<agent-dir>/settings-extensions.json` (`~/.pi/agent` unless
//!    `PI_CODING_AGENT_DIR` is set)
//! 2. **Project** - `$CWD/.pi/settings-extensions.json`
//!
//! ## Merge Strategy
//! - Nested objects: deep merge, project wins per key
//! - Arrays and scalars: replaced by the project value
//!
//! ## Failure Policy
//! A missing, unreadable or invalid settings file behaves like `{}`.

mod loader;
mod merge;
mod paths;
mod resolver;

pub use loader::{SettingsFile, load_settings_file, try_load_settings_file};
pub use merge::{deep_merge, deep_merge_value};
pub use paths::{AGENT_DIR_ENV, CONFIG_DIR_NAME, SETTINGS_FILE_NAME, SettingsPaths};
pub use resolver::{
    ConfigLayer, ConfigLayers, ConfigResolver, ExtensionConfig, ResolvedConfig, SettingsTier,
    load_config,
};

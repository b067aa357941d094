//! Layered settings for pi coding agent extensions.
//!
//! This module exports the config resolver, the settings host seam and the
//! example extension.

pub mod cli;
pub mod config;
pub mod error;
pub mod extension;

pub use config::{ConfigResolver, ResolvedConfig, SettingsPaths, load_config};
pub use error::{SettingsError, SettingsResult};

//! Locations of the global and project settings files.
//!
//! The agent directory and working directory are carried explicitly so the
//! resolver never consults process-wide state on its own.

use std::ffi::OsString;
use std::path::{Path, PathBuf};

/// Name of the per-user and per-project config directory.
pub const CONFIG_DIR_NAME: &str = ".pi";

/// File name shared by the global and project settings files.
pub const SETTINGS_FILE_NAME: &str = "settings-extensions.json";

/// Environment variable that overrides the agent directory.
pub const AGENT_DIR_ENV: &str = "PI_CODING_AGENT_DIR";

/// The two directories a resolution reads from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SettingsPaths {
    /// Agent directory holding the global settings file (default `~/.pi/agent`)
    pub agent_dir: PathBuf,
    /// Working directory whose `.pi/` holds the project settings file
    pub cwd: PathBuf,
}

impl SettingsPaths {
    /// Create paths with explicit directories.
    pub fn new(agent_dir: impl Into<PathBuf>, cwd: impl Into<PathBuf>) -> Self {
        Self {
            agent_dir: agent_dir.into(),
            cwd: cwd.into(),
        }
    }

    /// Discover paths from the process environment.
    ///
    /// Agent dir: `PI_CODING_AGENT_DIR` or `~/.pi/agent`. Working dir: the
    /// process's current directory, or `.` if it cannot be determined.
    pub fn discover() -> Self {
        let cwd = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
        Self {
            agent_dir: agent_dir_from(std::env::var_os(AGENT_DIR_ENV), dirs::home_dir()),
            cwd,
        }
    }

    /// Replace the agent directory.
    pub fn with_agent_dir(mut self, agent_dir: impl Into<PathBuf>) -> Self {
        self.agent_dir = agent_dir.into();
        self
    }

    /// Replace the working directory.
    pub fn with_cwd(mut self, cwd: impl Into<PathBuf>) -> Self {
        self.cwd = cwd.into();
        self
    }

    /// `<agent-dir>/settings-extensions.json`
    pub fn global_settings_path(&self) -> PathBuf {
        self.agent_dir.join(SETTINGS_FILE_NAME)
    }

    /// `<cwd>/.pi/settings-extensions.json`
    pub fn project_settings_path(&self) -> PathBuf {
        self.cwd.join(CONFIG_DIR_NAME).join(SETTINGS_FILE_NAME)
    }
}

impl Default for SettingsPaths {
    fn default() -> Self {
        Self::discover()
    }
}

/// Resolve the agent directory from an optional override and the home directory.
fn agent_dir_from(env_value: Option<OsString>, home: Option<PathBuf>) -> PathBuf {
    let home = home.unwrap_or_else(|| PathBuf::from("."));

    match env_value.filter(|v| !v.is_empty()) {
        Some(value) => expand_home(Path::new(&value), &home),
        None => home.join(CONFIG_DIR_NAME).join("agent"),
    }
}

/// Expand a leading `~` component to the home directory.
fn expand_home(path: &Path, home: &Path) -> PathBuf {
    match path.strip_prefix("~") {
        Ok(rest) => home.join(rest),
        Err(_) => path.to_path_buf(),
    }
}

//! CLI command definitions for pi-extension-settings
//!
//! The binary is an inspection tool: it shows which settings files would be
//! read for an extension and what config they resolve to.

use crate::config::{ConfigLayer, ConfigResolver, SettingsPaths};
use crate::extension::{MemorySettingsHost, SettingsHost, example};
use anyhow::Result;
use clap::{Parser, Subcommand, ValueEnum};
use serde_json::{Value, json};
use std::path::PathBuf;

/// Output format for printed configs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    /// Pretty-printed JSON (default)
    #[default]
    Json,
    /// YAML
    Yaml,
}

/// Inspect layered extension settings
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Agent directory holding the global settings file (default: $PI_CODING_AGENT_DIR or ~/.pi/agent)
    #[arg(long, global = true)]
    pub agent_dir: Option<PathBuf>,

    /// Project directory whose .pi/ holds the project settings file (default: current directory)
    #[arg(long, global = true)]
    pub cwd: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Logging output: 0/off, 1/stdout, 2/stderr (default), or filename
    #[arg(short, long, default_value = "2", global = true)]
    pub log: String,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Json, global = true)]
    pub format: OutputFormat,

    #[command(subcommand)]
    pub command: Command,
}

/// Available subcommands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Print the merged config for an extension
    Show {
        /// Extension name (key in settings-extensions.json)
        name: String,
    },

    /// Print the global and project configs for an extension before merging
    Layers {
        /// Extension name (key in settings-extensions.json)
        name: String,
    },

    /// Print the settings file locations and whether they exist
    Paths,

    /// Activate the example extension against the settings files
    Example,
}

impl Cli {
    /// Settings paths after applying `--agent-dir` and `--cwd`.
    pub fn settings_paths(&self) -> SettingsPaths {
        let mut paths = SettingsPaths::discover();
        if let Some(ref dir) = self.agent_dir {
            paths = paths.with_agent_dir(dir);
        }
        if let Some(ref dir) = self.cwd {
            paths = paths.with_cwd(dir);
        }
        paths
    }
}

/// Run a subcommand and return the text to print.
pub fn run(command: &Command, resolver: &ConfigResolver, format: OutputFormat) -> Result<String> {
    let value = match command {
        Command::Show { name } => Value::Object(resolver.resolve(name)),
        Command::Layers { name } => {
            let layers = resolver.layers(name);
            json!({
                "global": layer_json(&layers.global),
                "project": layer_json(&layers.project),
                "merged": Value::Object(layers.merge()),
            })
        }
        Command::Paths => {
            let paths = resolver.paths();
            let global = paths.global_settings_path();
            let project = paths.project_settings_path();
            json!({
                "global": { "path": global.display().to_string(), "exists": global.is_file() },
                "project": { "path": project.display().to_string(), "exists": project.is_file() },
            })
        }
        Command::Example => {
            let host = MemorySettingsHost::new().with_resolver(resolver.clone());
            let theme = example::activate(&host)?;
            json!({
                "extension": example::EXAMPLE_EXTENSION,
                "theme": theme,
                "username": host.get_setting(example::EXAMPLE_EXTENSION, "username", ""),
                "registration": serde_json::to_value(example::example_settings())?,
            })
        }
    };
    render(&value, format)
}

fn layer_json(layer: &ConfigLayer) -> Value {
    json!({
        "path": layer.path.display().to_string(),
        "config": Value::Object(layer.config.clone()),
    })
}

/// Render a value in the requested format.
pub fn render(value: &Value, format: OutputFormat) -> Result<String> {
    let text = match format {
        OutputFormat::Json => serde_json::to_string_pretty(value)?,
        OutputFormat::Yaml => serde_yaml::to_string(value)?,
    };
    Ok(text.trim_end().to_string())
}

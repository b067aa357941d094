//! pi-extension-settings
//!
//! Prints the layered settings an extension would receive.

use anyhow::Result;
use clap::Parser;
use pi_extension_settings::cli::{self, Cli};
use pi_extension_settings::config::ConfigResolver;
use std::fs::OpenOptions;
use std::sync::Mutex;
use tracing::{Level, debug};
use tracing_subscriber::FmtSubscriber;

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging based on --log option
    let level = if cli.verbose {
        Level::DEBUG
    } else {
        Level::INFO
    };
    match cli.log.as_str() {
        "0" | "off" => {
            // No logging
        }
        "1" | "stdout" => {
            let subscriber = FmtSubscriber::builder()
                .with_max_level(level)
                .with_writer(std::io::stdout)
                .finish();
            tracing::subscriber::set_global_default(subscriber)?;
        }
        "2" | "stderr" => {
            let subscriber = FmtSubscriber::builder()
                .with_max_level(level)
                .with_writer(std::io::stderr)
                .finish();
            tracing::subscriber::set_global_default(subscriber)?;
        }
        filename => {
            // Log to file (append mode)
            let file = OpenOptions::new()
                .create(true)
                .append(true)
                .open(filename)?;
            let subscriber = FmtSubscriber::builder()
                .with_max_level(level)
                .with_writer(Mutex::new(file))
                .with_ansi(false)
                .finish();
            tracing::subscriber::set_global_default(subscriber)?;
        }
    }

    let paths = cli.settings_paths();
    debug!(
        global = %paths.global_settings_path().display(),
        project = %paths.project_settings_path().display(),
        "Using settings paths"
    );
    let resolver = ConfigResolver::new(paths);

    let output = cli::run(&cli.command, &resolver, cli.format)?;
    println!("{output}");

    Ok(())
}

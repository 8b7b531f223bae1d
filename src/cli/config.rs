//! Configuration management CLI commands.

use crate::cli::common::{CliError, CliResult, Session};
use crate::config::{Config, ThemeMode};
use crate::constants::APP_NAME;
use crate::models::Catalog;
use clap::{Args, Subcommand};
use serde::Serialize;
use std::path::{Path, PathBuf};

/// Configuration management commands
#[derive(Args, Debug)]
pub struct ConfigArgs {
    #[command(subcommand)]
    command: ConfigCommand,
}

#[derive(Subcommand, Debug)]
enum ConfigCommand {
    /// Display current configuration
    Show(ConfigShowArgs),
    /// Set configuration values
    Set(ConfigSetArgs),
}

/// Display current configuration
#[derive(Args, Debug)]
pub struct ConfigShowArgs {
    /// Output as JSON
    #[arg(long)]
    json: bool,
}

/// Set configuration values
#[derive(Args, Debug)]
pub struct ConfigSetArgs {
    /// Theme mode (auto, light, or dark)
    #[arg(long, value_name = "MODE")]
    theme: Option<String>,

    /// Directory containing gallery/portraits/
    #[arg(long, value_name = "DIR")]
    assets_dir: Option<PathBuf>,

    /// Directory for the tracked-state file
    #[arg(long, value_name = "DIR")]
    storage_dir: Option<PathBuf>,

    /// TOML file with a custom `names = [...]` list
    #[arg(long, value_name = "FILE")]
    catalog: Option<PathBuf>,
}

/// JSON-serializable configuration for output
#[derive(Serialize, Debug)]
struct ConfigOutput {
    config_file: String,
    paths: PathsOutput,
    ui: UiOutput,
}

#[derive(Serialize, Debug)]
struct PathsOutput {
    storage_dir: String,
    assets_dir: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    catalog_file: Option<String>,
}

#[derive(Serialize, Debug)]
struct UiOutput {
    theme: String,
    show_hints: bool,
}

impl ConfigArgs {
    /// Execute config subcommand
    pub fn execute(&self, session: &Session) -> CliResult<()> {
        match &self.command {
            ConfigCommand::Show(args) => args.execute(session),
            ConfigCommand::Set(args) => args.execute(),
        }
    }
}

impl ConfigShowArgs {
    /// Execute show command
    pub fn execute(&self, session: &Session) -> CliResult<()> {
        let output = describe(session.config())?;

        if self.json {
            let json = serde_json::to_string_pretty(&output).map_err(|e| {
                CliError::io(format!("Failed to serialize configuration to JSON: {e}"))
            })?;
            println!("{json}");
        } else {
            output_human_readable(&output);
        }

        Ok(())
    }
}

impl ConfigSetArgs {
    /// Execute set command
    pub fn execute(&self) -> CliResult<()> {
        // At least one argument must be provided
        if self.theme.is_none()
            && self.assets_dir.is_none()
            && self.storage_dir.is_none()
            && self.catalog.is_none()
        {
            return Err(CliError::validation(
                "At least one configuration option must be specified: --theme, --assets-dir, --storage-dir, or --catalog",
            ));
        }

        // Overrides from the global flags are not persisted; start from the file
        let mut config = Config::load()
            .map_err(|e| CliError::validation(format!("Failed to load configuration: {e:#}")))?;

        if let Some(theme_str) = &self.theme {
            let theme: ThemeMode = theme_str
                .parse()
                .map_err(|e: anyhow::Error| CliError::validation(e.to_string()))?;
            config.ui.theme_mode = theme;
        }

        if let Some(path) = &self.assets_dir {
            if !path.is_dir() {
                return Err(CliError::validation(format!(
                    "Assets directory does not exist: {}",
                    path.display()
                )));
            }
            config.paths.assets_dir = Some(path.clone());
        }

        if let Some(path) = &self.storage_dir {
            std::fs::create_dir_all(path).map_err(|e| {
                CliError::io(format!(
                    "Failed to create storage directory {}: {e}",
                    path.display()
                ))
            })?;
            config.paths.storage_dir = Some(path.clone());
        }

        if let Some(path) = &self.catalog {
            Catalog::load_from_file(path)
                .map_err(|e| CliError::validation(format!("Invalid catalog file: {e:#}")))?;
            config.paths.catalog_file = Some(path.clone());
        }

        config
            .save()
            .map_err(|e| CliError::io(format!("Failed to save configuration: {e:#}")))?;

        println!("Configuration updated successfully.");

        Ok(())
    }
}

fn display(path: &Path) -> String {
    path.to_string_lossy().to_string()
}

fn describe(config: &Config) -> CliResult<ConfigOutput> {
    let config_file = Config::config_file_path().map_err(|e| CliError::io(format!("{e:#}")))?;
    let storage_dir = config
        .storage_dir()
        .map_err(|e| CliError::io(format!("{e:#}")))?;

    Ok(ConfigOutput {
        config_file: display(&config_file),
        paths: PathsOutput {
            storage_dir: display(&storage_dir),
            assets_dir: display(&config.assets_dir()),
            catalog_file: config.paths.catalog_file.as_deref().map(display),
        },
        ui: UiOutput {
            theme: config.ui.theme_mode.as_str().to_string(),
            show_hints: config.ui.show_hints,
        },
    })
}

/// Output configuration in human-readable format
fn output_human_readable(output: &ConfigOutput) {
    println!("{APP_NAME} Configuration");
    println!("========================");
    println!();
    println!("Config file: {}", output.config_file);
    println!();

    println!("Paths:");
    println!("  Storage Directory: {}", output.paths.storage_dir);
    println!("  Assets Directory: {}", output.paths.assets_dir);
    match &output.paths.catalog_file {
        Some(file) => println!("  Catalog: {file}"),
        None => println!("  Catalog: (built-in)"),
    }
    println!();

    println!("UI:");
    println!("  Theme Mode: {}", output.ui.theme);
    println!("  Show Hints: {}", output.ui.show_hints);
    println!();
}

//! Survivor Tracker - checklist of survivors with persistent tracked state
//!
//! Without a subcommand this opens the interactive card grid. Subcommands
//! give headless, scriptable access to the same tracked set.

use anyhow::{Context, Result};
use clap::Parser;
use std::path::PathBuf;
use tracing::{info, warn};

use survivor_tracker::cli::{Commands, Session};
use survivor_tracker::config::Config;
use survivor_tracker::constants::APP_NAME;
use survivor_tracker::logging::{self, LogTarget};
use survivor_tracker::services::{AssetLoader, Controller};
use survivor_tracker::storage::FileStore;
use survivor_tracker::tui;

/// Survivor Tracker - mark which survivors you have already played
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Directory for the tracked-state file
    #[arg(long, global = true, value_name = "DIR")]
    storage_dir: Option<PathBuf>,

    /// Directory containing gallery/portraits/
    #[arg(long, global = true, value_name = "DIR")]
    assets_dir: Option<PathBuf>,

    /// TOML file with a custom `names = [...]` list
    #[arg(long, global = true, value_name = "FILE")]
    catalog: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

impl Cli {
    /// Loads the config file and layers the command-line overrides on top.
    fn effective_config(&self) -> Config {
        let mut config = Config::load().unwrap_or_else(|e| {
            warn!("Failed to load config, using defaults: {e:#}");
            Config::default()
        });

        if let Some(dir) = &self.storage_dir {
            config.paths.storage_dir = Some(dir.clone());
        }
        if let Some(dir) = &self.assets_dir {
            config.paths.assets_dir = Some(dir.clone());
        }
        if let Some(file) = &self.catalog {
            config.paths.catalog_file = Some(file.clone());
        }

        config
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match &cli.command {
        Some(command) => {
            logging::init(LogTarget::Stderr, cli.verbose)?;
            let session = Session::new(cli.effective_config());

            if let Err(e) = command.execute(&session) {
                eprintln!("Error: {e}");
                std::process::exit(e.code().as_i32());
            }
            Ok(())
        }
        None => run_interactive(&cli),
    }
}

fn run_interactive(cli: &Cli) -> Result<()> {
    let log_path = Config::log_file_path()?;
    logging::init(LogTarget::File(&log_path), cli.verbose)?;

    let config = cli.effective_config();
    let catalog = config.load_catalog()?;
    let storage_dir = config.storage_dir()?;
    info!(
        "{APP_NAME} v{} starting: {} entries, storage at {}",
        env!("CARGO_PKG_VERSION"),
        catalog.len(),
        storage_dir.display()
    );

    let controller = Controller::new(catalog, FileStore::new(storage_dir));
    let loader = AssetLoader::new(config.assets_dir());

    // Initialize TUI
    let mut terminal = tui::setup_terminal()?;
    let mut app_state = tui::AppState::new(controller, loader, config);

    // Run main TUI loop
    let result = tui::run_tui(&mut app_state, &mut terminal);

    // Restore terminal
    tui::restore_terminal(terminal)?;

    result.context("Interactive session failed")
}

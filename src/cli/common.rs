//! Shared plumbing for the headless commands.

use crate::config::Config;
use crate::models::CardDescriptor;
use crate::services::{AssetLoader, CardSurface, Controller};
use crate::storage::FileStore;

/// Process exit codes of the headless commands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitCode {
    /// Command succeeded (or the user declined a prompt)
    Success = 0,
    /// Bad input: unknown name, invalid option, unreadable catalog
    Validation = 1,
    /// Storage or file system failure
    Io = 2,
}

impl ExitCode {
    /// Numeric process exit code.
    #[must_use]
    pub const fn as_i32(self) -> i32 {
        self as i32
    }
}

/// Error returned by a CLI command.
#[derive(Debug, thiserror::Error)]
#[error("{message}")]
pub struct CliError {
    code: ExitCode,
    message: String,
}

impl CliError {
    /// Invalid user input.
    pub fn validation(message: impl Into<String>) -> Self {
        Self {
            code: ExitCode::Validation,
            message: message.into(),
        }
    }

    /// Storage or file system failure.
    pub fn io(message: impl Into<String>) -> Self {
        Self {
            code: ExitCode::Io,
            message: message.into(),
        }
    }

    /// Exit code for this error.
    #[must_use]
    pub const fn code(&self) -> ExitCode {
        self.code
    }
}

/// Result type of CLI commands.
pub type CliResult<T> = Result<T, CliError>;

/// Resolved configuration plus the services commands are built from.
#[derive(Debug, Clone)]
pub struct Session {
    config: Config,
}

impl Session {
    /// Wraps the effective configuration (file values with CLI overrides).
    #[must_use]
    pub fn new(config: Config) -> Self {
        Self { config }
    }

    /// Effective configuration.
    #[must_use]
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Loads the catalog and the persisted tracked set.
    pub fn controller(&self) -> CliResult<Controller<FileStore>> {
        let catalog = self
            .config
            .load_catalog()
            .map_err(|e| CliError::validation(format!("Failed to load catalog: {e:#}")))?;
        let storage_dir = self
            .config
            .storage_dir()
            .map_err(|e| CliError::io(format!("{e:#}")))?;

        Ok(Controller::new(catalog, FileStore::new(storage_dir)))
    }

    /// Loader for portrait and overlay images.
    #[must_use]
    pub fn assets(&self) -> AssetLoader {
        AssetLoader::new(self.config.assets_dir())
    }
}

/// Card surface for commands without a screen; only the stats line is kept.
#[derive(Debug, Default)]
pub struct HeadlessSurface {
    /// Latest stats line
    pub stats: String,
}

impl CardSurface for HeadlessSurface {
    fn replace_cards(&mut self, _cards: Vec<CardDescriptor>) {}

    fn apply_visibility(&mut self, _visible: &[bool]) {}

    fn set_stats(&mut self, stats: String) {
        self.stats = stats;
    }
}

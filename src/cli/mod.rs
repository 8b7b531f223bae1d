//! CLI command handlers.
//!
//! Headless, scriptable access to the tracker. Every mutating command goes
//! through the same controller as the interactive UI, so persistence and
//! stats behave identically.

pub mod bulk;
pub mod common;
pub mod config;
pub mod list;
pub mod portrait;
pub mod stats;
pub mod toggle;

use clap::Subcommand;

use crate::services::BulkAction;

// Re-export types used by main.rs and tests
pub use bulk::BulkArgs;
pub use common::{CliError, CliResult, ExitCode, HeadlessSurface, Session};
pub use config::ConfigArgs;
pub use list::ListArgs;
pub use portrait::PortraitArgs;
pub use stats::StatsArgs;
pub use toggle::ToggleArgs;

/// Headless subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// List survivors and their tracked state
    List(ListArgs),
    /// Toggle whether a survivor is tracked
    Toggle(ToggleArgs),
    /// Mark every survivor as tracked
    SelectAll(BulkArgs),
    /// Untrack every survivor
    DeselectAll(BulkArgs),
    /// Show how many survivors are tracked
    Stats(StatsArgs),
    /// Print a survivor's portrait path
    Portrait(PortraitArgs),
    /// Manage configuration
    Config(ConfigArgs),
}

impl Commands {
    /// Runs the command.
    pub fn execute(&self, session: &Session) -> CliResult<()> {
        match self {
            Self::List(args) => args.execute(session),
            Self::Toggle(args) => args.execute(session),
            Self::SelectAll(args) => args.execute(session, BulkAction::SelectAll),
            Self::DeselectAll(args) => args.execute(session, BulkAction::DeselectAll),
            Self::Stats(args) => args.execute(session),
            Self::Portrait(args) => args.execute(session),
            Self::Config(args) => args.execute(session),
        }
    }
}

//! `toggle` command: flip one survivor's tracked state.

use clap::Args;
use tracing::info;

use crate::cli::common::{CliError, CliResult, HeadlessSurface, Session};

/// Toggle whether a survivor is tracked
#[derive(Args, Debug)]
pub struct ToggleArgs {
    /// Survivor name (case-insensitive)
    #[arg(value_name = "NAME")]
    name: String,
}

impl ToggleArgs {
    /// Execute toggle command
    pub fn execute(&self, session: &Session) -> CliResult<()> {
        let mut controller = session.controller()?;
        let name = controller
            .catalog()
            .find_ignore_case(self.name.trim())
            .map(str::to_string)
            .ok_or_else(|| CliError::validation(format!("Unknown survivor: {}", self.name)))?;

        let mut surface = HeadlessSurface::default();
        let tracked = controller
            .toggle(&name, &mut surface)
            .map_err(|e| CliError::io(format!("{e:#}")))?;
        info!(name = %name, tracked, "toggled");

        if tracked {
            println!("Tracked {name}");
        } else {
            println!("Untracked {name}");
        }
        println!("{}", surface.stats);

        Ok(())
    }
}

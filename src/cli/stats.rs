//! `stats` command.

use clap::Args;
use serde::Serialize;

use crate::cli::common::{CliError, CliResult, Session};

/// Show how many survivors are tracked
#[derive(Args, Debug)]
pub struct StatsArgs {
    /// Output as JSON
    #[arg(long)]
    json: bool,
}

/// JSON-serializable stats for output
#[derive(Serialize, Debug)]
struct StatsOutput {
    tracked: usize,
    total: usize,
    text: String,
    /// Stored names that are not in the catalog
    orphans: Vec<String>,
}

impl StatsArgs {
    /// Execute stats command
    pub fn execute(&self, session: &Session) -> CliResult<()> {
        let controller = session.controller()?;
        let orphans: Vec<String> = controller
            .store()
            .orphans(controller.catalog())
            .into_iter()
            .map(str::to_string)
            .collect();

        if self.json {
            let output = StatsOutput {
                tracked: controller.tracked_count(),
                total: controller.catalog().len(),
                text: controller.stats_text(),
                orphans,
            };
            let json = serde_json::to_string_pretty(&output)
                .map_err(|e| CliError::io(format!("Failed to serialize stats to JSON: {e}")))?;
            println!("{json}");
            return Ok(());
        }

        println!("{}", controller.stats_text());
        if !orphans.is_empty() {
            println!(
                "{} stored entries are not in the catalog: {}",
                orphans.len(),
                orphans.join(", ")
            );
        }

        Ok(())
    }
}

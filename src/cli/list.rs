//! `list` command: print the cards with their tracked state.

use clap::Args;

use crate::cli::common::{CliError, CliResult, Session};
use crate::models::CardDescriptor;
use crate::services::filter::matches;

/// List survivors and their tracked state
#[derive(Args, Debug)]
pub struct ListArgs {
    /// Only show names containing TEXT (case-insensitive)
    #[arg(long, value_name = "TEXT")]
    filter: Option<String>,

    /// Only show tracked survivors
    #[arg(long, conflicts_with = "untracked")]
    tracked: bool,

    /// Only show untracked survivors
    #[arg(long)]
    untracked: bool,

    /// Output as JSON
    #[arg(long)]
    json: bool,
}

impl ListArgs {
    /// Execute list command
    pub fn execute(&self, session: &Session) -> CliResult<()> {
        let controller = session.controller()?;
        let query = self.filter.as_deref().unwrap_or("");

        let cards: Vec<CardDescriptor> = controller
            .cards()
            .into_iter()
            .filter(|card| matches(&card.name, query))
            .filter(|card| !self.tracked || card.tracked)
            .filter(|card| !self.untracked || !card.tracked)
            .collect();

        if self.json {
            let json = serde_json::to_string_pretty(&cards)
                .map_err(|e| CliError::io(format!("Failed to serialize cards to JSON: {e}")))?;
            println!("{json}");
            return Ok(());
        }

        for card in &cards {
            let mark = if card.tracked { "x" } else { " " };
            println!("[{mark}] {}", card.name);
        }
        if cards.is_empty() {
            println!("No survivors match.");
        }
        println!();
        println!("{}", controller.stats_text());

        Ok(())
    }
}

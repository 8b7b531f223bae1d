//! `select-all` and `deselect-all` commands.
//!
//! Both are destructive, so they ask for confirmation on stdin unless
//! `--yes` is given. Anything other than "y" or "yes" declines.

use clap::Args;
use std::io::{self, BufRead, Write};

use crate::cli::common::{CliError, CliResult, HeadlessSurface, Session};
use crate::services::BulkAction;

/// Options shared by the bulk commands
#[derive(Args, Debug)]
pub struct BulkArgs {
    /// Skip the confirmation prompt
    #[arg(short, long)]
    yes: bool,
}

impl BulkArgs {
    /// Execute a bulk command
    pub fn execute(&self, session: &Session, action: BulkAction) -> CliResult<()> {
        let mut controller = session.controller()?;

        if !self.yes {
            let stdin = io::stdin();
            let confirmed = prompt(action, &mut stdin.lock(), &mut io::stdout())
                .map_err(|e| CliError::io(format!("Failed to read confirmation: {e}")))?;
            if !confirmed {
                println!("Cancelled.");
                return Ok(());
            }
        }

        let mut surface = HeadlessSurface::default();
        controller
            .apply(action, &mut surface)
            .map_err(|e| CliError::io(format!("{e:#}")))?;
        println!("{}", surface.stats);

        Ok(())
    }
}

/// Shows the confirmation text and reads one answer line.
fn prompt(action: BulkAction, input: &mut impl BufRead, output: &mut impl Write) -> io::Result<bool> {
    writeln!(output, "{}", action.title())?;
    write!(output, "{} [y/N]: ", action.message())?;
    output.flush()?;

    let mut answer = String::new();
    input.read_line(&mut answer)?;
    Ok(matches!(
        answer.trim().to_lowercase().as_str(),
        "y" | "yes"
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn answer(text: &str) -> (bool, String) {
        let mut output = Vec::new();
        let confirmed = prompt(
            BulkAction::DeselectAll,
            &mut Cursor::new(text.as_bytes()),
            &mut output,
        )
        .unwrap();
        (confirmed, String::from_utf8(output).unwrap())
    }

    #[test]
    fn test_prompt_accepts_yes() {
        assert!(answer("y\n").0);
        assert!(answer("YES\n").0);
    }

    #[test]
    fn test_prompt_defaults_to_no() {
        assert!(!answer("\n").0);
        assert!(!answer("").0);
        assert!(!answer("nope\n").0);
    }

    #[test]
    fn test_prompt_shows_dialog_text() {
        let (_, shown) = answer("n\n");
        assert!(shown.starts_with("Deselect All Survivors\n"));
        assert!(shown.contains("Are you sure you want to untrack all survivors? [y/N]"));
    }
}

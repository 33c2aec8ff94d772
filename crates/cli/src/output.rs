//! Styled terminal output for previews and launch results.

use std::io::{stdout, Write};

use crossterm::queue;
use crossterm::style::{Attribute, Color, Print, ResetColor, SetAttribute, SetForegroundColor};
use launchpad_core::error::Result;
use launchpad_core::launcher::LaunchOutcome;

/// One-line summary of a launch that did not fail.
pub fn outcome_message(outcome: &LaunchOutcome) -> Option<String> {
    match outcome {
        LaunchOutcome::Interactive { terminal } => {
            Some(format!("Launched in a new window ({terminal})."))
        }
        LaunchOutcome::Background { notice } => Some(notice.clone()),
        LaunchOutcome::Failed(_) => None,
    }
}

pub fn print_preview(working_dir: &str, preview: &str) -> Result<()> {
    let mut stdout = stdout();

    queue!(
        stdout,
        SetAttribute(Attribute::Bold),
        Print("Working directory: "),
        SetAttribute(Attribute::Reset),
        Print(format!("{working_dir}\n")),
        SetAttribute(Attribute::Bold),
        Print("Command:\n"),
        SetAttribute(Attribute::Reset),
        SetForegroundColor(Color::DarkGreen),
        Print(preview),
        ResetColor,
        Print("\n"),
    )?;

    stdout.flush()?;
    Ok(())
}

/// Prints the outcome of a successful launch. A background launch is shown
/// as a warning, since its output is not visible anywhere.
pub fn print_outcome(outcome: &LaunchOutcome) -> Result<()> {
    let Some(message) = outcome_message(outcome) else {
        return Ok(());
    };

    let color = if outcome.is_interactive() {
        Color::DarkGreen
    } else {
        Color::Yellow
    };

    let mut stdout = stdout();
    queue!(
        stdout,
        SetForegroundColor(color),
        Print(message),
        ResetColor,
        Print("\n"),
    )?;

    stdout.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use launchpad_core::error::Error;
    use launchpad_core::launcher::BACKGROUND_NOTICE;

    #[test]
    fn test_outcome_message() {
        let interactive = LaunchOutcome::Interactive {
            terminal: "xterm".to_string(),
        };
        assert_eq!(
            outcome_message(&interactive),
            Some("Launched in a new window (xterm).".to_string())
        );

        let background = LaunchOutcome::Background {
            notice: BACKGROUND_NOTICE.to_string(),
        };
        assert_eq!(
            outcome_message(&background),
            Some(BACKGROUND_NOTICE.to_string())
        );

        let failed = LaunchOutcome::Failed(Error::Misc("boom".to_string()));
        assert!(outcome_message(&failed).is_none());
    }
}

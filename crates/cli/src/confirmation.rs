//! Asking the user whether to go ahead with a launch.

use std::io::{stdin, stdout, Write};

use launchpad_core::error::Result;

/// The user's answer when asked to confirm a launch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunChoice {
    Yes,
    No,
}

/// Interprets one line of input. An empty answer means yes.
pub fn parse_run_choice(input: &str) -> Option<RunChoice> {
    match input.trim().to_lowercase().as_str() {
        "" | "y" | "yes" => Some(RunChoice::Yes),
        "n" | "no" => Some(RunChoice::No),
        _ => None,
    }
}

/// Asks until the user gives a recognisable answer.
///
/// # Errors
///
/// Returns an error if reading from standard input fails. End of input
/// counts as `No`.
pub fn confirm_launch() -> Result<RunChoice> {
    loop {
        print!("Launch now? ([Y]es/[n]o): ");
        stdout().flush()?;

        let mut input = String::new();
        if stdin().read_line(&mut input)? == 0 {
            println!();
            return Ok(RunChoice::No);
        }

        if let Some(choice) = parse_run_choice(&input) {
            return Ok(choice);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_run_choice() {
        assert_eq!(parse_run_choice("\n"), Some(RunChoice::Yes));
        assert_eq!(parse_run_choice("Y"), Some(RunChoice::Yes));
        assert_eq!(parse_run_choice(" yes "), Some(RunChoice::Yes));
        assert_eq!(parse_run_choice("n\n"), Some(RunChoice::No));
        assert_eq!(parse_run_choice("NO"), Some(RunChoice::No));
        assert_eq!(parse_run_choice("maybe"), None);
    }
}

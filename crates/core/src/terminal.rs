//! Discovery of a terminal emulator that can show an interactive session.
//!
//! There is no portable way to ask for "a new visible terminal running this".
//! The probe walks a fixed priority list of known launchers, each wrapping a
//! staged script, and stops at the first one that starts.

use std::path::Path;

use log::{debug, info, warn};

use crate::execution::{SpawnRequest, Spawner};
use crate::quoting::{quote_for_display, Platform};

/// How a terminal emulator expects to be told what to run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Wrapping {
    /// `osascript` driving Terminal.app.
    AppleScript,
    /// `-e '<shell command line>'`
    ExecuteString,
    /// `-e sh -c '<shell command line>'`
    ExecuteArgv,
    /// `-- sh -c '<shell command line>'`
    DoubleDash,
    /// `sh -c '<shell command line>'`
    Direct,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TerminalCandidate {
    pub program: &'static str,
    pub wrapping: Wrapping,
}

impl TerminalCandidate {
    pub const fn new(program: &'static str, wrapping: Wrapping) -> Self {
        Self { program, wrapping }
    }

    /// Arguments that run `script` and leave a shell open afterwards so the
    /// output stays readable.
    pub fn arguments(&self, script: &Path) -> Vec<String> {
        let script = quote_for_display(&script.to_string_lossy(), Platform::Posix).into_owned();
        let hold_open = format!("sh {script}; exec sh");

        let parts: Vec<&str> = match self.wrapping {
            Wrapping::AppleScript => {
                let do_script = format!(
                    "tell application \"Terminal\" to do script \"{}\"",
                    escape_applescript(&format!("sh {script}"))
                );
                return vec![
                    "-e".to_string(),
                    "tell application \"Terminal\" to activate".to_string(),
                    "-e".to_string(),
                    do_script,
                ];
            }
            Wrapping::ExecuteString => vec!["-e", hold_open.as_str()],
            Wrapping::ExecuteArgv => vec!["-e", "sh", "-c", hold_open.as_str()],
            Wrapping::DoubleDash => vec!["--", "sh", "-c", hold_open.as_str()],
            Wrapping::Direct => vec!["sh", "-c", hold_open.as_str()],
        };

        parts.into_iter().map(String::from).collect()
    }
}

fn escape_applescript(text: &str) -> String {
    text.replace('\\', "\\\\").replace('"', "\\\"")
}

/// Known launchers in priority order.
///
/// `osascript` comes first: it attaches a window even when started from a
/// non-interactive context. Off macOS it does not resolve and is skipped
/// without starting anything.
pub const TERMINAL_CANDIDATES: &[TerminalCandidate] = &[
    TerminalCandidate::new("osascript", Wrapping::AppleScript),
    TerminalCandidate::new("x-terminal-emulator", Wrapping::ExecuteString),
    TerminalCandidate::new("gnome-terminal", Wrapping::DoubleDash),
    TerminalCandidate::new("xterm", Wrapping::ExecuteString),
    TerminalCandidate::new("konsole", Wrapping::ExecuteArgv),
    TerminalCandidate::new("xfce4-terminal", Wrapping::ExecuteString),
    TerminalCandidate::new("mate-terminal", Wrapping::ExecuteString),
    TerminalCandidate::new("lxterminal", Wrapping::ExecuteString),
    TerminalCandidate::new("alacritty", Wrapping::ExecuteArgv),
    TerminalCandidate::new("kitty", Wrapping::Direct),
    TerminalCandidate::new("terminator", Wrapping::ExecuteString),
];

#[derive(Debug, Clone)]
pub struct TerminalProbe {
    candidates: Vec<TerminalCandidate>,
}

impl Default for TerminalProbe {
    fn default() -> Self {
        Self::new(TERMINAL_CANDIDATES.to_vec())
    }
}

impl TerminalProbe {
    pub fn new(candidates: Vec<TerminalCandidate>) -> Self {
        Self { candidates }
    }

    pub fn candidates(&self) -> &[TerminalCandidate] {
        &self.candidates
    }

    /// Tries each candidate once, in order, to run `script` in a new window.
    ///
    /// Returns the program of the first candidate that started, or `None` if
    /// every candidate was skipped.
    pub fn run_script<S: Spawner + ?Sized>(
        &self,
        spawner: &S,
        script: &Path,
        working_dir: &Path,
    ) -> Option<&'static str> {
        for candidate in &self.candidates {
            let Some(program) = spawner.resolve(candidate.program) else {
                debug!("Skipping terminal `{}`: not found", candidate.program);
                continue;
            };

            let request = SpawnRequest::new(program, candidate.arguments(script), working_dir);
            match spawner.spawn_detached(&request) {
                Ok(()) => {
                    info!("Launched script in terminal `{}`", candidate.program);
                    return Some(candidate.program);
                }
                Err(e) => {
                    warn!("Terminal `{}` failed to start: {}", candidate.program, e);
                }
            }
        }

        None
    }
}

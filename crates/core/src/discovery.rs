//! Defaults for the executable and the working directory.

use std::env;
use std::path::{Path, PathBuf};

use log::debug;

use crate::config::expand_working_directory;
use crate::quoting::Platform;

/// Program name looked up on the search path.
pub const DEFAULT_EXECUTABLE: &str = "claude";

fn home_dir() -> PathBuf {
    PathBuf::from(shellexpand::tilde("~").into_owned())
}

/// Common install locations checked when the executable is not on the search path.
pub fn install_locations(platform: Platform, home: &Path) -> Vec<PathBuf> {
    match platform {
        Platform::Windows => vec![
            home.join(".local").join("bin").join("claude.exe"),
            home.join(".local").join("bin").join("claude"),
            home.join("AppData")
                .join("Local")
                .join("Programs")
                .join("claude")
                .join("claude.exe"),
            home.join("AppData")
                .join("Roaming")
                .join("npm")
                .join("claude.cmd"),
        ],
        Platform::Posix => vec![
            home.join(".local").join("bin").join("claude"),
            PathBuf::from("/usr/local/bin/claude"),
            PathBuf::from("/opt/homebrew/bin/claude"),
            home.join(".nvm").join("current").join("bin").join("claude"),
        ],
    }
}

/// Picks the first hit of `search`, then the first existing location, then
/// the bare program name so the search path is consulted again at launch.
pub fn resolve_executable(
    search: impl Fn(&str) -> Option<PathBuf>,
    locations: &[PathBuf],
) -> String {
    if let Some(path) = search(DEFAULT_EXECUTABLE) {
        return path.to_string_lossy().into_owned();
    }

    locations
        .iter()
        .find(|location| location.exists())
        .map(|location| location.to_string_lossy().into_owned())
        .unwrap_or_else(|| DEFAULT_EXECUTABLE.to_string())
}

/// Locates the external program on this machine.
pub fn find_executable() -> String {
    let executable = resolve_executable(
        |name| which::which(name).ok(),
        &install_locations(Platform::host(), &home_dir()),
    );
    debug!("Resolved executable: `{}`", executable);
    executable
}

/// Whether `path` is a filesystem root or a system directory that should
/// never be used as a default working directory.
pub fn is_reserved_dir(path: &Path, platform: Platform) -> bool {
    let path = path.to_string_lossy();
    match platform {
        Platform::Posix => path == "/",
        Platform::Windows => {
            let lower = path.to_lowercase();
            let trimmed = lower.trim_end_matches(['\\', '/']);
            let is_drive_root = trimmed.len() == 2 && trimmed.ends_with(':');
            is_drive_root || lower.contains("system32") || lower.contains("syswow64")
        }
    }
}

/// `current` unless it is reserved, in which case `home`.
pub fn safe_working_dir_from(current: &Path, platform: Platform, home: &Path) -> PathBuf {
    if is_reserved_dir(current, platform) {
        debug!(
            "Current directory `{}` is reserved, defaulting to `{}`",
            current.display(),
            home.display()
        );
        home.to_path_buf()
    } else {
        current.to_path_buf()
    }
}

/// The current directory, unless that is a root or system directory.
pub fn safe_working_dir() -> PathBuf {
    let home = home_dir();
    match env::current_dir() {
        Ok(current) => safe_working_dir_from(&current, Platform::host(), &home),
        Err(_) => home,
    }
}

/// Expands the requested working directory, falling back to
/// [`safe_working_dir`] when none or a blank one is given.
pub fn resolve_working_dir(requested: &Option<String>) -> PathBuf {
    match expand_working_directory(requested) {
        Some(directory) => PathBuf::from(directory),
        None => safe_working_dir(),
    }
}

//! Configuration path utilities for launchpad.
//!
//! This module provides functions for resolving the profile file path
//! and expanding shell variables like `~` in paths.

/// Default path for the launch profile.
pub const DEFAULT_PROFILE_PATH: &str = "~/.launchpad/profile.yml";

/// Resolves the profile file path.
///
/// If a custom path is provided, uses that path. Otherwise, uses the default
/// profile path. Shell expansions like `~` are resolved.
///
/// # Examples
///
/// ```
/// use launchpad_core::config::get_profile_path;
///
/// // Use default path
/// let default_path = get_profile_path(&None);
///
/// // Use custom path
/// let custom_path = get_profile_path(&Some("/path/to/profile.yml".to_string()));
/// assert_eq!(custom_path, "/path/to/profile.yml");
/// ```
pub fn get_profile_path(profile_path_arg: &Option<String>) -> String {
    let profile_path = match profile_path_arg {
        Some(profile_path) => profile_path,
        None => DEFAULT_PROFILE_PATH,
    };

    shellexpand::tilde(profile_path).to_string()
}

/// Expands shell variables like `~` in a working directory path.
///
/// Returns `None` if no working directory is provided or it is blank.
///
/// # Examples
///
/// ```
/// use launchpad_core::config::expand_working_directory;
///
/// let expanded = expand_working_directory(&Some("~/projects".to_string()));
/// assert!(expanded.is_some());
///
/// assert!(expand_working_directory(&None).is_none());
/// assert!(expand_working_directory(&Some("  ".to_string())).is_none());
/// ```
pub fn expand_working_directory(working_directory: &Option<String>) -> Option<String> {
    let working_directory = working_directory.as_deref()?.trim();
    if working_directory.is_empty() {
        return None;
    }

    Some(shellexpand::tilde(working_directory).to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_get_profile_path_with_custom_path() {
        let custom_path = Some("/custom/path/profile.yml".to_string());
        let result = get_profile_path(&custom_path);
        assert_eq!(result, "/custom/path/profile.yml");
    }

    #[test]
    fn test_get_profile_path_with_none() {
        let result = get_profile_path(&None);
        // Should expand the tilde in the default path
        assert!(result.ends_with("profile.yml"));
        assert!(!result.starts_with('~'));
    }

    #[test]
    fn test_get_profile_path_with_tilde() {
        let result = get_profile_path(&Some("~/my-profile.yml".to_string()));
        assert!(!result.starts_with('~'));
        assert!(result.ends_with("my-profile.yml"));
    }

    #[test]
    fn test_expand_working_directory_with_tilde() {
        let result = expand_working_directory(&Some("~/projects/launchpad".to_string()));

        let expanded = result.unwrap();
        assert!(!expanded.starts_with('~'));
        assert!(expanded.ends_with("projects/launchpad"));
    }

    #[test]
    fn test_expand_working_directory_without_tilde() {
        let result = expand_working_directory(&Some(" /absolute/path ".to_string()));
        assert_eq!(result, Some("/absolute/path".to_string()));
    }

    #[test]
    fn test_expand_working_directory_blank() {
        assert!(expand_working_directory(&Some(String::new())).is_none());
        assert!(expand_working_directory(&None).is_none());
    }
}

//! Reading and writing launch profiles.

use std::fs::{self, File};
use std::path::Path;

use log::debug;

use crate::configuration::LaunchProfile;
use crate::error::{Error, Result};

const PROFILE_DESCRIPTION: &str = "profile";

fn read_to_string(path: &str) -> Result<String> {
    fs::read_to_string(path)
        .map_err(|e| Error::io_error(PROFILE_DESCRIPTION.to_string(), path.to_string(), e))
}

/// Reads a launch profile from disk.
///
/// An empty file is treated as a profile with every option at its default.
///
/// # Errors
///
/// Returns an error if:
/// - The file does not exist or cannot be read
/// - The file contains invalid YAML
/// - The YAML doesn't match the expected structure
pub fn read_profile(path: &str) -> Result<LaunchProfile> {
    let contents = read_to_string(path)?;
    if contents.trim().is_empty() {
        debug!("Profile at `{}` is empty, using defaults", path);
        return Ok(LaunchProfile::default());
    }

    serde_yaml::from_str(&contents).map_err(|e| {
        Error::yaml_error(
            "reading".to_string(),
            PROFILE_DESCRIPTION.to_string(),
            path.to_string(),
            e,
        )
    })
}

/// Reads a launch profile, returning `None` if the file doesn't exist.
///
/// # Errors
///
/// Returns an error if the file exists but cannot be read or parsed.
pub fn get_profile(path: &str) -> Result<Option<LaunchProfile>> {
    if !Path::exists(Path::new(path)) {
        debug!("No profile at `{}`", path);
        return Ok(None);
    }

    read_profile(path).map(Some)
}

/// Writes a launch profile to disk, creating parent directories as needed.
///
/// # Errors
///
/// Returns an error if:
/// - The parent directory or the file cannot be created
/// - Serialization to YAML fails
pub fn write_profile(path: &str, profile: &LaunchProfile) -> Result<()> {
    let io_error =
        |e| Error::io_error(PROFILE_DESCRIPTION.to_string(), path.to_string(), e);

    if let Some(parent) = Path::new(path).parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent).map_err(io_error)?;
        }
    }

    let f = File::create(path).map_err(io_error)?;

    serde_yaml::to_writer(f, profile).map_err(|e| {
        Error::yaml_error(
            "writing".to_string(),
            PROFILE_DESCRIPTION.to_string(),
            path.to_string(),
            e,
        )
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::configuration::PermissionMode;
    use std::io::Write;
    use tempfile::{tempdir, NamedTempFile};

    #[test]
    fn test_get_profile_missing_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("missing.yml");
        let result = get_profile(path.to_str().unwrap()).unwrap();
        assert!(result.is_none());
    }

    #[test]
    fn test_read_profile_missing_file_is_an_error() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("missing.yml");
        let error = read_profile(path.to_str().unwrap()).unwrap_err();
        assert!(matches!(error, Error::Io { .. }));
    }

    #[test]
    fn test_read_empty_profile() {
        let file = NamedTempFile::new().unwrap();
        let profile = read_profile(file.path().to_str().unwrap()).unwrap();
        assert_eq!(profile, LaunchProfile::default());
    }

    #[test]
    fn test_read_valid_profile() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(
            file,
            "working_directory: /srv/app\nprompt: hello\npermission_mode: acceptEdits"
        )
        .unwrap();

        let profile = get_profile(file.path().to_str().unwrap())
            .unwrap()
            .unwrap();
        assert_eq!(profile.working_directory.as_deref(), Some("/srv/app"));
        assert_eq!(profile.configuration.prompt.as_deref(), Some("hello"));
        assert_eq!(
            profile.configuration.permission_mode,
            PermissionMode::AcceptEdits
        );
    }

    #[test]
    fn test_read_invalid_yaml() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "permission_mode: sometimes").unwrap();

        let error = read_profile(file.path().to_str().unwrap()).unwrap_err();
        assert!(matches!(error, Error::Yaml { .. }));
    }

    #[test]
    fn test_write_then_read_profile() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nested").join("profile.yml");
        let path = path.to_str().unwrap();

        let mut profile = LaunchProfile {
            executable: Some("/opt/claude".to_string()),
            ..Default::default()
        };
        profile.configuration.model = Some("opus".to_string());
        profile.configuration.add_dir("/extra");

        write_profile(path, &profile).unwrap();
        assert_eq!(read_profile(path).unwrap(), profile);
    }
}

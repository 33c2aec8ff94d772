//! Resolving the effective launch profile from disk and the command line.

use log::debug;

use launchpad_core::config::get_profile_path;
use launchpad_core::configuration::LaunchProfile;
use launchpad_core::error::Result;
use launchpad_core::file_handling::{get_profile, read_profile, write_profile};

use crate::cli_args::Args;

/// Loads the profile named on the command line, or the default one, and
/// merges the command-line options over it.
///
/// A missing default profile yields every option at its default. A profile
/// named explicitly must exist.
///
/// # Errors
///
/// Returns an error if the profile cannot be read or parsed.
pub fn load_profile(args: &Args) -> Result<LaunchProfile> {
    let profile_path = get_profile_path(&args.profile_path);
    debug!("Profile path: `{}`", profile_path);

    let mut profile = if args.profile_path.is_some() {
        read_profile(&profile_path)?
    } else {
        get_profile(&profile_path)?.unwrap_or_default()
    };

    args.apply_to(&mut profile);
    Ok(profile)
}

/// Writes `profile` to the path given with `--save-profile`, if any.
///
/// # Errors
///
/// Returns an error if the profile cannot be written.
pub fn save_if_requested(args: &Args, profile: &LaunchProfile) -> Result<()> {
    let Some(save_path) = &args.save_profile else {
        return Ok(());
    };

    let save_path = get_profile_path(&Some(save_path.clone()));
    write_profile(&save_path, profile)?;
    println!("Saved profile to `{save_path}`");
    Ok(())
}

//! Launching an [`Invocation`] so the user can see and interact with it.
//!
//! Two strategies exist, chosen once for the host OS:
//!
//! - [`DirectConsoleLauncher`] asks the OS for a new console window and spawns
//!   the program into it. Used where the OS offers that natively (Windows).
//! - [`ScriptedTerminalLauncher`] stages a self-deleting shell script and runs
//!   it in the first terminal emulator that starts. If none does, the program
//!   is started in the background and the script is removed by the launcher.
//!
//! Each attempt is a single pass. Nothing is retried and the child process is
//! never waited on.

use std::collections::HashMap;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use leon::Template;
use log::{debug, info, warn};

use crate::command_builder::{build, Invocation};
use crate::configuration::Configuration;
use crate::error::{Error, Result};
use crate::execution::{SpawnRequest, Spawner, SystemSpawner};
use crate::preview::render;
use crate::quoting::{quote_for_display, Platform};
use crate::terminal::TerminalProbe;

/// File name prefix of staged launch scripts.
pub const SCRIPT_PREFIX: &str = "launchpad_";

pub const BACKGROUND_NOTICE: &str = "The program was started but no terminal was found to show its output.\n\
     Run it from a terminal, or install a terminal emulator (e.g. gnome-terminal, xterm).";

const SCRIPT_TEMPLATE: &str = "#!/bin/sh
cd {working_dir} && {command}
rm -f {script}
";

/// Result of a single launch attempt.
#[derive(Debug)]
pub enum LaunchOutcome {
    /// A visible window is running the program.
    Interactive { terminal: String },
    /// The program runs without a visible terminal. `notice` must be shown
    /// to the user.
    Background { notice: String },
    Failed(Error),
}

impl LaunchOutcome {
    pub fn is_interactive(&self) -> bool {
        matches!(self, LaunchOutcome::Interactive { .. })
    }

    fn from_result(result: Result<LaunchOutcome>) -> Self {
        match result {
            Ok(outcome) => outcome,
            Err(e) => {
                warn!("Launch failed: {}", e);
                LaunchOutcome::Failed(e)
            }
        }
    }
}

pub trait Launcher {
    fn launch(&self, invocation: &Invocation, working_dir: &Path) -> LaunchOutcome;
}

/// Fails with [`Error::WorkingDirectoryInvalid`] unless `working_dir` is an
/// existing directory.
pub fn validate_working_dir(working_dir: &Path) -> Result<()> {
    if working_dir.is_dir() {
        Ok(())
    } else {
        Err(Error::working_directory_invalid(
            working_dir.display().to_string(),
        ))
    }
}

/// Spawns the program straight into a new console window.
#[derive(Debug, Default)]
pub struct DirectConsoleLauncher<S = SystemSpawner> {
    spawner: S,
}

impl<S: Spawner> DirectConsoleLauncher<S> {
    pub fn new(spawner: S) -> Self {
        Self { spawner }
    }

    fn try_launch(&self, invocation: &Invocation, working_dir: &Path) -> Result<LaunchOutcome> {
        validate_working_dir(working_dir)?;

        let request = SpawnRequest::for_invocation(invocation, working_dir).with_new_console();
        self.spawner
            .spawn_detached(&request)
            .map_err(|e| Error::from_spawn(invocation.program(), e))?;

        Ok(LaunchOutcome::Interactive {
            terminal: "console".to_string(),
        })
    }
}

impl<S: Spawner> Launcher for DirectConsoleLauncher<S> {
    fn launch(&self, invocation: &Invocation, working_dir: &Path) -> LaunchOutcome {
        LaunchOutcome::from_result(self.try_launch(invocation, working_dir))
    }
}

/// Runs the program through a staged script inside a terminal emulator.
#[derive(Debug, Default)]
pub struct ScriptedTerminalLauncher<S = SystemSpawner> {
    spawner: S,
    probe: TerminalProbe,
    staging_dir: Option<PathBuf>,
}

impl<S: Spawner> ScriptedTerminalLauncher<S> {
    pub fn new(spawner: S, probe: TerminalProbe) -> Self {
        Self {
            spawner,
            probe,
            staging_dir: None,
        }
    }

    /// Stages scripts in `directory` instead of the system temporary directory.
    pub fn with_staging_dir(mut self, directory: impl Into<PathBuf>) -> Self {
        self.staging_dir = Some(directory.into());
        self
    }

    fn try_launch(&self, invocation: &Invocation, working_dir: &Path) -> Result<LaunchOutcome> {
        validate_working_dir(working_dir)?;

        let script = stage_script(invocation, working_dir, self.staging_dir.as_deref())?;
        debug!("Staged launch script at `{}`", script.display());

        // From here on the script deletes itself once a terminal runs it.
        if let Some(terminal) = self.probe.run_script(&self.spawner, &script, working_dir) {
            return Ok(LaunchOutcome::Interactive {
                terminal: terminal.to_string(),
            });
        }

        warn!("No terminal emulator could be started, running in the background");
        let spawned = self
            .spawner
            .spawn_detached(&SpawnRequest::for_invocation(invocation, working_dir));
        remove_script(&script);
        spawned.map_err(|e| Error::from_spawn(invocation.program(), e))?;

        Ok(LaunchOutcome::Background {
            notice: BACKGROUND_NOTICE.to_string(),
        })
    }
}

impl<S: Spawner> Launcher for ScriptedTerminalLauncher<S> {
    fn launch(&self, invocation: &Invocation, working_dir: &Path) -> LaunchOutcome {
        LaunchOutcome::from_result(self.try_launch(invocation, working_dir))
    }
}

/// Renders the body of the launch script: change into `working_dir`, run the
/// invocation, then delete `script_path`.
pub fn render_script(
    invocation: &Invocation,
    working_dir: &Path,
    script_path: &Path,
) -> Result<String> {
    let template = Template::parse(SCRIPT_TEMPLATE)?;

    let mut context: HashMap<String, String> = HashMap::new();
    context.insert(
        "working_dir".to_string(),
        quote_for_display(&working_dir.to_string_lossy(), Platform::Posix).into_owned(),
    );
    context.insert("command".to_string(), render(invocation, Platform::Posix));
    context.insert(
        "script".to_string(),
        quote_for_display(&script_path.to_string_lossy(), Platform::Posix).into_owned(),
    );

    Ok(template.render(&context)?)
}

/// Writes the launch script to a fresh, uniquely named file readable,
/// writable and executable by the owner only.
///
/// Nothing is left on disk if any step fails.
///
/// # Errors
///
/// Returns [`Error::ScriptStagingFailed`] for any filesystem failure.
pub fn stage_script(
    invocation: &Invocation,
    working_dir: &Path,
    staging_dir: Option<&Path>,
) -> Result<PathBuf> {
    let mut builder = tempfile::Builder::new();
    builder.prefix(SCRIPT_PREFIX).suffix(".sh");
    let mut file = match staging_dir {
        Some(directory) => builder.tempfile_in(directory),
        None => builder.tempfile(),
    }
    .map_err(Error::ScriptStagingFailed)?;

    // Until `keep`, dropping `file` removes it from disk.
    let body = render_script(invocation, working_dir, file.path())?;
    file.write_all(body.as_bytes())
        .and_then(|()| file.flush())
        .map_err(Error::ScriptStagingFailed)?;
    restrict_to_owner(file.path()).map_err(Error::ScriptStagingFailed)?;

    let (_, path) = file.keep().map_err(|e| Error::ScriptStagingFailed(e.error))?;
    Ok(path)
}

#[cfg(unix)]
fn restrict_to_owner(path: &Path) -> std::io::Result<()> {
    use std::os::unix::fs::PermissionsExt;

    fs::set_permissions(path, fs::Permissions::from_mode(0o700))
}

#[cfg(not(unix))]
fn restrict_to_owner(_path: &Path) -> std::io::Result<()> {
    Ok(())
}

fn remove_script(script: &Path) {
    if let Err(e) = fs::remove_file(script) {
        warn!("Could not remove launch script `{}`: {}", script.display(), e);
    }
}

/// The launcher for the host OS.
pub fn host_launcher() -> Box<dyn Launcher> {
    if cfg!(windows) {
        Box::new(DirectConsoleLauncher::new(SystemSpawner))
    } else {
        Box::new(ScriptedTerminalLauncher::new(
            SystemSpawner,
            TerminalProbe::default(),
        ))
    }
}

/// Builds the invocation for `configuration` and launches it in `working_dir`
/// with the host launcher.
pub fn launch(configuration: &Configuration, executable: &str, working_dir: &Path) -> LaunchOutcome {
    let invocation = build(configuration, executable);
    info!("Launching `{}` in `{}`", invocation, working_dir.display());
    host_launcher().launch(&invocation, working_dir)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::execution::tests::FakeSpawner;
    use crate::terminal::{TerminalCandidate, Wrapping};
    use std::io;
    use tempfile::TempDir;

    fn sample_invocation() -> Invocation {
        let configuration = Configuration {
            model: Some("opus".to_string()),
            prompt: Some("it's a test".to_string()),
            ..Configuration::default()
        };
        build(&configuration, "claude")
    }

    fn staged_files(directory: &TempDir) -> Vec<PathBuf> {
        fs::read_dir(directory.path())
            .unwrap()
            .map(|entry| entry.unwrap().path())
            .collect()
    }

    fn scripted(spawner: FakeSpawner, staging: &TempDir) -> ScriptedTerminalLauncher<FakeSpawner> {
        ScriptedTerminalLauncher::new(spawner, TerminalProbe::default())
            .with_staging_dir(staging.path())
    }

    #[test]
    fn test_render_script() {
        let body = render_script(
            &sample_invocation(),
            Path::new("/home/me/my project"),
            Path::new("/tmp/launchpad_x.sh"),
        )
        .unwrap();
        assert_eq!(
            body,
            "#!/bin/sh\n\
             cd '/home/me/my project' && claude --model opus 'it'\"'\"'s a test'\n\
             rm -f /tmp/launchpad_x.sh\n"
        );
    }

    #[test]
    fn test_invalid_working_dir_spawns_nothing() {
        let staging = tempfile::tempdir().unwrap();
        let launcher = scripted(FakeSpawner::resolving(vec!["xterm"]), &staging);

        let outcome = launcher.launch(&sample_invocation(), Path::new("/does/not/exist"));

        assert!(matches!(
            outcome,
            LaunchOutcome::Failed(Error::WorkingDirectoryInvalid { .. })
        ));
        assert!(staged_files(&staging).is_empty());
        assert!(launcher.spawner.spawned.borrow().is_empty());
    }

    #[test]
    fn test_file_is_not_a_working_dir() {
        let file = tempfile::NamedTempFile::new().unwrap();
        assert!(matches!(
            validate_working_dir(file.path()),
            Err(Error::WorkingDirectoryInvalid { .. })
        ));
    }

    #[test]
    fn test_interactive_leaves_script_for_terminal() {
        let staging = tempfile::tempdir().unwrap();
        let working = tempfile::tempdir().unwrap();
        let launcher = scripted(FakeSpawner::resolving(vec!["xterm"]), &staging);

        let outcome = launcher.launch(&sample_invocation(), working.path());

        match outcome {
            LaunchOutcome::Interactive { terminal } => assert_eq!(terminal, "xterm"),
            other => panic!("Expected Interactive, got {other:?}"),
        }

        let files = staged_files(&staging);
        assert_eq!(files.len(), 1);
        let script = &files[0];
        let name = script.file_name().unwrap().to_string_lossy().into_owned();
        assert!(name.starts_with(SCRIPT_PREFIX));
        assert!(name.ends_with(".sh"));

        let body = fs::read_to_string(script).unwrap();
        assert!(body.contains("claude --model opus"));
        assert!(body.contains(&format!("rm -f {}", script.display())));

        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            let mode = fs::metadata(script).unwrap().permissions().mode();
            assert_eq!(mode & 0o777, 0o700);
        }

        let spawned = launcher.spawner.spawned.borrow();
        assert_eq!(spawned.len(), 1);
        assert!(spawned[0].args.last().unwrap().contains(&*script.to_string_lossy()));
    }

    #[test]
    fn test_background_fallback_removes_script() {
        let staging = tempfile::tempdir().unwrap();
        let working = tempfile::tempdir().unwrap();
        let launcher = scripted(FakeSpawner::default(), &staging);

        let outcome = launcher.launch(&sample_invocation(), working.path());

        match outcome {
            LaunchOutcome::Background { notice } => assert_eq!(notice, BACKGROUND_NOTICE),
            other => panic!("Expected Background, got {other:?}"),
        }
        assert_eq!(launcher.spawner.spawned_programs(), vec!["claude"]);
        let spawned = launcher.spawner.spawned.borrow();
        assert_eq!(spawned[0].args, vec!["--model", "opus", "it's a test"]);
        assert_eq!(spawned[0].current_dir, working.path());
        assert!(staged_files(&staging).is_empty());
    }

    #[test]
    fn test_background_fallback_after_every_terminal_fails() {
        let staging = tempfile::tempdir().unwrap();
        let working = tempfile::tempdir().unwrap();
        let spawner = FakeSpawner {
            resolvable: vec!["xterm", "kitty"],
            failing: vec![
                ("xterm", io::ErrorKind::PermissionDenied),
                ("kitty", io::ErrorKind::Other),
            ],
            ..FakeSpawner::default()
        };
        let launcher = scripted(spawner, &staging);

        let outcome = launcher.launch(&sample_invocation(), working.path());

        assert!(matches!(outcome, LaunchOutcome::Background { .. }));
        assert!(staged_files(&staging).is_empty());
    }

    #[test]
    fn test_background_missing_executable_still_cleans_up() {
        let staging = tempfile::tempdir().unwrap();
        let working = tempfile::tempdir().unwrap();
        let spawner = FakeSpawner {
            failing: vec![("claude", io::ErrorKind::NotFound)],
            ..FakeSpawner::default()
        };
        let launcher = scripted(spawner, &staging);

        let outcome = launcher.launch(&sample_invocation(), working.path());

        assert!(matches!(
            outcome,
            LaunchOutcome::Failed(Error::ExecutableNotFound { .. })
        ));
        assert!(staged_files(&staging).is_empty());
    }

    #[test]
    fn test_staging_failure_is_reported() {
        let staging = tempfile::tempdir().unwrap();
        let working = tempfile::tempdir().unwrap();
        let missing = staging.path().join("missing");
        let launcher = ScriptedTerminalLauncher::new(
            FakeSpawner::resolving(vec!["xterm"]),
            TerminalProbe::default(),
        )
        .with_staging_dir(&missing);

        let outcome = launcher.launch(&sample_invocation(), working.path());

        assert!(matches!(
            outcome,
            LaunchOutcome::Failed(Error::ScriptStagingFailed(_))
        ));
        assert!(launcher.spawner.spawned.borrow().is_empty());
        assert!(staged_files(&staging).is_empty());
    }

    #[test]
    fn test_custom_probe_order() {
        let staging = tempfile::tempdir().unwrap();
        let working = tempfile::tempdir().unwrap();
        let probe = TerminalProbe::new(vec![
            TerminalCandidate::new("kitty", Wrapping::Direct),
            TerminalCandidate::new("xterm", Wrapping::ExecuteString),
        ]);
        let launcher =
            ScriptedTerminalLauncher::new(FakeSpawner::resolving(vec!["xterm", "kitty"]), probe)
                .with_staging_dir(staging.path());

        let outcome = launcher.launch(&sample_invocation(), working.path());

        assert!(matches!(outcome, LaunchOutcome::Interactive { ref terminal } if terminal == "kitty"));
    }

    #[test]
    fn test_direct_console_spawns_with_new_console() {
        let working = tempfile::tempdir().unwrap();
        let launcher = DirectConsoleLauncher::new(FakeSpawner::default());

        let outcome = launcher.launch(&sample_invocation(), working.path());

        assert!(outcome.is_interactive());
        let spawned = launcher.spawner.spawned.borrow();
        assert_eq!(spawned.len(), 1);
        assert!(spawned[0].new_console);
        assert_eq!(spawned[0].program, PathBuf::from("claude"));
    }

    #[test]
    fn test_direct_console_missing_executable() {
        let working = tempfile::tempdir().unwrap();
        let launcher = DirectConsoleLauncher::new(FakeSpawner {
            failing: vec![("claude", io::ErrorKind::NotFound)],
            ..FakeSpawner::default()
        });

        let outcome = launcher.launch(&sample_invocation(), working.path());

        assert!(matches!(
            outcome,
            LaunchOutcome::Failed(Error::ExecutableNotFound { ref program }) if program == "claude"
        ));
    }

    #[test]
    fn test_direct_console_other_failure() {
        let working = tempfile::tempdir().unwrap();
        let launcher = DirectConsoleLauncher::new(FakeSpawner {
            failing: vec![("claude", io::ErrorKind::PermissionDenied)],
            ..FakeSpawner::default()
        });

        let outcome = launcher.launch(&sample_invocation(), working.path());

        assert!(matches!(outcome, LaunchOutcome::Failed(Error::LaunchFailed(_))));
    }

    #[test]
    fn test_direct_console_invalid_working_dir() {
        let launcher = DirectConsoleLauncher::new(FakeSpawner::default());
        let outcome = launcher.launch(&sample_invocation(), Path::new("/does/not/exist"));
        assert!(matches!(
            outcome,
            LaunchOutcome::Failed(Error::WorkingDirectoryInvalid { .. })
        ));
        assert!(launcher.spawner.spawned.borrow().is_empty());
    }

    #[test]
    fn test_launch_checks_working_dir_first() {
        let outcome = launch(
            &Configuration::default(),
            "claude",
            Path::new("/does/not/exist"),
        );
        assert!(matches!(
            outcome,
            LaunchOutcome::Failed(Error::WorkingDirectoryInvalid { .. })
        ));
    }
}

//! The process-creation boundary.
//!
//! Launchers never create processes themselves; they describe a
//! [`SpawnRequest`] and hand it to a [`Spawner`]. [`SystemSpawner`] is the
//! real implementation, tests substitute a recording fake.

use std::io;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

use log::{debug, info};

use crate::command_builder::Invocation;

/// `CREATE_NEW_CONSOLE` from the Win32 process creation flags.
#[cfg(windows)]
const CREATE_NEW_CONSOLE: u32 = 0x0000_0010;

/// A single detached process to start.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpawnRequest {
    pub program: PathBuf,
    pub args: Vec<String>,
    pub current_dir: PathBuf,
    /// Ask the OS for a new, visible console window for the child.
    pub new_console: bool,
}

impl SpawnRequest {
    pub fn new(program: impl Into<PathBuf>, args: Vec<String>, current_dir: &Path) -> Self {
        Self {
            program: program.into(),
            args,
            current_dir: current_dir.to_path_buf(),
            new_console: false,
        }
    }

    /// Runs `invocation` directly, with raw arguments and no shell in between.
    pub fn for_invocation(invocation: &Invocation, current_dir: &Path) -> Self {
        Self::new(invocation.program(), invocation.args().to_vec(), current_dir)
    }

    pub fn with_new_console(mut self) -> Self {
        self.new_console = true;
        self
    }
}

pub trait Spawner {
    /// Looks `program` up on the search path.
    fn resolve(&self, program: &str) -> Option<PathBuf>;

    /// Starts the process and returns as soon as it is running. The child is
    /// never waited on.
    ///
    /// # Errors
    ///
    /// Returns the OS error if the process could not be created.
    fn spawn_detached(&self, request: &SpawnRequest) -> io::Result<()>;
}

/// Creates real processes through [`std::process::Command`].
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemSpawner;

impl Spawner for SystemSpawner {
    fn resolve(&self, program: &str) -> Option<PathBuf> {
        match which::which(program) {
            Ok(path) => Some(path),
            Err(e) => {
                debug!("`{}` is not on the search path: {}", program, e);
                None
            }
        }
    }

    fn spawn_detached(&self, request: &SpawnRequest) -> io::Result<()> {
        let mut command = Command::new(&request.program);
        command.args(&request.args).current_dir(&request.current_dir);

        if request.new_console {
            // The new console supplies the child's standard streams.
            set_new_console(&mut command);
        } else {
            command
                .stdin(Stdio::null())
                .stdout(Stdio::null())
                .stderr(Stdio::null());
            detach_from_session(&mut command);
        }

        let child = command.spawn()?;
        info!(
            "Started `{}` as process {}",
            request.program.display(),
            child.id()
        );

        Ok(())
    }
}

#[cfg(unix)]
fn detach_from_session(command: &mut Command) {
    use std::os::unix::process::CommandExt;

    command.process_group(0);
}

#[cfg(not(unix))]
fn detach_from_session(_command: &mut Command) {}

#[cfg(windows)]
fn set_new_console(command: &mut Command) {
    use std::os::windows::process::CommandExt;

    command.creation_flags(CREATE_NEW_CONSOLE);
}

#[cfg(not(windows))]
fn set_new_console(_command: &mut Command) {}

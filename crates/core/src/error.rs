use leon::{ParseError, RenderError};
use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Working directory does not exist or is not a directory: `{}`", .path)]
    WorkingDirectoryInvalid { path: String },

    #[error(
        "Could not find `{}`. Make sure it is installed and in your PATH.\n\
         You can install it with: npm install -g @anthropic-ai/claude-code",
        .program
    )]
    ExecutableNotFound { program: String },

    #[error("Could not stage the launch script: {}", .0)]
    ScriptStagingFailed(std::io::Error),

    #[error("Failed to launch: {}", .0)]
    LaunchFailed(String),

    #[error("Error {} {} file at `{}`: {}", .action, .file_description, .path, .original)]
    Yaml {
        action: String,
        file_description: String,
        path: String,
        original: serde_yaml::Error,
    },

    #[error("IO error with {} file at path `{}`: {}", .file_description, .path, .original)]
    Io {
        file_description: String,
        path: String,
        original: std::io::Error,
    },

    #[error("Error parsing launch script template: {}", .0)]
    Parse(#[from] ParseError),

    #[error("Error rendering launch script template: {}", .0)]
    Render(#[from] RenderError),

    #[error("Misc error: {}", .0)]
    Misc(String),

    #[error("STDIO error: {}", .0)]
    Stdio(#[from] std::io::Error),
}

impl Error {
    pub fn working_directory_invalid(path: String) -> Self {
        Self::WorkingDirectoryInvalid { path }
    }

    pub fn executable_not_found(program: String) -> Self {
        Self::ExecutableNotFound { program }
    }

    pub fn yaml_error(
        action: String,
        file_description: String,
        path: String,
        original: serde_yaml::Error,
    ) -> Self {
        Self::Yaml {
            action,
            file_description,
            path,
            original,
        }
    }

    pub fn io_error(file_description: String, path: String, original: std::io::Error) -> Self {
        Self::Io {
            file_description,
            path,
            original,
        }
    }

    /// Maps a process-creation failure for `program` onto the launch taxonomy.
    pub fn from_spawn(program: &str, original: std::io::Error) -> Self {
        if original.kind() == std::io::ErrorKind::NotFound {
            Self::executable_not_found(program.to_string())
        } else {
            Self::LaunchFailed(original.to_string())
        }
    }
}

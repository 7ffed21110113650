//! Errors raised while making sure a project's dependencies are installed.
//!
//! A non-zero exit from the install command is not an error by itself: it is
//! reported as [`crate::bootstrap::InstallOutcome::Failed`] and only turned into
//! [`BootstrapError::InstallFailed`] when the launcher decides to abort.

use common::ErrorLocation;

use std::io::Error as IoError;
use std::panic::Location;
use std::path::PathBuf;

use thiserror::Error as ThisError;

#[derive(Debug, ThisError)]
pub enum BootstrapError {
    #[error("Install Launch Error: {project}: {command} in {dir}: {source} {location}")]
    Launch {
        project: String,
        command: String,
        dir: PathBuf,
        location: ErrorLocation,
        #[source]
        source: IoError,
    },

    #[error("Install Failed Error: {project}: {command} exited with {code} {location}")]
    InstallFailed {
        project: String,
        command: String,
        code: ExitCode,
        location: ErrorLocation,
    },

    #[error("Project Directory Error: {project}: {dir} does not exist {location}")]
    MissingProjectDir {
        project: String,
        dir: PathBuf,
        location: ErrorLocation,
    },
}

/// Exit code of an install command; `None` when the process was killed by a signal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExitCode(pub Option<i32>);

impl std::fmt::Display for ExitCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.0 {
            Some(code) => write!(f, "code {code}"),
            None => write!(f, "no code (terminated by signal)"),
        }
    }
}

impl BootstrapError {
    #[track_caller]
    pub fn install_failed(
        project: impl Into<String>,
        command: impl Into<String>,
        code: Option<i32>,
    ) -> Self {
        BootstrapError::InstallFailed {
            project: project.into(),
            command: command.into(),
            code: ExitCode(code),
            location: ErrorLocation::from(Location::caller()),
        }
    }

    #[track_caller]
    pub fn missing_project_dir(project: impl Into<String>, dir: impl Into<PathBuf>) -> Self {
        BootstrapError::MissingProjectDir {
            project: project.into(),
            dir: dir.into(),
            location: ErrorLocation::from(Location::caller()),
        }
    }

    /// Name of the project the error belongs to.
    pub fn project(&self) -> &str {
        match self {
            BootstrapError::Launch { project, .. } => project,
            BootstrapError::InstallFailed { project, .. } => project,
            BootstrapError::MissingProjectDir { project, .. } => project,
        }
    }
}

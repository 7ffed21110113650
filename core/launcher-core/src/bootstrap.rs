//! Dependency bootstrap for the backend and frontend projects.
//!
//! A project counts as installed when its marker directory (`node_modules` by
//! default) exists. Otherwise its install command runs to completion in the
//! project directory before anything is started.

use crate::config::{CommandLine, ServiceConfig};
use crate::error::bootstrap::BootstrapError;
use crate::shell::build_command;

use common::ErrorLocation;

use std::panic::Location;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use log::{debug, info, warn};
use tokio::process::Command as TokioCommand;

/// A sibling project resolved against the launcher root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Project {
    pub name: String,
    pub dir: PathBuf,
    pub marker: PathBuf,
    pub install: CommandLine,
    pub run: CommandLine,
}

impl Project {
    pub fn from_config(service: &ServiceConfig, root: &Path) -> Self {
        let dir = root.join(&service.dir);
        Self {
            name: service.name.clone(),
            marker: dir.join(&service.marker),
            dir,
            install: service.install.clone(),
            run: service.run.clone(),
        }
    }

    pub fn is_installed(&self) -> bool {
        self.marker.is_dir()
    }
}

/// How an install command finished.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InstallReport {
    pub success: bool,
    pub code: Option<i32>,
}

/// Runs a project's install command.
#[async_trait]
pub trait Installer: Send + Sync {
    /// Run `project.install` in `project.dir` and wait for it to exit.
    async fn install(&self, project: &Project) -> Result<InstallReport, BootstrapError>;
}

/// Runs the install command as a child process with inherited stdio.
#[derive(Debug, Clone, Copy, Default)]
pub struct ShellInstaller;

#[async_trait]
impl Installer for ShellInstaller {
    async fn install(&self, project: &Project) -> Result<InstallReport, BootstrapError> {
        debug!(
            "Running '{}' in {}",
            project.install,
            project.dir.display()
        );

        let status = TokioCommand::from(build_command(&project.install, &project.dir))
            .status()
            .await
            .map_err(|e| BootstrapError::Launch {
                project: project.name.clone(),
                command: project.install.to_string(),
                dir: project.dir.clone(),
                location: ErrorLocation::from(Location::caller()),
                source: e,
            })?;

        Ok(InstallReport {
            success: status.success(),
            code: status.code(),
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InstallOutcome {
    /// Marker present, installer not invoked.
    Skipped,
    Installed,
    Failed { code: Option<i32> },
}

/// Install `project`'s dependencies unless its marker directory exists.
///
/// The installer is called at most once. A non-zero exit is returned as
/// [`InstallOutcome::Failed`]; deciding whether that aborts startup is left to
/// the caller.
///
/// # Errors
///
/// - [`BootstrapError::MissingProjectDir`] when the project directory is absent
/// - [`BootstrapError::Launch`] when the install command cannot be started
pub async fn ensure_dependencies(
    project: &Project,
    installer: &dyn Installer,
) -> Result<InstallOutcome, BootstrapError> {
    if project.is_installed() {
        debug!(
            "{} dependencies present ({})",
            project.name,
            project.marker.display()
        );
        return Ok(InstallOutcome::Skipped);
    }

    if !project.dir.is_dir() {
        return Err(BootstrapError::missing_project_dir(
            &project.name,
            &project.dir,
        ));
    }

    info!(
        "Installing {} dependencies with '{}'",
        project.name, project.install
    );

    let report = installer.install(project).await?;

    if report.success {
        info!("{} dependencies installed", project.name);
        Ok(InstallOutcome::Installed)
    } else {
        warn!(
            "'{}' for {} exited unsuccessfully (code {:?})",
            project.install, project.name, report.code
        );
        Ok(InstallOutcome::Failed { code: report.code })
    }
}

/// Apply the launcher's policy to an install outcome.
///
/// With `continue_on_failure` unset a failed install aborts startup; otherwise
/// the failure is logged and startup proceeds.
pub fn enforce(
    project: &Project,
    outcome: InstallOutcome,
    continue_on_failure: bool,
) -> Result<(), BootstrapError> {
    match outcome {
        InstallOutcome::Failed { code } if !continue_on_failure => Err(
            BootstrapError::install_failed(&project.name, project.install.to_string(), code),
        ),
        InstallOutcome::Failed { code } => {
            warn!(
                "Continuing although {} dependencies failed to install (code {code:?})",
                project.name
            );
            Ok(())
        }
        InstallOutcome::Skipped | InstallOutcome::Installed => Ok(()),
    }
}

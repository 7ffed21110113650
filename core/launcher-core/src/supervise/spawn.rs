use crate::bootstrap::Project;
use crate::error::spawn::SpawnError;
use crate::shell::build_command;

use common::ErrorLocation;

use std::panic::Location;

use log::{debug, info, trace};
use sysinfo::{Pid, Process, ProcessesToUpdate, Signal, System};
use tokio::process::Child as TokioChild;
use tokio::process::Command as TokioCommand;

/// A running child process owned by the launcher.
pub trait ManagedChild: Send {
    fn id(&self) -> Option<u32>;

    /// Send a single termination request without waiting for the child to exit.
    fn terminate(&mut self) -> Result<(), SpawnError>;
}

/// Starts a project's run command.
pub trait ProcessSpawner {
    /// Start `project.run` in `project.dir` and return immediately.
    fn spawn(&self, project: &Project) -> Result<Box<dyn ManagedChild>, SpawnError>;
}

/// Spawns projects as tokio child processes sharing the launcher's console.
#[derive(Debug, Clone, Copy, Default)]
pub struct ShellSpawner;

pub(crate) fn build_spawn_command(project: &Project) -> TokioCommand {
    TokioCommand::from(build_command(&project.run, &project.dir))
}

impl ProcessSpawner for ShellSpawner {
    fn spawn(&self, project: &Project) -> Result<Box<dyn ManagedChild>, SpawnError> {
        Ok(Box::new(OsChild::spawn(project)?))
    }
}

/// A real OS process.
pub struct OsChild {
    service: String,
    pub(crate) child: TokioChild,
}

impl OsChild {
    /// Start `project.run` in `project.dir`.
    pub fn spawn(project: &Project) -> Result<Self, SpawnError> {
        debug!(
            "Spawning '{}' in {}",
            project.run,
            project.dir.display()
        );

        let child = build_spawn_command(project)
            .spawn()
            .map_err(|e| SpawnError::Spawn {
                service: project.name.clone(),
                message: format!("Failed to spawn '{}': {e}", project.run),
                location: ErrorLocation::from(Location::caller()),
                source: Box::new(e),
            })?;

        info!("Spawned {} (PID: {:?})", project.name, child.id());

        Ok(Self {
            service: project.name.clone(),
            child,
        })
    }
}

impl ManagedChild for OsChild {
    fn id(&self) -> Option<u32> {
        self.child.id()
    }

    /// SIGTERM where the platform has it, the platform kill otherwise.
    fn terminate(&mut self) -> Result<(), SpawnError> {
        let Some(pid) = self.child.id() else {
            debug!("{} already exited, nothing to terminate", self.service);
            return Ok(());
        };

        match with_process(pid, |p| p.kill_with(Signal::Term)) {
            Some(Some(true)) => {
                debug!("Sent SIGTERM to {} (PID {pid})", self.service);
                Ok(())
            }
            Some(Some(false)) => Err(SpawnError::Terminate {
                service: self.service.clone(),
                message: format!("SIGTERM to PID {pid} was not delivered"),
                location: ErrorLocation::from(Location::caller()),
            }),
            Some(None) => {
                trace!("SIGTERM unsupported on this platform, using kill for PID {pid}");
                self.child.start_kill().map_err(|e| SpawnError::Terminate {
                    service: self.service.clone(),
                    message: format!("Failed to kill PID {pid}: {e}"),
                    location: ErrorLocation::from(Location::caller()),
                })
            }
            None => {
                debug!("{} (PID {pid}) not found, assuming it exited", self.service);
                Ok(())
            }
        }
    }
}

/// Run `f` against the live process with `pid`, if there is one.
pub(crate) fn with_process<F, R>(pid: u32, f: F) -> Option<R>
where
    F: FnOnce(&Process) -> R,
{
    let pid = Pid::from_u32(pid);
    let mut sys = System::new();
    sys.refresh_processes(ProcessesToUpdate::Some(&[pid]), true);

    sys.process(pid).map(f)
}

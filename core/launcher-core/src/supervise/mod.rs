//! Process supervision: start the servers, wait for the interrupt, stop them.
//!
//! Every child is owned by a [`ServiceHandle`]. A handle sends at most one
//! termination request over its lifetime, and a handle dropped without having
//! been terminated sends it on drop. That covers the early-return and panic
//! paths as well as the normal interrupt. Nothing checks whether a child is
//! still alive in between.

pub mod spawn;

pub use spawn::{ManagedChild, OsChild, ProcessSpawner, ShellSpawner};

use crate::bootstrap::Project;
use crate::error::spawn::SpawnError;

use std::future::Future;
use std::time::Duration;

use log::{debug, info, warn};
use tokio::time::sleep;

pub struct ServiceHandle {
    name: String,
    child: Box<dyn ManagedChild>,
    terminated: bool,
}

impl ServiceHandle {
    pub fn new(name: impl Into<String>, child: Box<dyn ManagedChild>) -> Self {
        Self {
            name: name.into(),
            child,
            terminated: false,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn id(&self) -> Option<u32> {
        self.child.id()
    }

    pub fn is_terminated(&self) -> bool {
        self.terminated
    }

    /// Request termination. Later calls are no-ops.
    pub fn terminate(&mut self) -> Result<(), SpawnError> {
        if self.terminated {
            return Ok(());
        }
        self.terminated = true;
        self.child.terminate()
    }
}

impl Drop for ServiceHandle {
    fn drop(&mut self) {
        if self.terminated {
            return;
        }
        debug!("Releasing {} on drop", self.name);
        if let Err(e) = self.terminate() {
            warn!("Failed to release {}: {e}", self.name);
        }
    }
}

/// Result of stopping every service.
#[derive(Debug)]
pub struct ShutdownReport {
    pub results: Vec<(String, Result<(), SpawnError>)>,
}

impl ShutdownReport {
    pub fn failures(&self) -> impl Iterator<Item = (&str, &SpawnError)> {
        self.results
            .iter()
            .filter_map(|(name, result)| result.as_ref().err().map(|e| (name.as_str(), e)))
    }

    /// Shutdown is best-effort: the launcher exits cleanly even when a
    /// termination request failed.
    pub fn exit_code(&self) -> i32 {
        0
    }
}

pub struct Supervisor {
    handles: Vec<ServiceHandle>,
    tick: Duration,
}

impl Supervisor {
    pub fn new(tick: Duration) -> Self {
        Self {
            handles: Vec::new(),
            tick,
        }
    }

    pub fn handles(&self) -> &[ServiceHandle] {
        &self.handles
    }

    /// Spawn `project` and take ownership of its handle.
    pub fn start(
        &mut self,
        spawner: &dyn ProcessSpawner,
        project: &Project,
    ) -> Result<(), SpawnError> {
        let child = spawner.spawn(project)?;
        self.handles.push(ServiceHandle::new(&project.name, child));
        Ok(())
    }

    /// Sleep in fixed ticks until `shutdown` resolves, then terminate every service.
    ///
    /// The children are not watched while waiting; one that exits early stays
    /// unnoticed until shutdown.
    pub async fn run_until<F>(self, shutdown: F) -> ShutdownReport
    where
        F: Future<Output = ()>,
    {
        tokio::pin!(shutdown);

        loop {
            tokio::select! {
                biased;
                () = &mut shutdown => {
                    info!("Shutdown requested");
                    break;
                }
                () = sleep(self.tick) => {}
            }
        }

        self.shutdown()
    }

    /// Send one termination request to every service, in start order.
    pub fn shutdown(mut self) -> ShutdownReport {
        let results = self
            .handles
            .iter_mut()
            .map(|handle| {
                let result = handle.terminate();
                match &result {
                    Ok(()) => info!("Stopped {}", handle.name()),
                    Err(e) => warn!("Failed to stop {}: {e}", handle.name()),
                }
                (handle.name().to_string(), result)
            })
            .collect();

        ShutdownReport { results }
    }
}

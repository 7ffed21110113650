#![allow(dead_code)]

// Test doubles shared by the integration tests.
//
// Every double writes into one `Recorder` so tests can assert on the order
// installs, spawns and terminations happened in.

use launcher_core::bootstrap::{InstallReport, Installer, Project};
use launcher_core::discovery::AddressSource;
use launcher_core::error::bootstrap::BootstrapError;
use launcher_core::error::discovery::DiscoveryError;
use launcher_core::error::spawn::SpawnError;
use launcher_core::supervise::{ManagedChild, ProcessSpawner};

use common::ErrorLocation;

use std::net::Ipv4Addr;
use std::path::PathBuf;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    Install { project: String, dir: PathBuf },
    Spawn { project: String, dir: PathBuf },
    Terminate { project: String },
}

#[derive(Debug, Clone, Default)]
pub struct Recorder(Arc<Mutex<Vec<Event>>>);

impl Recorder {
    pub fn push(&self, event: Event) {
        self.0.lock().unwrap().push(event);
    }

    pub fn events(&self) -> Vec<Event> {
        self.0.lock().unwrap().clone()
    }

    pub fn installs(&self) -> Vec<Event> {
        self.events()
            .into_iter()
            .filter(|e| matches!(e, Event::Install { .. }))
            .collect()
    }

    pub fn spawns(&self) -> Vec<Event> {
        self.events()
            .into_iter()
            .filter(|e| matches!(e, Event::Spawn { .. }))
            .collect()
    }

    pub fn terminations(&self, project: &str) -> usize {
        self.events()
            .iter()
            .filter(|e| matches!(e, Event::Terminate { project: p } if p == project))
            .count()
    }
}

// ----------------------------------------------------------------------------
// Discovery
// ----------------------------------------------------------------------------

pub struct FixedSource(pub Vec<Ipv4Addr>);

impl AddressSource for FixedSource {
    fn name(&self) -> &str {
        "fixed"
    }

    fn addresses(&self) -> Result<Vec<Ipv4Addr>, DiscoveryError> {
        Ok(self.0.clone())
    }
}

pub struct FailingSource;

impl AddressSource for FailingSource {
    fn name(&self) -> &str {
        "failing"
    }

    fn addresses(&self) -> Result<Vec<Ipv4Addr>, DiscoveryError> {
        Err(DiscoveryError::Hostname {
            message: String::from("no host name"),
            location: ErrorLocation::caller(),
        })
    }
}

pub fn sources(ips: &[[u8; 4]]) -> Vec<Box<dyn AddressSource>> {
    vec![Box::new(FixedSource(
        ips.iter().map(|o| Ipv4Addr::from(*o)).collect(),
    ))]
}

// ----------------------------------------------------------------------------
// Bootstrap
// ----------------------------------------------------------------------------

pub struct RecordingInstaller {
    pub recorder: Recorder,
    pub exit_code: i32,
}

impl RecordingInstaller {
    pub fn succeeding(recorder: &Recorder) -> Self {
        Self {
            recorder: recorder.clone(),
            exit_code: 0,
        }
    }

    pub fn failing(recorder: &Recorder, exit_code: i32) -> Self {
        Self {
            recorder: recorder.clone(),
            exit_code,
        }
    }
}

#[async_trait]
impl Installer for RecordingInstaller {
    async fn install(&self, project: &Project) -> Result<InstallReport, BootstrapError> {
        self.recorder.push(Event::Install {
            project: project.name.clone(),
            dir: project.dir.clone(),
        });
        Ok(InstallReport {
            success: self.exit_code == 0,
            code: Some(self.exit_code),
        })
    }
}

// ----------------------------------------------------------------------------
// Supervision
// ----------------------------------------------------------------------------

pub struct MockChild {
    pub project: String,
    pub recorder: Recorder,
    pub fail_terminate: bool,
}

impl ManagedChild for MockChild {
    fn id(&self) -> Option<u32> {
        Some(4242)
    }

    fn terminate(&mut self) -> Result<(), SpawnError> {
        self.recorder.push(Event::Terminate {
            project: self.project.clone(),
        });
        if self.fail_terminate {
            return Err(SpawnError::Terminate {
                service: self.project.clone(),
                message: String::from("refused"),
                location: ErrorLocation::caller(),
            });
        }
        Ok(())
    }
}

pub struct RecordingSpawner {
    pub recorder: Recorder,
    /// Name of a project whose spawn fails.
    pub fail_on: Option<String>,
}

impl RecordingSpawner {
    pub fn new(recorder: &Recorder) -> Self {
        Self {
            recorder: recorder.clone(),
            fail_on: None,
        }
    }

    pub fn failing_on(recorder: &Recorder, project: &str) -> Self {
        Self {
            recorder: recorder.clone(),
            fail_on: Some(project.to_string()),
        }
    }

    pub fn child(&self, project: &str) -> MockChild {
        MockChild {
            project: project.to_string(),
            recorder: self.recorder.clone(),
            fail_terminate: false,
        }
    }
}

impl ProcessSpawner for RecordingSpawner {
    fn spawn(&self, project: &Project) -> Result<Box<dyn ManagedChild>, SpawnError> {
        if self.fail_on.as_deref() == Some(project.name.as_str()) {
            return Err(SpawnError::Spawn {
                service: project.name.clone(),
                message: String::from("command not found"),
                location: ErrorLocation::caller(),
                source: Box::new(std::io::Error::from(std::io::ErrorKind::NotFound)),
            });
        }

        self.recorder.push(Event::Spawn {
            project: project.name.clone(),
            dir: project.dir.clone(),
        });
        Ok(Box::new(self.child(&project.name)))
    }
}

// ----------------------------------------------------------------------------
// Filesystem
// ----------------------------------------------------------------------------

/// A launcher root with `server/` and `client/`, optionally with `node_modules`.
pub fn project_root(backend_installed: bool, frontend_installed: bool) -> tempfile::TempDir {
    let root = tempfile::tempdir().unwrap();
    let server = root.path().join("server");
    let client = root.path().join("client");
    std::fs::create_dir_all(&server).unwrap();
    std::fs::create_dir_all(&client).unwrap();
    if backend_installed {
        std::fs::create_dir_all(server.join("node_modules")).unwrap();
    }
    if frontend_installed {
        std::fs::create_dir_all(client.join("node_modules")).unwrap();
    }
    root
}

//! The launch sequence: discover, announce, bootstrap, start, wait, stop.

use crate::banner::Banner;
use crate::bootstrap::{Installer, Project, ShellInstaller, enforce, ensure_dependencies};
use crate::config::LauncherConfig;
use crate::discovery::{AddressSource, default_sources, discover_with};
use crate::error::CoreError;
use crate::supervise::{ProcessSpawner, ShellSpawner, Supervisor};

use common::ErrorLocation;

use std::future::Future;
use std::io::Write;
use std::net::Ipv4Addr;
use std::panic::Location;
use std::path::{Path, PathBuf};

use log::{info, warn};

pub struct Launcher {
    config: LauncherConfig,
    root: PathBuf,
    sources: Vec<Box<dyn AddressSource>>,
    installer: Box<dyn Installer>,
    spawner: Box<dyn ProcessSpawner>,
}

impl Launcher {
    /// A launcher using the built-in discovery strategies, `npm install` and
    /// real child processes.
    pub fn new(config: LauncherConfig, root: impl Into<PathBuf>) -> Self {
        Self {
            config,
            root: root.into(),
            sources: default_sources(),
            installer: Box::new(ShellInstaller),
            spawner: Box::new(ShellSpawner),
        }
    }

    pub fn with_sources(mut self, sources: Vec<Box<dyn AddressSource>>) -> Self {
        self.sources = sources;
        self
    }

    pub fn with_installer(mut self, installer: impl Installer + 'static) -> Self {
        self.installer = Box::new(installer);
        self
    }

    pub fn with_spawner(mut self, spawner: impl ProcessSpawner + 'static) -> Self {
        self.spawner = Box::new(spawner);
        self
    }

    pub fn config(&self) -> &LauncherConfig {
        &self.config
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Backend then frontend, resolved against the root.
    pub fn projects(&self) -> Vec<Project> {
        self.config
            .services()
            .into_iter()
            .map(|service| Project::from_config(service, &self.root))
            .collect()
    }

    /// Discover LAN addresses and print the banner.
    pub fn announce<W: Write>(&self, out: &mut W) -> Result<Vec<Ipv4Addr>, CoreError> {
        let ips = discover_with(&self.sources);
        let banner = Banner::new(&self.config.title, &ips, &self.config.network);

        write_console(out, &banner.render())?;
        info!("Recommended URL: {}", banner.recommended_url());

        Ok(ips)
    }

    /// Install missing dependencies for every project, in order.
    pub async fn bootstrap<W: Write>(&self, out: &mut W) -> Result<(), CoreError> {
        let continue_on_failure = self.config.bootstrap.continue_on_failure;

        for project in self.projects() {
            if !project.is_installed() {
                write_console(out, &format!("Installing {} dependencies...\n", project.name))?;
            }
            let outcome = ensure_dependencies(&project, self.installer.as_ref()).await?;
            enforce(&project, outcome, continue_on_failure)?;
        }

        Ok(())
    }

    /// Spawn every project. Services started before a failure are released
    /// when the returned error drops the partially built supervisor.
    pub fn start<W: Write>(&self, out: &mut W) -> Result<Supervisor, CoreError> {
        let mut supervisor = Supervisor::new(self.config.supervisor.tick);

        for project in self.projects() {
            write_console(out, &format!("Starting {}...\n", project.name))?;
            supervisor.start(self.spawner.as_ref(), &project)?;
        }

        write_console(
            out,
            "\nBoth servers are running!\nKeep this window open to maintain the connection.\n",
        )?;

        Ok(supervisor)
    }

    /// Run the whole sequence and wait for `shutdown`.
    ///
    /// Returns the process exit code: 0 after an interrupt-driven shutdown.
    pub async fn run<W, F>(self, out: &mut W, shutdown: F) -> Result<i32, CoreError>
    where
        W: Write,
        F: Future<Output = ()>,
    {
        self.announce(out)?;
        self.bootstrap(out).await?;
        let supervisor = self.start(out)?;

        let report = supervisor
            .run_until(async {
                shutdown.await;
                let _ = out.write_all(b"\nShutting down servers...\n");
                let _ = out.flush();
            })
            .await;

        for (service, e) in report.failures() {
            warn!("{service} may still be running: {e}");
        }

        Ok(report.exit_code())
    }
}

#[track_caller]
fn write_console<W: Write>(out: &mut W, text: &str) -> Result<(), CoreError> {
    out.write_all(text.as_bytes())
        .and_then(|()| out.flush())
        .map_err(|e| CoreError::Console {
            message: format!("Failed to write to console: {e}"),
            location: ErrorLocation::from(Location::caller()),
        })
}

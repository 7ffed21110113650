//! Fixed launcher settings.
//!
//! There is no configuration file: directory names, commands and ports are the
//! constants below. Tests build their own [`LauncherConfig`] to shorten the
//! wait tick or flip the install policy.

pub mod command;

pub use command::CommandLine;

use crate::{
    BACKEND_DIR, DEFAULT_BACKEND_PORT, DEFAULT_FRONTEND_PORT, DEPENDENCY_MARKER, FRONTEND_DIR,
    LOOPBACK_HOST,
};

use std::time::Duration;

pub const LAUNCHER_TITLE: &str = "CONFLUENZE - LAN QUIZ SYSTEM";

/// Interval of the wait loop.
pub const DEFAULT_TICK: Duration = Duration::from_secs(1);

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NetworkConfig {
    pub frontend_port: u16,
    pub backend_port: u16,
    pub fallback_host: String,
}

impl Default for NetworkConfig {
    fn default() -> Self {
        Self {
            frontend_port: DEFAULT_FRONTEND_PORT,
            backend_port: DEFAULT_BACKEND_PORT,
            fallback_host: LOOPBACK_HOST.to_string(),
        }
    }
}

/// One of the two sibling projects the launcher drives.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceConfig {
    pub name: String,
    pub dir: String,
    pub marker: String,
    pub install: CommandLine,
    pub run: CommandLine,
}

impl ServiceConfig {
    pub fn backend() -> Self {
        Self {
            name: "Backend".to_string(),
            dir: BACKEND_DIR.to_string(),
            marker: DEPENDENCY_MARKER.to_string(),
            install: npm_install(),
            run: CommandLine::new("node", ["index.js"]),
        }
    }

    pub fn frontend() -> Self {
        Self {
            name: "Frontend".to_string(),
            dir: FRONTEND_DIR.to_string(),
            marker: DEPENDENCY_MARKER.to_string(),
            install: npm_install(),
            run: CommandLine::new("npm", ["run", "dev", "--", "--host", "0.0.0.0"]),
        }
    }
}

fn npm_install() -> CommandLine {
    CommandLine::new("npm", ["install"])
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BootstrapConfig {
    /// Keep starting the servers when an install command exits non-zero.
    pub continue_on_failure: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SupervisorConfig {
    pub tick: Duration,
}

impl Default for SupervisorConfig {
    fn default() -> Self {
        Self { tick: DEFAULT_TICK }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LauncherConfig {
    pub title: String,
    pub network: NetworkConfig,
    pub backend: ServiceConfig,
    pub frontend: ServiceConfig,
    pub bootstrap: BootstrapConfig,
    pub supervisor: SupervisorConfig,
}

impl Default for LauncherConfig {
    fn default() -> Self {
        Self {
            title: LAUNCHER_TITLE.to_string(),
            network: NetworkConfig::default(),
            backend: ServiceConfig::backend(),
            frontend: ServiceConfig::frontend(),
            bootstrap: BootstrapConfig::default(),
            supervisor: SupervisorConfig::default(),
        }
    }
}

impl LauncherConfig {
    /// Backend first, frontend second; the order services are bootstrapped and started in.
    pub fn services(&self) -> [&ServiceConfig; 2] {
        [&self.backend, &self.frontend]
    }
}

use crate::LOOPBACK_FRONTEND_URL;
use crate::config::{LauncherConfig, ServiceConfig};

/// **VALUE**: Verifies that the frontend command keeps every argument.
///
/// **WHY THIS MATTERS**: The frontend command carries `-- --host 0.0.0.0`; without the
/// separator Vite never binds to the LAN.
///
/// **BUG THIS CATCHES**: Would catch arguments being merged, reordered or dropped.
#[test]
fn given_frontend_service_when_rendered_then_keeps_every_argument() {
    // GIVEN: The stock frontend
    let frontend = ServiceConfig::frontend();

    // WHEN: Inspecting its run command
    let args: Vec<&str> = frontend.run.args().iter().map(String::as_str).collect();

    // THEN: Program and args are preserved in order
    assert_eq!(frontend.run.program(), "npm");
    assert_eq!(args, vec!["run", "dev", "--", "--host", "0.0.0.0"]);
    assert_eq!(frontend.run.to_string(), "npm run dev -- --host 0.0.0.0");
}

/// **VALUE**: Verifies the fixed settings the launcher runs with.
///
/// **BUG THIS CATCHES**: Would catch a drifted port, directory or command.
#[test]
fn given_default_config_when_inspected_then_matches_fixed_layout() {
    // GIVEN/WHEN: The launcher settings
    let config = LauncherConfig::default();

    // THEN: Ports, directories and commands are fixed
    assert_eq!(config.network.frontend_port, 5666);
    assert_eq!(config.network.backend_port, 5000);
    assert_eq!(config.backend.dir, "server");
    assert_eq!(config.frontend.dir, "client");
    assert_eq!(config.backend.run.to_string(), "node index.js");
    assert_eq!(config.backend.install.to_string(), "npm install");
    assert_eq!(config.frontend.marker, "node_modules");
    assert!(!config.bootstrap.continue_on_failure);
    assert_eq!(LOOPBACK_FRONTEND_URL, "http://127.0.0.1:5666");

    let order: Vec<&str> = config.services().iter().map(|s| s.name.as_str()).collect();
    assert_eq!(order, vec!["Backend", "Frontend"]);
}

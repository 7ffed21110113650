use crate::helpers::{
    Event, FailingSource, Recorder, RecordingInstaller, RecordingSpawner, project_root, sources,
};

use launcher_core::LOOPBACK_FRONTEND_URL;
use launcher_core::config::LauncherConfig;
use launcher_core::discovery::AddressSource;
use launcher_core::error::CoreError;
use launcher_core::error::bootstrap::BootstrapError;
use launcher_core::launch::Launcher;

use std::time::Duration;

// ============================================================================
// End-to-end launch scenarios with every OS boundary replaced by a double
// ============================================================================

fn test_config() -> LauncherConfig {
    let mut config = LauncherConfig::default();
    config.supervisor.tick = Duration::from_millis(5);
    config
}

/// **VALUE**: The full happy path: installed projects, one LAN address.
///
/// **WHY THIS MATTERS**: This is what an organiser sees on quiz day. The URL students
/// type must be right and nothing slow may run before the servers start.
///
/// **BUG THIS CATCHES**: Would catch an install issued despite the markers, a wrong spawn
/// order or cwd, or a banner built from the wrong address.
#[tokio::test]
async fn given_installed_projects_and_one_ip_when_run_then_banner_and_spawns_match() {
    // GIVEN: Markers present, discovery returns 192.168.1.10
    let root = project_root(true, true);
    let recorder = Recorder::default();
    let launcher = Launcher::new(test_config(), root.path())
        .with_sources(sources(&[[192, 168, 1, 10]]))
        .with_installer(RecordingInstaller::succeeding(&recorder))
        .with_spawner(RecordingSpawner::new(&recorder));
    let mut out: Vec<u8> = Vec::new();

    // WHEN: Running with an immediate interrupt
    let code = launcher.run(&mut out, async {}).await.unwrap();

    // THEN: Exit code 0
    assert_eq!(code, 0);

    // AND: The banner recommends the discovered address
    let console = String::from_utf8(out).unwrap();
    assert!(
        console.contains("Recommended URL for students: http://192.168.1.10:5666"),
        "Banner was:\n{console}"
    );
    assert!(console.contains("http://192.168.1.10:5666/login"));
    assert!(console.contains("Shutting down servers..."));

    // AND: No installs, server spawned before client, both terminated once
    assert!(recorder.installs().is_empty());
    assert_eq!(
        recorder.spawns(),
        vec![
            Event::Spawn {
                project: String::from("Backend"),
                dir: root.path().join("server"),
            },
            Event::Spawn {
                project: String::from("Frontend"),
                dir: root.path().join("client"),
            },
        ]
    );
    assert_eq!(recorder.terminations("Backend"), 1);
    assert_eq!(recorder.terminations("Frontend"), 1);
}

/// **VALUE**: Verifies the loopback fallback end to end.
///
/// **WHY THIS MATTERS**: With the laptop offline the organiser still needs a working
/// local URL.
#[tokio::test]
async fn given_no_addresses_when_run_then_recommended_url_uses_loopback() {
    // GIVEN: Every discovery strategy fails
    let root = project_root(true, true);
    let recorder = Recorder::default();
    let failing: Vec<Box<dyn AddressSource>> = vec![Box::new(FailingSource)];
    let launcher = Launcher::new(test_config(), root.path())
        .with_sources(failing)
        .with_installer(RecordingInstaller::succeeding(&recorder))
        .with_spawner(RecordingSpawner::new(&recorder));
    let mut out: Vec<u8> = Vec::new();

    // WHEN: Running
    let code = launcher.run(&mut out, async {}).await.unwrap();

    // THEN: Loopback URL recommended
    let console = String::from_utf8(out).unwrap();
    assert_eq!(code, 0);
    assert!(
        console.contains(&format!("Recommended URL for students: {LOOPBACK_FRONTEND_URL}")),
        "Banner was:\n{console}"
    );
}

/// **VALUE**: Verifies that installs happen before any spawn.
///
/// **WHY THIS MATTERS**: Starting `node index.js` before `npm install` finishes crashes the
/// backend on a missing module.
#[tokio::test]
async fn given_missing_markers_when_run_then_installs_precede_spawns() {
    // GIVEN: Neither project installed
    let root = project_root(false, false);
    let recorder = Recorder::default();
    let launcher = Launcher::new(test_config(), root.path())
        .with_sources(sources(&[[10, 0, 0, 5]]))
        .with_installer(RecordingInstaller::succeeding(&recorder))
        .with_spawner(RecordingSpawner::new(&recorder));
    let mut out: Vec<u8> = Vec::new();

    // WHEN: Running
    launcher.run(&mut out, async {}).await.unwrap();

    // THEN: install server, install client, spawn server, spawn client
    let events = recorder.events();
    assert_eq!(
        &events[..4],
        &[
            Event::Install {
                project: String::from("Backend"),
                dir: root.path().join("server"),
            },
            Event::Install {
                project: String::from("Frontend"),
                dir: root.path().join("client"),
            },
            Event::Spawn {
                project: String::from("Backend"),
                dir: root.path().join("server"),
            },
            Event::Spawn {
                project: String::from("Frontend"),
                dir: root.path().join("client"),
            },
        ]
    );
    let console = String::from_utf8(out).unwrap();
    assert!(console.contains("Installing Backend dependencies..."));
    assert!(console.contains("Installing Frontend dependencies..."));
}

/// **VALUE**: Verifies that a failed install aborts startup by default.
///
/// **WHY THIS MATTERS**: Starting servers on top of a broken install produces errors that
/// point away from npm.
#[tokio::test]
async fn given_failing_install_when_run_then_aborts_before_spawning() {
    // GIVEN: The backend install exits 1
    let root = project_root(false, true);
    let recorder = Recorder::default();
    let launcher = Launcher::new(test_config(), root.path())
        .with_sources(sources(&[[10, 0, 0, 5]]))
        .with_installer(RecordingInstaller::failing(&recorder, 1))
        .with_spawner(RecordingSpawner::new(&recorder));
    let mut out: Vec<u8> = Vec::new();

    // WHEN: Running
    let result = launcher.run(&mut out, async {}).await;

    // THEN: Bootstrap error, nothing spawned
    assert!(matches!(
        result,
        Err(CoreError::Bootstrap(BootstrapError::InstallFailed { .. }))
    ));
    assert!(recorder.spawns().is_empty());
}

/// **VALUE**: Verifies the opt-in to start anyway after a failed install.
#[tokio::test]
async fn given_failing_install_and_lenient_policy_when_run_then_servers_start() {
    // GIVEN: continue_on_failure enabled
    let root = project_root(false, true);
    let recorder = Recorder::default();
    let mut config = test_config();
    config.bootstrap.continue_on_failure = true;
    let launcher = Launcher::new(config, root.path())
        .with_sources(sources(&[[10, 0, 0, 5]]))
        .with_installer(RecordingInstaller::failing(&recorder, 1))
        .with_spawner(RecordingSpawner::new(&recorder));
    let mut out: Vec<u8> = Vec::new();

    // WHEN: Running
    let code = launcher.run(&mut out, async {}).await.unwrap();

    // THEN: Both servers started and stopped
    assert_eq!(code, 0);
    assert_eq!(recorder.spawns().len(), 2);
}

/// **VALUE**: Verifies that a spawn failure surfaces as an error and releases the
/// backend that was already running.
///
/// **WHY THIS MATTERS**: An orphaned backend keeps port 5000 busy and breaks the next
/// launch attempt.
#[tokio::test]
async fn given_frontend_spawn_fails_when_run_then_backend_is_released() {
    // GIVEN: Frontend spawn fails
    let root = project_root(true, true);
    let recorder = Recorder::default();
    let launcher = Launcher::new(test_config(), root.path())
        .with_sources(sources(&[[10, 0, 0, 5]]))
        .with_installer(RecordingInstaller::succeeding(&recorder))
        .with_spawner(RecordingSpawner::failing_on(&recorder, "Frontend"));
    let mut out: Vec<u8> = Vec::new();

    // WHEN: Running
    let result = launcher.run(&mut out, async {}).await;

    // THEN: Spawn error, backend terminated once
    assert!(matches!(result, Err(CoreError::Spawn(_))));
    assert_eq!(recorder.terminations("Backend"), 1);
}

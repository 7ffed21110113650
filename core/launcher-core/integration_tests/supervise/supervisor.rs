use crate::helpers::{Event, Recorder, RecordingSpawner, project_root};

use launcher_core::bootstrap::Project;
use launcher_core::config::ServiceConfig;
use launcher_core::supervise::{ServiceHandle, Supervisor};

use std::time::Duration;

const TICK: Duration = Duration::from_millis(5);

fn projects(root: &std::path::Path) -> (Project, Project) {
    (
        Project::from_config(&ServiceConfig::backend(), root),
        Project::from_config(&ServiceConfig::frontend(), root),
    )
}

// ============================================================================
// Public API tests for process supervision
// ============================================================================

/// **VALUE**: Verifies that an interrupt terminates each service exactly once and
/// yields exit code 0.
///
/// **WHY THIS MATTERS**: This is the only way the servers are stopped. A missed
/// termination leaves Vite holding port 5666 for the next launch.
///
/// **BUG THIS CATCHES**: Would catch a handle terminated twice (once by shutdown, once by
/// drop) or skipped entirely.
#[tokio::test]
async fn given_running_services_when_shutdown_resolves_then_each_terminated_once() {
    // GIVEN: Both services started
    let root = project_root(true, true);
    let (backend, frontend) = projects(root.path());
    let recorder = Recorder::default();
    let spawner = RecordingSpawner::new(&recorder);
    let mut supervisor = Supervisor::new(TICK);
    supervisor.start(&spawner, &backend).unwrap();
    supervisor.start(&spawner, &frontend).unwrap();

    // WHEN: The interrupt arrives after a few ticks
    let report = supervisor
        .run_until(tokio::time::sleep(Duration::from_millis(30)))
        .await;

    // THEN: One termination each, clean exit
    assert_eq!(recorder.terminations("Backend"), 1);
    assert_eq!(recorder.terminations("Frontend"), 1);
    assert_eq!(report.failures().count(), 0);
    assert_eq!(report.exit_code(), 0);
}

/// **VALUE**: Verifies that termination follows start order.
#[tokio::test]
async fn given_running_services_when_shutdown_then_terminates_in_start_order() {
    // GIVEN: Backend then frontend
    let root = project_root(true, true);
    let (backend, frontend) = projects(root.path());
    let recorder = Recorder::default();
    let spawner = RecordingSpawner::new(&recorder);
    let mut supervisor = Supervisor::new(TICK);
    supervisor.start(&spawner, &backend).unwrap();
    supervisor.start(&spawner, &frontend).unwrap();

    // WHEN: Shutting down immediately
    supervisor.run_until(async {}).await;

    // THEN: Spawn, spawn, terminate, terminate
    let events = recorder.events();
    assert_eq!(events.len(), 4);
    assert_eq!(
        events[2],
        Event::Terminate {
            project: String::from("Backend")
        }
    );
    assert_eq!(
        events[3],
        Event::Terminate {
            project: String::from("Frontend")
        }
    );
}

/// **VALUE**: Verifies that a failing termination request does not change the exit code.
///
/// **WHY THIS MATTERS**: Shutdown is best-effort; the operator's Ctrl+C must still end
/// the launcher cleanly.
#[tokio::test]
async fn given_terminate_fails_when_shutdown_then_reports_failure_and_exits_zero() {
    // GIVEN: A handle whose child refuses termination
    let recorder = Recorder::default();
    let spawner = RecordingSpawner::new(&recorder);
    let mut child = spawner.child("Backend");
    child.fail_terminate = true;
    let mut handle = ServiceHandle::new("Backend", Box::new(child));

    // WHEN: Terminating
    let result = handle.terminate();

    // THEN: Error surfaced, handle still counts as terminated
    assert!(result.is_err());
    assert!(handle.is_terminated());

    // AND: A second call sends nothing more
    assert!(handle.terminate().is_ok());
    drop(handle);
    assert_eq!(recorder.terminations("Backend"), 1);
}

/// **VALUE**: Verifies scoped release: a handle dropped without shutdown still sends
/// its termination request.
///
/// **WHY THIS MATTERS**: If the frontend fails to spawn, the already running backend
/// must not be orphaned.
///
/// **BUG THIS CATCHES**: Would catch removal of the `Drop` impl.
#[test]
fn given_unterminated_handle_when_dropped_then_terminates_once() {
    // GIVEN: A live handle
    let recorder = Recorder::default();
    let spawner = RecordingSpawner::new(&recorder);
    let handle = ServiceHandle::new("Backend", Box::new(spawner.child("Backend")));

    // WHEN: Dropping it
    drop(handle);

    // THEN: Exactly one termination
    assert_eq!(recorder.terminations("Backend"), 1);
}

/// **VALUE**: Verifies that a spawn failure releases the services started before it.
#[test]
fn given_second_spawn_fails_when_supervisor_dropped_then_first_is_released() {
    // GIVEN: A spawner that fails on the frontend
    let root = project_root(true, true);
    let (backend, frontend) = projects(root.path());
    let recorder = Recorder::default();
    let spawner = RecordingSpawner::failing_on(&recorder, "Frontend");
    let mut supervisor = Supervisor::new(TICK);

    // WHEN: Starting both
    supervisor.start(&spawner, &backend).unwrap();
    let result = supervisor.start(&spawner, &frontend);
    assert!(result.is_err());
    drop(supervisor);

    // THEN: The backend was terminated, the frontend never existed
    assert_eq!(recorder.terminations("Backend"), 1);
    assert_eq!(recorder.terminations("Frontend"), 0);
}

/// **VALUE**: Verifies that the wait loop does nothing to the children between ticks.
///
/// **WHY THIS MATTERS**: The launcher neither watches nor restarts the servers; the
/// only action after startup is the single termination at shutdown.
///
/// **BUG THIS CATCHES**: Would catch a tick that respawns, kills or otherwise touches
/// a child before the interrupt.
#[tokio::test]
async fn given_many_ticks_when_waiting_then_only_shutdown_touches_children() {
    // GIVEN: Both services started
    let root = project_root(true, true);
    let (backend, frontend) = projects(root.path());
    let recorder = Recorder::default();
    let spawner = RecordingSpawner::new(&recorder);
    let mut supervisor = Supervisor::new(TICK);
    supervisor.start(&spawner, &backend).unwrap();
    supervisor.start(&spawner, &frontend).unwrap();

    // WHEN: Several ticks pass before shutdown
    let report = supervisor
        .run_until(tokio::time::sleep(Duration::from_millis(20)))
        .await;

    // THEN: Two spawns followed by exactly the two terminations, in start order
    let events = recorder.events();
    assert_eq!(events.len(), 4, "Unexpected events: {events:?}");
    assert!(matches!(&events[0], Event::Spawn { project, .. } if project == "Backend"));
    assert!(matches!(&events[1], Event::Spawn { project, .. } if project == "Frontend"));
    assert_eq!(
        events[2..],
        [
            Event::Terminate {
                project: String::from("Backend")
            },
            Event::Terminate {
                project: String::from("Frontend")
            },
        ]
    );
    assert_eq!(report.exit_code(), 0);
}

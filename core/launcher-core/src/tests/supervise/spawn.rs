// Unit tests for spawn module private functions
// Integration tests for public API are in integration_tests/supervise/supervisor.rs

use crate::bootstrap::Project;
use crate::config::CommandLine;
use crate::supervise::spawn::{ManagedChild, OsChild, build_spawn_command, with_process};

use std::path::PathBuf;
use std::time::Duration;

fn project(run: CommandLine) -> Project {
    Project {
        name: String::from("Backend"),
        dir: PathBuf::from("/srv/confluenze/server"),
        marker: PathBuf::from("/srv/confluenze/server/node_modules"),
        install: CommandLine::new("npm", ["install"]),
        run,
    }
}

/// **VALUE**: Verifies that `build_spawn_command()` runs the configured program in the
/// project directory.
///
/// **WHY THIS MATTERS**: `node index.js` only works from inside `server/`; a wrong cwd
/// makes the backend die instantly with a confusing module error.
///
/// **BUG THIS CATCHES**: Would catch a refactor that forgets `current_dir` or swaps the
/// program for the install command.
#[cfg(not(windows))]
#[test]
fn given_project_when_build_spawn_command_called_then_sets_program_args_and_cwd() {
    // GIVEN: The backend project
    let project = project(CommandLine::new("node", ["index.js"]));

    // WHEN: Building the spawn command
    let cmd = build_spawn_command(&project);
    let std_cmd = cmd.as_std();

    // THEN: Program, args and cwd come from the project
    assert_eq!(std_cmd.get_program(), "node");
    let args: Vec<_> = std_cmd.get_args().collect();
    assert_eq!(args, vec!["index.js"]);
    assert_eq!(
        std_cmd.get_current_dir(),
        Some(PathBuf::from("/srv/confluenze/server").as_path())
    );
}

/// **VALUE**: Verifies that Windows commands go through `cmd /C`.
///
/// **WHY THIS MATTERS**: `npm` is a `.cmd` shim on Windows and cannot be started directly.
#[cfg(windows)]
#[test]
fn given_project_when_build_spawn_command_called_then_wraps_in_cmd() {
    let project = project(CommandLine::new("npm", ["run", "dev"]));

    let cmd = build_spawn_command(&project);
    let std_cmd = cmd.as_std();

    assert_eq!(std_cmd.get_program(), "cmd");
    let args: Vec<_> = std_cmd.get_args().collect();
    assert_eq!(args, vec!["/C", "npm", "run", "dev"]);
}

/// **VALUE**: Tests that `with_process()` returns `None` for a PID that does not exist.
///
/// **WHY THIS MATTERS**: A server can die on its own long before shutdown; terminating
/// it must then be a quiet no-op.
///
/// **BUG THIS CATCHES**: Would catch a lookup that panics on unknown PIDs.
#[test]
fn given_nonexistent_pid_when_with_process_called_then_returns_none() {
    // GIVEN: A PID that doesn't exist
    let fake_pid = u32::MAX;

    // WHEN: Looking it up
    let result = with_process(fake_pid, |_| true);

    // THEN: None
    assert!(result.is_none(), "Should return None for non-existent process");
}

/// **VALUE**: Tests that `with_process()` runs the closure against a live process.
#[test]
fn given_own_pid_when_with_process_called_then_executes_closure() {
    // GIVEN: Our own PID
    let our_pid = std::process::id();

    // WHEN: Reading the PID back through the closure
    let result = with_process(our_pid, |p| p.pid().as_u32());

    // THEN: Same PID
    assert_eq!(result, Some(our_pid));
}

/// **VALUE**: Verifies that `terminate()` really stops a running process with SIGTERM.
///
/// **WHY THIS MATTERS**: Shutdown sends exactly one request and never escalates; if that
/// request does not reach the child, the server outlives the launcher.
///
/// **BUG THIS CATCHES**: Would catch the sysinfo signal being sent to the wrong PID or
/// not at all.
#[cfg(unix)]
#[tokio::test]
async fn given_running_child_when_terminated_then_exits_from_sigterm() {
    use std::os::unix::process::ExitStatusExt;

    // GIVEN: A long-running child in a real directory
    let dir = tempfile::tempdir().unwrap();
    let mut project = project(CommandLine::new("sleep", ["30"]));
    project.dir = dir.path().to_path_buf();
    let mut child = OsChild::spawn(&project).unwrap();
    assert!(child.id().is_some());

    // WHEN: Requesting termination
    child.terminate().unwrap();

    // THEN: It exits promptly, killed by SIGTERM
    let status = tokio::time::timeout(Duration::from_secs(5), child.child.wait())
        .await
        .expect("child should exit after SIGTERM")
        .unwrap();
    assert!(!status.success());
    assert_eq!(status.signal(), Some(15));

    // AND: A later request on the reaped child is a no-op
    assert!(child.terminate().is_ok());
}

/// **VALUE**: Verifies that a missing program surfaces as a spawn error.
#[cfg(unix)]
#[tokio::test]
async fn given_missing_program_when_spawned_then_returns_spawn_error() {
    // GIVEN: A program that does not exist
    let dir = tempfile::tempdir().unwrap();
    let mut project = project(CommandLine::new("confluenze-no-such-server", ["index.js"]));
    project.dir = dir.path().to_path_buf();

    // WHEN: Spawning
    let result = OsChild::spawn(&project);

    // THEN: Spawn error naming the service
    match result {
        Err(crate::error::spawn::SpawnError::Spawn { service, .. }) => {
            assert_eq!(service, "Backend")
        }
        Err(other) => panic!("Unexpected error: {other}"),
        Ok(_) => panic!("Spawning a missing program should fail"),
    }
}

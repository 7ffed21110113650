// Unit tests for project root and log directory resolution

use crate::error::LauncherError;
use crate::paths::{ensure_log_dir, find_root, log_dir};

use launcher_core::{BACKEND_DIR, FRONTEND_DIR};

use std::fs;
use std::path::PathBuf;

use serial_test::serial;

/// **VALUE**: The root is found from a nested executable directory.
///
/// **WHY THIS MATTERS**: The launcher binary lives in a build output directory
/// (e.g. `target/release`) below the project it starts.
///
/// **BUG THIS CATCHES**: Would catch searching only the executable's own directory.
#[test]
fn given_exe_below_project_when_finding_root_then_returns_nearest_ancestor() {
    // GIVEN: <tmp>/server, <tmp>/client and <tmp>/target/release
    let temp = tempfile::tempdir().unwrap();
    fs::create_dir(temp.path().join(BACKEND_DIR)).unwrap();
    fs::create_dir(temp.path().join(FRONTEND_DIR)).unwrap();
    let exe_dir = temp.path().join("target").join("release");
    fs::create_dir_all(&exe_dir).unwrap();

    // WHEN: Searching from the executable directory
    let root = find_root(&exe_dir, &[BACKEND_DIR, FRONTEND_DIR]);

    // THEN: The project directory is returned
    assert_eq!(root.as_deref(), Some(temp.path()));
}

/// **VALUE**: Both project directories are required.
///
/// **BUG THIS CATCHES**: Would catch `any` being used instead of `all`.
#[test]
fn given_only_backend_dir_when_finding_root_then_returns_none() {
    // GIVEN: A tree with `server` but no `client`
    let temp = tempfile::tempdir().unwrap();
    let start = temp.path().join("only-backend");
    fs::create_dir_all(start.join(BACKEND_DIR)).unwrap();

    // WHEN: Searching below the tree with a directory name that never exists
    let root = find_root(&start, &[BACKEND_DIR, "confluenze-missing-dir"]);

    // THEN: Nothing matches
    assert!(root.is_none());
}

/// **VALUE**: The log directory sits under the project root.
#[test]
fn given_root_when_resolving_log_dir_then_uses_logs_below_root() {
    // GIVEN: A project root
    let root = PathBuf::from("/srv/confluenze");

    // WHEN: Resolving
    let dir = log_dir(&root);

    // THEN: <root>/logs
    assert_eq!(dir, root.join("logs"));
}

/// **VALUE**: The log directory does not depend on the environment.
///
/// **WHY THIS MATTERS**: The launcher reads no environment variables; an operator
/// double-clicking it must get the same log location whatever the session exports.
///
/// **BUG THIS CATCHES**: Would catch a per-user data directory lookup
/// (`XDG_DATA_HOME`, `HOME`) creeping back in.
#[test]
#[serial]
fn given_changing_environment_when_resolving_log_dir_then_result_is_stable() {
    // GIVEN: A root and two different data homes
    let root = PathBuf::from("/srv/confluenze");

    // WHEN: Resolving under each
    // SAFETY: serialized with every other test touching process state
    unsafe { std::env::set_var("XDG_DATA_HOME", "/tmp/confluenze-data-a") };
    let first = log_dir(&root);
    unsafe { std::env::set_var("XDG_DATA_HOME", "/tmp/confluenze-data-b") };
    let second = log_dir(&root);
    unsafe { std::env::remove_var("XDG_DATA_HOME") };

    // THEN: Identical, and below the root
    assert_eq!(first, second);
    assert!(first.starts_with(&root));
}

/// **VALUE**: Path failures surface as launcher errors, not config errors.
///
/// **BUG THIS CATCHES**: Would catch a `create_dir_all` failure being unwrapped
/// instead of ending the launcher with exit code 1.
#[cfg(unix)]
#[test]
fn given_unwritable_log_dir_when_ensured_then_returns_launcher_error() {
    // GIVEN: A directory below a character device
    let dir = PathBuf::from("/dev/null/logs");

    // WHEN: Creating it
    let result = ensure_log_dir(&dir);

    // THEN: LauncherError::Launcher naming the directory
    match result {
        Err(err @ LauncherError::Launcher { .. }) => {
            assert!(err.to_string().contains("/dev/null/logs"))
        }
        other => panic!("Expected LauncherError::Launcher, got {other:?}"),
    }
}

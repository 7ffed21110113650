use launcher_core::bootstrap::{InstallReport, Installer, Project, ShellInstaller};
use launcher_core::config::CommandLine;
use launcher_core::error::bootstrap::BootstrapError;

use std::path::Path;

// ============================================================================
// ShellInstaller against real processes (Unix tool chain)
// ============================================================================

fn project_with_install(dir: &Path, install: CommandLine) -> Project {
    Project {
        name: String::from("Backend"),
        dir: dir.to_path_buf(),
        marker: dir.join("node_modules"),
        install,
        run: CommandLine::new("true", Vec::<String>::new()),
    }
}

/// **VALUE**: Verifies that a zero exit maps to a successful report.
///
/// **BUG THIS CATCHES**: Would catch the exit status being read from the wrong place.
#[cfg(unix)]
#[tokio::test]
async fn given_install_exits_zero_when_run_then_reports_success() {
    // GIVEN: An install command that succeeds
    let dir = tempfile::tempdir().unwrap();
    let project = project_with_install(dir.path(), CommandLine::new("true", Vec::<String>::new()));

    // WHEN: Running it for real
    let report = ShellInstaller.install(&project).await.unwrap();

    // THEN: Success with code 0
    assert_eq!(
        report,
        InstallReport {
            success: true,
            code: Some(0)
        }
    );
}

/// **VALUE**: Verifies that a non-zero exit maps to a failed report with its code.
///
/// **WHY THIS MATTERS**: The abort policy keys on this report; a swallowed failure
/// starts a server with half its packages.
#[cfg(unix)]
#[tokio::test]
async fn given_install_exits_nonzero_when_run_then_reports_failure_code() {
    // GIVEN: An install command that fails
    let dir = tempfile::tempdir().unwrap();
    let project = project_with_install(dir.path(), CommandLine::new("false", Vec::<String>::new()));

    // WHEN: Running it for real
    let report = ShellInstaller.install(&project).await.unwrap();

    // THEN: Failure with code 1
    assert_eq!(
        report,
        InstallReport {
            success: false,
            code: Some(1)
        }
    );
}

/// **VALUE**: Verifies that the install command runs inside the project directory.
///
/// **BUG THIS CATCHES**: Would catch a missing `current_dir`, which would run
/// `npm install` in the launcher's own folder.
#[cfg(unix)]
#[tokio::test]
async fn given_project_dir_when_installing_then_command_runs_there() {
    // GIVEN: A command that creates a file relative to its working directory
    let dir = tempfile::tempdir().unwrap();
    let project = project_with_install(dir.path(), CommandLine::new("touch", ["installed.txt"]));

    // WHEN: Running it
    let report = ShellInstaller.install(&project).await.unwrap();

    // THEN: The file landed in the project directory
    assert!(report.success);
    assert!(dir.path().join("installed.txt").is_file());
}

/// **VALUE**: Verifies that an unknown program is a launch error, not a failed install.
#[tokio::test]
async fn given_missing_program_when_installing_then_returns_launch_error() {
    // GIVEN: A program that does not exist
    let dir = tempfile::tempdir().unwrap();
    let project = project_with_install(
        dir.path(),
        CommandLine::new("confluenze-no-such-installer", Vec::<String>::new()),
    );

    // WHEN: Running it
    let result = ShellInstaller.install(&project).await;

    // THEN: Launch error naming the project
    if cfg!(unix) {
        let err = result.unwrap_err();
        assert!(matches!(err, BootstrapError::Launch { .. }));
        assert_eq!(err.project(), "Backend");
    }
}

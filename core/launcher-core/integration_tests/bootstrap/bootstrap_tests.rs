use crate::helpers::{Event, Recorder, RecordingInstaller, project_root};

use launcher_core::bootstrap::{InstallOutcome, Project, enforce, ensure_dependencies};
use launcher_core::config::ServiceConfig;
use launcher_core::error::bootstrap::BootstrapError;

// ============================================================================
// Public API tests for dependency bootstrap
// ============================================================================

/// **VALUE**: Verifies that an existing marker directory makes bootstrap a no-op.
///
/// **WHY THIS MATTERS**: `npm install` takes minutes on a classroom Wi-Fi. Running it on
/// every launch would make the launcher unusable.
///
/// **BUG THIS CATCHES**: Would catch an inverted marker check.
#[tokio::test]
async fn given_marker_present_when_ensure_dependencies_called_then_installer_not_invoked() {
    // GIVEN: A backend with node_modules
    let root = project_root(true, true);
    let project = Project::from_config(&ServiceConfig::backend(), root.path());
    let recorder = Recorder::default();
    let installer = RecordingInstaller::succeeding(&recorder);

    // WHEN: Ensuring dependencies
    let outcome = ensure_dependencies(&project, &installer).await.unwrap();

    // THEN: Skipped, nothing recorded
    assert_eq!(outcome, InstallOutcome::Skipped);
    assert!(recorder.events().is_empty());
}

/// **VALUE**: Verifies exactly one install call per project lacking its marker, run in
/// the project directory.
///
/// **WHY THIS MATTERS**: Installing in the wrong directory pollutes the launcher root and
/// leaves the server without its packages.
///
/// **BUG THIS CATCHES**: Would catch a missing `current_dir` or a duplicate install.
#[tokio::test]
async fn given_marker_missing_when_ensure_dependencies_called_then_installs_once_in_project_dir() {
    // GIVEN: Backend installed, frontend not
    let root = project_root(true, false);
    let backend = Project::from_config(&ServiceConfig::backend(), root.path());
    let frontend = Project::from_config(&ServiceConfig::frontend(), root.path());
    let recorder = Recorder::default();
    let installer = RecordingInstaller::succeeding(&recorder);

    // WHEN: Ensuring both
    let backend_outcome = ensure_dependencies(&backend, &installer).await.unwrap();
    let frontend_outcome = ensure_dependencies(&frontend, &installer).await.unwrap();

    // THEN: Only the frontend was installed, once, in client/
    assert_eq!(backend_outcome, InstallOutcome::Skipped);
    assert_eq!(frontend_outcome, InstallOutcome::Installed);
    assert_eq!(
        recorder.events(),
        vec![Event::Install {
            project: String::from("Frontend"),
            dir: root.path().join("client"),
        }]
    );
}

/// **VALUE**: Verifies that a non-zero install exit is surfaced instead of swallowed.
///
/// **WHY THIS MATTERS**: A half-installed `node_modules` makes the server crash with a
/// module error minutes later, far from the real cause.
///
/// **BUG THIS CATCHES**: Would catch the exit status being ignored.
#[tokio::test]
async fn given_install_exits_nonzero_when_ensure_dependencies_called_then_reports_failed() {
    // GIVEN: Nothing installed and an installer exiting 1
    let root = project_root(false, false);
    let project = Project::from_config(&ServiceConfig::backend(), root.path());
    let recorder = Recorder::default();
    let installer = RecordingInstaller::failing(&recorder, 1);

    // WHEN: Ensuring dependencies
    let outcome = ensure_dependencies(&project, &installer).await.unwrap();

    // THEN: Failed with the exit code
    assert_eq!(outcome, InstallOutcome::Failed { code: Some(1) });
    assert_eq!(recorder.installs().len(), 1);
}

/// **VALUE**: Verifies the abort-by-default policy and the opt-in to carry on.
///
/// **WHY THIS MATTERS**: Whether a failed install stops the launcher is a deliberate
/// operator choice, not an accident of control flow.
#[test]
fn given_failed_outcome_when_enforced_then_policy_decides() {
    // GIVEN: A failed install
    let root = project_root(false, false);
    let project = Project::from_config(&ServiceConfig::frontend(), root.path());
    let failed = InstallOutcome::Failed { code: Some(254) };

    // WHEN/THEN: Strict policy aborts
    let err = enforce(&project, failed, false).unwrap_err();
    assert!(matches!(err, BootstrapError::InstallFailed { .. }));
    assert_eq!(err.project(), "Frontend");
    assert!(err.to_string().contains("code 254"));

    // WHEN/THEN: Lenient policy continues
    assert!(enforce(&project, failed, true).is_ok());

    // AND: Successful outcomes always pass
    assert!(enforce(&project, InstallOutcome::Installed, false).is_ok());
    assert!(enforce(&project, InstallOutcome::Skipped, false).is_ok());
}

/// **VALUE**: Verifies that a missing project directory is reported before installing.
///
/// **WHY THIS MATTERS**: Launching from the wrong folder should name the missing
/// directory rather than fail inside npm.
#[tokio::test]
async fn given_missing_project_dir_when_ensure_dependencies_called_then_returns_error() {
    // GIVEN: An empty root
    let root = tempfile::tempdir().unwrap();
    let project = Project::from_config(&ServiceConfig::backend(), root.path());
    let recorder = Recorder::default();
    let installer = RecordingInstaller::succeeding(&recorder);

    // WHEN: Ensuring dependencies
    let result = ensure_dependencies(&project, &installer).await;

    // THEN: MissingProjectDir, installer untouched
    assert!(matches!(
        result,
        Err(BootstrapError::MissingProjectDir { .. })
    ));
    assert!(recorder.events().is_empty());
}

/// **VALUE**: Verifies that a plain file named like the marker does not count.
///
/// **WHY THIS MATTERS**: The marker is a directory; a stray file must not suppress the
/// install.
#[tokio::test]
async fn given_marker_is_a_file_when_ensure_dependencies_called_then_installs() {
    // GIVEN: server/node_modules exists as a file
    let root = project_root(false, false);
    std::fs::write(root.path().join("server").join("node_modules"), b"").unwrap();
    let project = Project::from_config(&ServiceConfig::backend(), root.path());
    let recorder = Recorder::default();
    let installer = RecordingInstaller::succeeding(&recorder);

    // WHEN: Ensuring dependencies
    let outcome = ensure_dependencies(&project, &installer).await.unwrap();

    // THEN: Installed
    assert_eq!(outcome, InstallOutcome::Installed);
    assert_eq!(recorder.installs().len(), 1);
}

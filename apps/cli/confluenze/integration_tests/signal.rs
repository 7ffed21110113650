use confluenze::signal::shutdown_signal;

use std::time::Duration;

// ============================================================================
// Integration tests for the interrupt listener
// ============================================================================

/// **VALUE**: Registering the listener does not resolve it.
///
/// **WHY THIS MATTERS**: The future gates the whole wait loop; resolving early
/// would stop both servers right after they start.
///
/// **BUG THIS CATCHES**: Would catch the future completing on registration.
#[tokio::test]
async fn given_no_interrupt_when_waiting_then_signal_future_stays_pending() {
    // GIVEN: A registered listener
    let shutdown = shutdown_signal().expect("listener should register");

    // WHEN: Waiting briefly
    let result = tokio::time::timeout(Duration::from_millis(100), shutdown).await;

    // THEN: It has not resolved
    assert!(result.is_err(), "Shutdown fired without an interrupt");
}

/// **VALUE**: SIGTERM ends the wait.
///
/// **WHY THIS MATTERS**: Service managers and `kill` stop the launcher with
/// SIGTERM; it must still release both servers.
#[cfg(unix)]
#[tokio::test]
async fn given_sigterm_when_waiting_then_signal_future_resolves() {
    // GIVEN: A registered listener
    let shutdown = shutdown_signal().expect("listener should register");

    // WHEN: The process signals itself
    let status = std::process::Command::new("kill")
        .args(["-TERM", &std::process::id().to_string()])
        .status()
        .expect("kill should run");
    assert!(status.success());

    // THEN: The future resolves
    let result = tokio::time::timeout(Duration::from_secs(5), shutdown).await;
    assert!(result.is_ok(), "Shutdown did not observe SIGTERM");
}

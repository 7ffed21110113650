//! The one-shot interrupt that ends the wait loop.
//!
//! Listeners are installed when [`shutdown_signal`] is called, not when the
//! returned future is first polled, so an interrupt arriving while children are
//! still being spawned is not lost.

use crate::error::LauncherError;

use common::ErrorLocation;

use std::future::Future;
use std::panic::Location;

use log::info;

/// Resolves on the first SIGINT or SIGTERM.
///
/// # Errors
///
/// Returns [`LauncherError::Signal`] if a handler cannot be registered. Must be
/// called from within a tokio runtime.
#[cfg(unix)]
#[track_caller]
pub fn shutdown_signal() -> Result<impl Future<Output = ()>, LauncherError> {
    use tokio::signal::unix::{SignalKind, signal};

    let location = ErrorLocation::from(Location::caller());
    let register = |kind: SignalKind, name: &str| {
        signal(kind).map_err(|e| LauncherError::Signal {
            message: format!("Failed to register {name} handler: {e}"),
            location,
        })
    };

    let mut sigint = register(SignalKind::interrupt(), "SIGINT")?;
    let mut sigterm = register(SignalKind::terminate(), "SIGTERM")?;

    Ok(async move {
        tokio::select! {
            _ = sigint.recv() => info!("Received SIGINT"),
            _ = sigterm.recv() => info!("Received SIGTERM"),
        }
    })
}

/// Resolves on the first Ctrl+C.
///
/// # Errors
///
/// Returns [`LauncherError::Signal`] if the handler cannot be registered. Must
/// be called from within a tokio runtime.
#[cfg(windows)]
#[track_caller]
pub fn shutdown_signal() -> Result<impl Future<Output = ()>, LauncherError> {
    let mut ctrl_c = tokio::signal::windows::ctrl_c().map_err(|e| LauncherError::Signal {
        message: format!("Failed to register Ctrl+C handler: {e}"),
        location: ErrorLocation::from(Location::caller()),
    })?;

    Ok(async move {
        ctrl_c.recv().await;
        info!("Received Ctrl+C");
    })
}

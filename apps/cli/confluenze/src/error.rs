use common::ErrorLocation;

use launcher_core::error::CoreError;

use thiserror::Error;

/// Errors that end the launcher with a non-zero exit code.
#[derive(Debug, Error)]
pub enum LauncherError {
    /// Error from this binary (paths, log directory, logger)
    #[error("Launcher Error: {message} {location}")]
    Launcher {
        message: String,
        location: ErrorLocation,
    },

    /// The interrupt listener could not be installed
    #[error("Signal Error: {message} {location}")]
    Signal {
        message: String,
        location: ErrorLocation,
    },

    /// Error from launcher-core (bootstrap, spawn, console)
    #[error(transparent)]
    Core(#[from] CoreError),
}

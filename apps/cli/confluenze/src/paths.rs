//! Where the launcher finds its projects and writes its log.
//!
//! Everything is derived from the executable's location plus fixed directory
//! names; no environment variable is consulted.

use crate::error::LauncherError;

use common::ErrorLocation;
use launcher_core::{BACKEND_DIR, FRONTEND_DIR};

use std::panic::Location;
use std::path::{Path, PathBuf};

pub const LOG_DIR_NAME: &str = "logs";

/// Resolve the project root from the running executable.
///
/// The root is the nearest ancestor of the executable's directory holding both
/// the backend and the frontend directory. An executable living outside any
/// such tree treats its own directory as the root.
///
/// # Errors
///
/// Returns [`LauncherError::Launcher`] if the executable path cannot be read.
#[track_caller]
pub fn project_root() -> Result<PathBuf, LauncherError> {
    let location = ErrorLocation::from(Location::caller());

    let exe = std::env::current_exe().map_err(|e| LauncherError::Launcher {
        message: format!("Cannot locate the launcher executable: {e}"),
        location,
    })?;

    let exe_dir = exe.parent().ok_or_else(|| LauncherError::Launcher {
        message: format!("Executable has no parent directory: {}", exe.display()),
        location,
    })?;

    Ok(find_root(exe_dir, &[BACKEND_DIR, FRONTEND_DIR]).unwrap_or_else(|| exe_dir.to_path_buf()))
}

/// Nearest ancestor of `start` (inclusive) containing every directory in `dirs`.
pub fn find_root(start: &Path, dirs: &[&str]) -> Option<PathBuf> {
    start
        .ancestors()
        .find(|candidate| dirs.iter().all(|dir| candidate.join(dir).is_dir()))
        .map(Path::to_path_buf)
}

/// `<root>/logs`.
pub fn log_dir(root: &Path) -> PathBuf {
    root.join(LOG_DIR_NAME)
}

/// Create the log directory if needed.
#[track_caller]
pub fn ensure_log_dir(dir: &Path) -> Result<(), LauncherError> {
    std::fs::create_dir_all(dir).map_err(|e| LauncherError::Launcher {
        message: format!("Failed to create log directory {}: {e}", dir.display()),
        location: ErrorLocation::from(Location::caller()),
    })
}

//! Building OS commands for the backend/frontend tool chain.
//!
//! On Windows `npm` is a `.cmd` shim that `CreateProcess` cannot start
//! directly, so every command is routed through `cmd /C` there. Elsewhere the
//! program is executed as-is so termination signals reach it and not a shell.

use crate::config::CommandLine;

use std::path::Path;
use std::process::{Command as StdCommand, Stdio};

#[cfg(windows)]
const WINDOWS_SHELL: &str = "cmd";
#[cfg(windows)]
const WINDOWS_SHELL_FLAG: &str = "/C";

/// Build a command for `command` with `cwd` as its working directory.
///
/// Stdio is inherited: both servers write straight to the launcher's console.
pub fn build_command(command: &CommandLine, cwd: &Path) -> StdCommand {
    let mut cmd = platform_command(command);
    cmd.current_dir(cwd)
        .stdin(Stdio::inherit())
        .stdout(Stdio::inherit())
        .stderr(Stdio::inherit());
    cmd
}

#[cfg(not(windows))]
fn platform_command(command: &CommandLine) -> StdCommand {
    let mut cmd = StdCommand::new(command.program());
    cmd.args(command.args());
    cmd
}

#[cfg(windows)]
fn platform_command(command: &CommandLine) -> StdCommand {
    let mut cmd = StdCommand::new(WINDOWS_SHELL);
    cmd.arg(WINDOWS_SHELL_FLAG)
        .arg(command.program())
        .args(command.args());
    cmd
}

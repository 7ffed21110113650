use confluenze::error::LauncherError;
use confluenze::{logger, paths, signal};

use launcher_core::config::LauncherConfig;
use launcher_core::launch::Launcher;

use std::process::ExitCode;

use log::{error, info};

#[tokio::main]
async fn main() -> ExitCode {
    match run().await {
        Ok(code) => ExitCode::from(u8::try_from(code).unwrap_or(1)),
        Err(e) => {
            error!("Launcher failed: {e}");
            eprintln!("\nError: {e}");
            ExitCode::FAILURE
        }
    }
}

async fn run() -> Result<i32, LauncherError> {
    let root = paths::project_root()?;

    let log_dir = paths::log_dir(&root);
    paths::ensure_log_dir(&log_dir)?;
    logger::initialize(&log_dir)?;

    info!("Project root: {}", root.display());
    info!("Logging to {}", log_dir.join(logger::LOG_FILE_NAME).display());

    let shutdown = signal::shutdown_signal()?;

    let mut stdout = std::io::stdout();
    let code = Launcher::new(LauncherConfig::default(), root)
        .run(&mut stdout, shutdown)
        .await?;

    info!("Launcher exiting with code {code}");
    Ok(code)
}

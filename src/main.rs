//! reload-notifier binary.
//!
//! ```text
//! CONFIG_DIR=./config PROCESS_NAME=producer RELOAD_SIGNAL=SIGHUP reload-notifier
//! ```

use reload_notifier::core::{ReloadDaemon, Settings};
use reload_notifier::error::StartupError;
use reload_notifier::logging;
use std::process::ExitCode;

#[tokio::main]
async fn main() -> ExitCode {
    logging::init();

    match run().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!("{}, exiting...", e);
            ExitCode::FAILURE
        }
    }
}

async fn run() -> Result<(), StartupError> {
    let settings = Settings::from_env()?;

    if settings.default_signal {
        tracing::info!("RELOAD_SIGNAL env var is missing, using default SIGHUP");
    }
    tracing::info!(
        config_dir = %settings.watch,
        process_name = settings.target.process_name(),
        reload_signal = %settings.target.signal(),
        debounce_ms = settings.debounce.map(|d| d.as_millis() as u64),
        "Starting with CONFIG_DIR={}, PROCESS_NAME={}, RELOAD_SIGNAL={}",
        settings.watch,
        settings.target.process_name(),
        settings.target.signal()
    );

    let daemon = ReloadDaemon::start(&settings)?;
    let stats = daemon.run_until_terminated().await;

    tracing::info!(
        events = stats.events,
        reloads = stats.reloads,
        watch_errors = stats.watch_errors,
        "Shutdown complete"
    );
    Ok(())
}

//! The long-lived watcher subscription and its drain task.

use crate::core::{ReloadCoordinator, Settings, WatchTarget};
use crate::error::WatchError;
use crate::notify::{DirectoryWatcher, EventLoop, LoopStats};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinHandle;

/// Owns the directory watcher and the task running the [`EventLoop`].
///
/// Created once after settings are validated. Runs until [`shutdown`] is
/// called, which the binary does when SIGINT or SIGTERM arrives.
///
/// Must be started from inside a tokio runtime.
///
/// [`shutdown`]: ReloadDaemon::shutdown
///
/// # Examples
///
/// ```rust,no_run
/// use reload_notifier::core::{ReloadDaemon, Settings};
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let settings = Settings::from_env()?;
/// let daemon = ReloadDaemon::start(&settings)?;
/// let stats = daemon.run_until_terminated().await;
/// println!("handled {} events", stats.events);
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct ReloadDaemon {
    watcher: DirectoryWatcher,
    task: JoinHandle<LoopStats>,
}

impl ReloadDaemon {
    /// Subscribe to every configured directory and start the loop against
    /// the local process table.
    ///
    /// # Errors
    ///
    /// Returns an error if any directory cannot be watched. No loop is
    /// started in that case.
    pub fn start(settings: &Settings) -> Result<Self, WatchError> {
        let coordinator = ReloadCoordinator::new(settings.target.clone());
        Self::with_coordinator(&settings.watch, coordinator, settings.debounce)
    }

    /// Start with a custom coordinator.
    ///
    /// # Errors
    ///
    /// Returns an error if any directory cannot be watched.
    pub fn with_coordinator(
        watch: &WatchTarget,
        coordinator: ReloadCoordinator,
        debounce: Option<Duration>,
    ) -> Result<Self, WatchError> {
        let (watcher, streams) = DirectoryWatcher::start(watch)?;
        let process_name = coordinator.target().process_name().to_string();

        let event_loop = EventLoop::new(Arc::new(coordinator)).with_debounce(debounce);
        let task = tokio::spawn(event_loop.run(streams));

        tracing::info!(dirs = %watch, process_name = %process_name, "Watching for changes");
        Ok(Self { watcher, task })
    }

    /// Canonical paths being watched.
    pub fn watched_paths(&self) -> &[PathBuf] {
        self.watcher.watched_paths()
    }

    /// Drop the subscription and wait for the loop to drain and stop.
    pub async fn shutdown(self) -> LoopStats {
        let Self { watcher, task } = self;
        drop(watcher);

        match task.await {
            Ok(stats) => stats,
            Err(e) => {
                tracing::error!("Event loop task failed: {}", e);
                LoopStats::default()
            }
        }
    }

    /// Block until SIGINT or SIGTERM, then shut down.
    pub async fn run_until_terminated(self) -> LoopStats {
        let signal = wait_for_termination().await;
        tracing::info!(signal, "Received {}, shutting down", signal);
        self.shutdown().await
    }
}

#[cfg(unix)]
async fn wait_for_termination() -> &'static str {
    use tokio::signal::unix::{SignalKind, signal};

    let mut sigterm = match signal(SignalKind::terminate()) {
        Ok(sigterm) => sigterm,
        Err(e) => {
            tracing::warn!("Failed to register SIGTERM handler: {}", e);
            return wait_for_ctrl_c().await;
        }
    };

    tokio::select! {
        _ = sigterm.recv() => "SIGTERM",
        name = wait_for_ctrl_c() => name,
    }
}

#[cfg(not(unix))]
async fn wait_for_termination() -> &'static str {
    wait_for_ctrl_c().await
}

async fn wait_for_ctrl_c() -> &'static str {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for SIGINT: {}", e);
        // Without a handler the process is stopped externally; wait for that.
        std::future::pending::<()>().await;
    }
    "SIGINT"
}

//! The loop that turns write events into reload attempts.

use crate::core::ReloadCoordinator;
use crate::error::{ReloadError, WatchError};
use crate::notify::{ChangeEvent, WatchStreams};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::time::timeout;

/// Counters collected while the loop runs, returned when it stops.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct LoopStats {
    /// Change events received
    pub events: u64,
    /// Reload attempts started
    pub reloads: u64,
    /// Attempts that delivered the signal
    pub succeeded: u64,
    /// Attempts that ended in an error
    pub failed: u64,
    /// Write events folded into an earlier attempt by the debounce window
    pub coalesced: u64,
    /// Watcher errors received
    pub watch_errors: u64,
}

/// Drains a watcher's event and error sequences.
///
/// Every write event leads to one reload attempt, run to completion before
/// the next event is taken. Other kinds are logged and dropped. Reload and
/// watcher errors are logged; none of them stop the loop. The loop returns
/// only once both sequences have closed.
///
/// With a debounce window set, writes that arrive within the window after a
/// write are folded into a single attempt.
pub struct EventLoop {
    coordinator: Arc<ReloadCoordinator>,
    debounce: Option<Duration>,
    stats: LoopStats,
}

impl EventLoop {
    /// Create a loop that reloads on every write.
    pub fn new(coordinator: Arc<ReloadCoordinator>) -> Self {
        Self {
            coordinator,
            debounce: None,
            stats: LoopStats::default(),
        }
    }

    /// Fold bursts of writes within `window` into one reload.
    ///
    /// A zero window disables debouncing.
    pub fn with_debounce(mut self, window: Option<Duration>) -> Self {
        self.debounce = window.filter(|w| !w.is_zero());
        self
    }

    /// Run until both sequences close.
    pub async fn run(mut self, streams: WatchStreams) -> LoopStats {
        let WatchStreams {
            mut events,
            mut errors,
        } = streams;
        let mut events_open = true;
        let mut errors_open = true;

        loop {
            tokio::select! {
                event = events.recv(), if events_open => match event {
                    Some(event) => self.on_event(event, &mut events).await,
                    None => {
                        tracing::debug!("Event stream closed");
                        events_open = false;
                    }
                },
                error = errors.recv(), if errors_open => match error {
                    Some(error) => self.on_error(error),
                    None => {
                        tracing::debug!("Error stream closed");
                        errors_open = false;
                    }
                },
                else => break,
            }
        }

        tracing::info!(
            events = self.stats.events,
            reloads = self.stats.reloads,
            succeeded = self.stats.succeeded,
            failed = self.stats.failed,
            "Event loop stopped"
        );
        self.stats
    }

    async fn on_event(
        &mut self,
        event: ChangeEvent,
        events: &mut mpsc::UnboundedReceiver<ChangeEvent>,
    ) {
        self.stats.events += 1;
        tracing::info!(path = %event.path.display(), kind = %event.kind, "Event: {}", event);

        if !event.kind.is_write() {
            return;
        }
        tracing::info!(path = %event.path.display(), "Modified file");

        if let Some(window) = self.debounce {
            self.absorb_burst(window, events).await;
        }

        self.reload().await;
    }

    /// Swallow events until `window` passes without a new one.
    async fn absorb_burst(
        &mut self,
        window: Duration,
        events: &mut mpsc::UnboundedReceiver<ChangeEvent>,
    ) {
        while let Ok(Some(event)) = timeout(window, events.recv()).await {
            self.stats.events += 1;
            tracing::info!(path = %event.path.display(), kind = %event.kind, "Event: {}", event);
            if event.kind.is_write() {
                self.stats.coalesced += 1;
                tracing::debug!(path = %event.path.display(), "Write folded into pending reload");
            }
        }
    }

    async fn reload(&mut self) {
        self.stats.reloads += 1;

        let coordinator = Arc::clone(&self.coordinator);
        let outcome = tokio::task::spawn_blocking(move || coordinator.reload())
            .await
            .unwrap_or_else(|e| Err(ReloadError::TaskFailed(e.to_string())));

        match outcome {
            Ok(_) => self.stats.succeeded += 1,
            Err(ReloadError::TaskFailed(reason)) => {
                tracing::error!(%reason, "Reload task failed");
                self.stats.failed += 1;
            }
            // The coordinator already logged the cause.
            Err(_) => self.stats.failed += 1,
        }
    }

    fn on_error(&mut self, error: WatchError) {
        self.stats.watch_errors += 1;
        tracing::error!("Error: {}", error);
    }
}

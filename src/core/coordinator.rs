//! Reload by name: locate the target process, then signal it.

use crate::core::ReloadTarget;
use crate::error::Result;
use crate::process::{
    ProcessHandle, ProcessLocator, ProcessSource, SignalDispatcher, SystemProcesses, SystemSignals,
};
use std::sync::Arc;

/// Composes a [`ProcessLocator`] and a [`SignalDispatcher`] into one reload
/// operation for a fixed [`ReloadTarget`].
///
/// Each call is a single best-effort attempt. Failures are logged and handed
/// back unchanged; nothing is retried.
///
/// # Examples
///
/// ```rust,no_run
/// use reload_notifier::core::{ReloadCoordinator, ReloadSignal, ReloadTarget};
///
/// let coordinator = ReloadCoordinator::new(ReloadTarget::new("producer", ReloadSignal::default()));
/// if let Ok(handle) = coordinator.reload() {
///     println!("signalled pid {}", handle.pid);
/// }
/// ```
pub struct ReloadCoordinator {
    target: ReloadTarget,
    locator: ProcessLocator,
    dispatcher: Arc<dyn SignalDispatcher>,
}

impl ReloadCoordinator {
    /// Create a coordinator that works on the local host.
    pub fn new(target: ReloadTarget) -> Self {
        Self::with_backends(target, Arc::new(SystemProcesses), Arc::new(SystemSignals))
    }

    /// Create a coordinator with custom lookup and delivery backends.
    pub fn with_backends(
        target: ReloadTarget,
        source: Arc<dyn ProcessSource>,
        dispatcher: Arc<dyn SignalDispatcher>,
    ) -> Self {
        Self {
            target,
            locator: ProcessLocator::new(source),
            dispatcher,
        }
    }

    /// The configured target.
    pub fn target(&self) -> &ReloadTarget {
        &self.target
    }

    /// Run one reload attempt.
    ///
    /// Returns the handle of the process that was signalled.
    ///
    /// # Errors
    ///
    /// Returns the lookup or delivery error as is.
    pub fn reload(&self) -> Result<ProcessHandle> {
        let name = self.target.process_name();
        let signal = self.target.signal();
        tracing::info!(process_name = name, "Reloading process");

        let outcome = self.locator.find(name).and_then(|handle| {
            tracing::info!(pid = handle.pid, "Reloading process with pid");
            self.dispatcher.deliver(&handle, signal).map(|()| handle)
        });

        match &outcome {
            Ok(handle) => tracing::info!(
                signal = %signal,
                process_name = name,
                pid = handle.pid,
                "Signal {} sent to {} (pid: {})",
                signal,
                name,
                handle.pid
            ),
            Err(e) => tracing::warn!(process_name = name, signal = %signal, "Error: {}", e),
        }

        outcome
    }
}

impl std::fmt::Debug for ReloadCoordinator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ReloadCoordinator")
            .field("target", &self.target)
            .field("locator", &self.locator)
            .finish()
    }
}

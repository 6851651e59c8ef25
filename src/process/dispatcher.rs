//! Deliver a signal to a located process.

use super::ProcessHandle;
use crate::core::ReloadSignal;
use crate::error::{ReloadError, Result};
use sysinfo::{Pid, System};

/// Sends one signal to one process.
///
/// Delivery is fire-and-forget: success means the OS accepted the signal, not
/// that the target acted on it.
pub trait SignalDispatcher: Send + Sync {
    /// Send `signal` to the process behind `handle`.
    ///
    /// # Errors
    ///
    /// - [`ReloadError::ProcessGone`] if the pid no longer exists
    /// - [`ReloadError::SignalRejected`] if the OS refused the signal
    /// - [`ReloadError::SignalUnsupported`] if the platform lacks the signal
    fn deliver(&self, handle: &ProcessHandle, signal: ReloadSignal) -> Result<()>;
}

/// Delivers signals to local processes through `sysinfo`.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemSignals;

impl SignalDispatcher for SystemSignals {
    fn deliver(&self, handle: &ProcessHandle, signal: ReloadSignal) -> Result<()> {
        let pid = Pid::from(handle.pid as usize);
        let mut sys = System::new();

        if !sys.refresh_process(pid) {
            return Err(ReloadError::ProcessGone { pid: handle.pid });
        }

        let sent = match sys.process(pid) {
            Some(process) => process.kill_with(signal.signal()),
            None => return Err(ReloadError::ProcessGone { pid: handle.pid }),
        };

        match sent {
            Some(true) => Ok(()),
            Some(false) => {
                // kill(2) failed; tell a vanished pid apart from a refusal
                if sys.refresh_process(pid) {
                    Err(ReloadError::SignalRejected {
                        pid: handle.pid,
                        signal: signal.to_string(),
                    })
                } else {
                    Err(ReloadError::ProcessGone { pid: handle.pid })
                }
            }
            None => Err(ReloadError::SignalUnsupported(signal.to_string())),
        }
    }
}

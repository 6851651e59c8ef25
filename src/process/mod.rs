//! Process lookup and signal delivery.
//!
//! Both halves sit behind a trait so the reload pipeline can run against a
//! fixed process table in tests. The system implementations use `sysinfo`.

mod dispatcher;
mod locator;

pub use dispatcher::{SignalDispatcher, SystemSignals};
pub use locator::{ProcessLocator, ProcessSource, SystemProcesses};

/// A process found by name.
///
/// Looked up fresh on every reload attempt and dropped afterwards; the target
/// may restart under a new pid between reloads.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProcessHandle {
    /// Process id
    pub pid: u32,
    /// Display name as reported by the process table
    pub name: String,
}

impl ProcessHandle {
    /// Create a handle.
    pub fn new(pid: u32, name: impl Into<String>) -> Self {
        Self {
            pid,
            name: name.into(),
        }
    }
}

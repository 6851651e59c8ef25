//! # reload-notifier
//!
//! Watch configuration directories and signal a named process to reload
//! whenever a file in them is written.
//!
//! ## Overview
//!
//! ```text
//! write in CONFIG_DIR
//!     → DirectoryWatcher (notify, non-recursive)
//!     → EventLoop (keeps write events only, one at a time)
//!     → ReloadCoordinator
//!         → ProcessLocator (full process table snapshot, exact name match)
//!         → SignalDispatcher (one signal, fire-and-forget)
//!     → outcome logged
//! ```
//!
//! Lookup and delivery failures are logged and never stop the loop. Only bad
//! settings and directories that cannot be watched stop the process, and
//! only at startup.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use reload_notifier::prelude::*;
//!
//! # async fn example() -> std::result::Result<(), Box<dyn std::error::Error>> {
//! // CONFIG_DIR=/etc/app PROCESS_NAME=app RELOAD_SIGNAL=SIGHUP
//! let settings = Settings::from_env()?;
//! let daemon = ReloadDaemon::start(&settings)?;
//! daemon.run_until_terminated().await;
//! # Ok(())
//! # }
//! ```
//!
//! ## Process name collisions
//!
//! When several processes share the configured name, the first one in the
//! process table snapshot is signalled. Snapshot order is not stable, so
//! which one receives the signal is unspecified.

#![warn(missing_docs, rust_2024_compatibility)]
#![deny(unsafe_code)]

pub mod core;
pub mod error;
pub mod logging;
pub mod notify;
pub mod process;
pub mod sources;

/// Convenient re-exports for common usage patterns.
pub mod prelude {
    pub use crate::core::{
        ReloadCoordinator, ReloadDaemon, ReloadSignal, ReloadTarget, Settings, WatchTarget,
    };
    pub use crate::error::{ConfigError, ReloadError, Result, StartupError, WatchError};
    pub use crate::notify::{ChangeEvent, ChangeKind, DirectoryWatcher, EventLoop, LoopStats};
    pub use crate::process::{ProcessHandle, ProcessLocator, ProcessSource, SignalDispatcher};
}

//! Core reload types: targets, settings, the coordinator and the daemon.

mod coordinator;
mod daemon;
mod settings;
mod target;

pub use coordinator::ReloadCoordinator;
pub use daemon::ReloadDaemon;
pub use settings::Settings;
pub use target::{DIR_DELIMITER, ReloadSignal, ReloadTarget, WatchTarget};

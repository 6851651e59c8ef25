//! Error types for reload-notifier.
//!
//! Errors fall into two groups. [`ConfigError`] and the setup variants of
//! [`WatchError`] happen before the event loop starts and end the process.
//! [`ReloadError`] and [`WatchError::Notify`] happen while running; they are
//! logged and absorbed by the event loop.

use std::path::PathBuf;

/// Result type alias for reload attempts.
pub type Result<T> = std::result::Result<T, ReloadError>;

/// Errors raised while reading startup settings.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// A required variable is unset or empty.
    #[error("{0} env var is missing")]
    MissingVar(&'static str),

    /// The reload signal name is not recognised.
    #[error("Unknown signal for RELOAD_SIGNAL: {0}")]
    UnknownSignal(String),

    /// A variable is set but its value is unusable.
    #[error("Invalid value for {var}: {reason}")]
    InvalidValue {
        /// The variable name
        var: &'static str,
        /// Why the value was rejected
        reason: String,
    },

    /// The settings could not be collected from the environment.
    #[error("Failed to load settings: {0}")]
    LoadError(String),
}

/// Errors raised by the directory watcher.
#[derive(Debug, thiserror::Error)]
pub enum WatchError {
    /// The notification backend could not be created.
    #[error("Failed to create file watcher: {0}")]
    Init(String),

    /// A configured path could not be subscribed to.
    #[error("Failed to watch {}: {reason}", path.display())]
    Subscribe {
        /// The configured path
        path: PathBuf,
        /// The underlying failure
        reason: String,
    },

    /// The notification backend reported a fault after setup.
    #[error("Watch error: {0}")]
    Notify(String),
}

/// Errors raised by a single reload attempt.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ReloadError {
    /// The process table could not be read.
    #[error("cannot list processes: {0}")]
    ListFailed(String),

    /// No running process has the configured name.
    #[error("cannot find a process called {0}")]
    NotFound(String),

    /// The process exited between lookup and delivery.
    #[error("cannot send signal: process {pid} no longer exists")]
    ProcessGone {
        /// The pid that was looked up
        pid: u32,
    },

    /// The process exists but did not accept the signal.
    #[error("cannot send signal: {signal} to pid {pid} was rejected")]
    SignalRejected {
        /// Target pid
        pid: u32,
        /// Signal name
        signal: String,
    },

    /// The platform cannot deliver this signal.
    #[error("cannot send signal: {0} is not supported on this platform")]
    SignalUnsupported(String),

    /// The blocking reload task did not complete.
    #[error("reload task failed: {0}")]
    TaskFailed(String),
}

/// Errors that stop the daemon from starting.
#[derive(Debug, thiserror::Error)]
pub enum StartupError {
    /// Settings were missing or invalid.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// A directory could not be watched.
    #[error(transparent)]
    Watch(#[from] WatchError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_var_message() {
        let err = ConfigError::MissingVar("CONFIG_DIR");
        assert_eq!(err.to_string(), "CONFIG_DIR env var is missing");
    }

    #[test]
    fn test_reload_error_messages() {
        assert_eq!(
            ReloadError::NotFound("producer".into()).to_string(),
            "cannot find a process called producer"
        );
        assert_eq!(
            ReloadError::ProcessGone { pid: 42 }.to_string(),
            "cannot send signal: process 42 no longer exists"
        );
    }

    #[test]
    fn test_startup_error_is_transparent() {
        let err: StartupError = ConfigError::UnknownSignal("SIGFOO".into()).into();
        assert_eq!(err.to_string(), "Unknown signal for RELOAD_SIGNAL: SIGFOO");
    }
}

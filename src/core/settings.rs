//! Validated startup settings.

use crate::core::{ReloadSignal, ReloadTarget, WatchTarget};
use crate::error::ConfigError;
use crate::sources::{CONFIG_DIR, EnvSource, PROCESS_NAME, RELOAD_DEBOUNCE_MS, RawSettings};
use std::time::Duration;

/// Everything the daemon needs, checked once before anything is watched.
///
/// # Examples
///
/// ```rust
/// use reload_notifier::core::Settings;
/// use reload_notifier::sources::EnvSource;
///
/// let settings = Settings::load(&EnvSource::from_vars([
///     ("CONFIG_DIR", "/etc/app"),
///     ("PROCESS_NAME", "app"),
/// ]))
/// .unwrap();
/// assert_eq!(settings.target.signal().to_string(), "SIGHUP");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    /// Directories to watch
    pub watch: WatchTarget,
    /// Process and signal to use on reload
    pub target: ReloadTarget,
    /// Optional window for folding bursts of writes
    pub debounce: Option<Duration>,
    /// Whether `RELOAD_SIGNAL` was unset and the default applied
    pub default_signal: bool,
}

impl Settings {
    /// Load settings from the process environment.
    ///
    /// # Errors
    ///
    /// See [`Settings::load`].
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::load(&EnvSource::new())
    }

    /// Load and validate settings from a source.
    ///
    /// # Errors
    ///
    /// Returns an error if `CONFIG_DIR` or `PROCESS_NAME` is missing, the
    /// directory list has an empty entry, the signal name is unknown, or the
    /// debounce value is not a whole number of milliseconds.
    pub fn load(source: &EnvSource) -> Result<Self, ConfigError> {
        Self::from_raw(source.load()?)
    }

    /// Validate raw values.
    pub fn from_raw(raw: RawSettings) -> Result<Self, ConfigError> {
        let dirs = raw.config_dir.ok_or(ConfigError::MissingVar(CONFIG_DIR))?;
        let process_name = raw.process_name.ok_or(ConfigError::MissingVar(PROCESS_NAME))?;

        let watch = WatchTarget::from_list(&dirs)?;

        let (signal, default_signal) = match raw.reload_signal {
            Some(name) => (name.parse::<ReloadSignal>()?, false),
            None => (ReloadSignal::default(), true),
        };

        let debounce = match raw.reload_debounce_ms {
            Some(ms) => {
                let ms: u64 = ms.trim().parse().map_err(|e| ConfigError::InvalidValue {
                    var: RELOAD_DEBOUNCE_MS,
                    reason: format!("{:?} is not a number of milliseconds: {}", ms, e),
                })?;
                Some(Duration::from_millis(ms)).filter(|d| !d.is_zero())
            }
            None => None,
        };

        Ok(Self {
            watch,
            target: ReloadTarget::new(process_name, signal),
            debounce,
            default_signal,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sources::RELOAD_SIGNAL;
    use std::path::PathBuf;
    use sysinfo::Signal;

    fn load(vars: &[(&str, &str)]) -> Result<Settings, ConfigError> {
        Settings::load(&EnvSource::from_vars(vars.iter().copied()))
    }

    #[test]
    fn test_minimal_settings() {
        let settings = load(&[(CONFIG_DIR, "/cfg"), (PROCESS_NAME, "producer")]).unwrap();

        assert_eq!(settings.watch.dirs(), &[PathBuf::from("/cfg")]);
        assert_eq!(settings.target.process_name(), "producer");
        assert_eq!(settings.target.signal().signal(), Signal::Hangup);
        assert!(settings.default_signal);
        assert_eq!(settings.debounce, None);
    }

    #[test]
    fn test_missing_config_dir() {
        let err = load(&[(PROCESS_NAME, "producer")]).unwrap_err();
        assert!(matches!(err, ConfigError::MissingVar("CONFIG_DIR")));
    }

    #[test]
    fn test_missing_process_name() {
        let err = load(&[(CONFIG_DIR, "/cfg")]).unwrap_err();
        assert!(matches!(err, ConfigError::MissingVar("PROCESS_NAME")));
    }

    #[test]
    fn test_explicit_signal() {
        let settings = load(&[
            (CONFIG_DIR, "/cfg"),
            (PROCESS_NAME, "producer"),
            (RELOAD_SIGNAL, "SIGUSR2"),
        ])
        .unwrap();
        assert_eq!(settings.target.signal().signal(), Signal::User2);
        assert!(!settings.default_signal);
    }

    #[test]
    fn test_unknown_signal() {
        let err = load(&[
            (CONFIG_DIR, "/cfg"),
            (PROCESS_NAME, "producer"),
            (RELOAD_SIGNAL, "SIGNOPE"),
        ])
        .unwrap_err();
        assert!(matches!(err, ConfigError::UnknownSignal(_)));
    }

    #[test]
    fn test_debounce_values() {
        let base = [(CONFIG_DIR, "/cfg"), (PROCESS_NAME, "producer")];

        let with = |ms: &'static str| {
            let mut vars = base.to_vec();
            vars.push((RELOAD_DEBOUNCE_MS, ms));
            load(&vars)
        };

        assert_eq!(with("250").unwrap().debounce, Some(Duration::from_millis(250)));
        assert_eq!(with("0").unwrap().debounce, None);
        assert!(matches!(
            with("soon").unwrap_err(),
            ConfigError::InvalidValue { var: "RELOAD_DEBOUNCE_MS", .. }
        ));
        assert!(with("-5").is_err());
    }

    #[test]
    fn test_bad_directory_list() {
        let err = load(&[(CONFIG_DIR, "/cfg,,/other"), (PROCESS_NAME, "producer")]).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue { var: "CONFIG_DIR", .. }));
    }
}

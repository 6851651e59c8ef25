//! What to watch and whom to notify.

use crate::error::ConfigError;
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use sysinfo::Signal;

/// Separator used in the directory list.
pub const DIR_DELIMITER: char = ',';

/// Signal names accepted for the reload signal, without the `SIG` prefix.
///
/// The first entry for a given [`Signal`] is the one used for display.
const SIGNAL_NAMES: &[(&str, Signal)] = &[
    ("HUP", Signal::Hangup),
    ("INT", Signal::Interrupt),
    ("QUIT", Signal::Quit),
    ("ILL", Signal::Illegal),
    ("TRAP", Signal::Trap),
    ("ABRT", Signal::Abort),
    ("IOT", Signal::IOT),
    ("BUS", Signal::Bus),
    ("FPE", Signal::FloatingPointException),
    ("KILL", Signal::Kill),
    ("USR1", Signal::User1),
    ("SEGV", Signal::Segv),
    ("USR2", Signal::User2),
    ("PIPE", Signal::Pipe),
    ("ALRM", Signal::Alarm),
    ("TERM", Signal::Term),
    ("CHLD", Signal::Child),
    ("CONT", Signal::Continue),
    ("STOP", Signal::Stop),
    ("TSTP", Signal::TSTP),
    ("TTIN", Signal::TTIN),
    ("TTOU", Signal::TTOU),
    ("URG", Signal::Urgent),
    ("XCPU", Signal::XCPU),
    ("XFSZ", Signal::XFSZ),
    ("VTALRM", Signal::VirtualAlarm),
    ("PROF", Signal::Profiling),
    ("WINCH", Signal::Winch),
    ("IO", Signal::IO),
    ("POLL", Signal::Poll),
    ("PWR", Signal::Power),
    ("SYS", Signal::Sys),
];

/// The signal delivered to the target process on every reload.
///
/// Parses `SIGHUP`, `HUP` and `sighup` alike. Displays as `SIGHUP`.
///
/// # Examples
///
/// ```rust
/// use reload_notifier::core::ReloadSignal;
///
/// let signal: ReloadSignal = "usr1".parse().unwrap();
/// assert_eq!(signal.to_string(), "SIGUSR1");
/// assert_eq!(ReloadSignal::default().to_string(), "SIGHUP");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReloadSignal(Signal);

impl ReloadSignal {
    /// Wrap a platform signal.
    pub fn new(signal: Signal) -> Self {
        Self(signal)
    }

    /// The underlying platform signal.
    pub fn signal(&self) -> Signal {
        self.0
    }

    /// The short name without the `SIG` prefix.
    pub fn short_name(&self) -> &'static str {
        SIGNAL_NAMES
            .iter()
            .find(|(_, sig)| *sig == self.0)
            .map(|(name, _)| *name)
            .unwrap_or("UNKNOWN")
    }
}

impl Default for ReloadSignal {
    fn default() -> Self {
        Self(Signal::Hangup)
    }
}

impl From<ReloadSignal> for Signal {
    fn from(signal: ReloadSignal) -> Self {
        signal.0
    }
}

impl fmt::Display for ReloadSignal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "SIG{}", self.short_name())
    }
}

impl FromStr for ReloadSignal {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let upper = s.trim().to_ascii_uppercase();
        let short = upper.strip_prefix("SIG").unwrap_or(&upper);
        SIGNAL_NAMES
            .iter()
            .find(|(name, _)| *name == short)
            .map(|(_, sig)| Self(*sig))
            .ok_or_else(|| ConfigError::UnknownSignal(s.to_string()))
    }
}

/// Who receives the reload signal.
///
/// Set once at startup and shared read-only by every reload attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReloadTarget {
    process_name: String,
    signal: ReloadSignal,
}

impl ReloadTarget {
    /// Create a target for the given process name and signal.
    pub fn new(process_name: impl Into<String>, signal: ReloadSignal) -> Self {
        Self {
            process_name: process_name.into(),
            signal,
        }
    }

    /// Exact name matched against the process table.
    pub fn process_name(&self) -> &str {
        &self.process_name
    }

    /// Signal delivered on each reload.
    pub fn signal(&self) -> ReloadSignal {
        self.signal
    }
}

/// Ordered set of directories to watch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WatchTarget {
    dirs: Vec<PathBuf>,
}

impl WatchTarget {
    /// Build a target from explicit paths, dropping duplicates.
    ///
    /// # Errors
    ///
    /// Returns an error if no paths are given.
    pub fn new<I, P>(paths: I) -> Result<Self, ConfigError>
    where
        I: IntoIterator<Item = P>,
        P: Into<PathBuf>,
    {
        let mut dirs: Vec<PathBuf> = Vec::new();
        for path in paths {
            let path = path.into();
            if !dirs.contains(&path) {
                dirs.push(path);
            }
        }

        if dirs.is_empty() {
            return Err(ConfigError::MissingVar("CONFIG_DIR"));
        }

        Ok(Self { dirs })
    }

    /// Parse a comma-separated directory list.
    ///
    /// Segments are trimmed. An empty segment (`a,,b` or a trailing comma) is
    /// rejected rather than silently skipped.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use reload_notifier::core::WatchTarget;
    ///
    /// let target = WatchTarget::from_list("/etc/app, /etc/app/conf.d").unwrap();
    /// assert_eq!(target.dirs().len(), 2);
    /// ```
    pub fn from_list(list: &str) -> Result<Self, ConfigError> {
        let mut paths = Vec::new();
        for segment in list.split(DIR_DELIMITER) {
            let segment = segment.trim();
            if segment.is_empty() {
                return Err(ConfigError::InvalidValue {
                    var: "CONFIG_DIR",
                    reason: format!("empty path in list {:?}", list),
                });
            }
            paths.push(PathBuf::from(segment));
        }
        Self::new(paths)
    }

    /// Directories in configuration order.
    pub fn dirs(&self) -> &[PathBuf] {
        &self.dirs
    }

    /// Iterate over the directories.
    pub fn iter(&self) -> impl Iterator<Item = &Path> {
        self.dirs.iter().map(PathBuf::as_path)
    }
}

impl fmt::Display for WatchTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, dir) in self.dirs.iter().enumerate() {
            if i > 0 {
                write!(f, "{}", DIR_DELIMITER)?;
            }
            write!(f, "{}", dir.display())?;
        }
        Ok(())
    }
}

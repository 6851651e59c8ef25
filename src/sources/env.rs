//! Environment variable settings source.

use crate::error::ConfigError;
use config::{Environment, Map};
use serde::Deserialize;
use std::ffi::OsString;

/// Directories to watch, comma separated.
pub const CONFIG_DIR: &str = "CONFIG_DIR";
/// Exact name of the process to signal.
pub const PROCESS_NAME: &str = "PROCESS_NAME";
/// Signal name, `SIGHUP` when unset.
pub const RELOAD_SIGNAL: &str = "RELOAD_SIGNAL";
/// Debounce window in milliseconds, disabled when unset or zero.
pub const RELOAD_DEBOUNCE_MS: &str = "RELOAD_DEBOUNCE_MS";

const VARS: [&str; 4] = [CONFIG_DIR, PROCESS_NAME, RELOAD_SIGNAL, RELOAD_DEBOUNCE_MS];

/// Raw values as read from the environment, before validation.
///
/// Empty strings are normalised to `None`.
#[derive(Debug, Default, Clone, PartialEq, Eq, Deserialize)]
pub struct RawSettings {
    /// Value of `CONFIG_DIR`
    #[serde(default)]
    pub config_dir: Option<String>,
    /// Value of `PROCESS_NAME`
    #[serde(default)]
    pub process_name: Option<String>,
    /// Value of `RELOAD_SIGNAL`
    #[serde(default)]
    pub reload_signal: Option<String>,
    /// Value of `RELOAD_DEBOUNCE_MS`
    #[serde(default)]
    pub reload_debounce_ms: Option<String>,
}

/// Environment variable source for startup settings.
///
/// Reads the process environment by default. Only the variables this crate
/// knows are read; anything else in the environment is ignored, whatever its
/// encoding. Tests and embedders can supply an explicit variable map instead,
/// which leaves the real environment alone.
///
/// # Examples
///
/// ```rust
/// use reload_notifier::sources::EnvSource;
///
/// let source = EnvSource::from_vars([("CONFIG_DIR", "/etc/app"), ("PROCESS_NAME", "app")]);
/// let raw = source.load().unwrap();
/// assert_eq!(raw.process_name.as_deref(), Some("app"));
/// ```
#[derive(Debug, Default, Clone)]
pub struct EnvSource {
    vars: Option<Map<String, String>>,
}

impl EnvSource {
    /// Read from the process environment.
    pub fn new() -> Self {
        Self { vars: None }
    }

    /// Read from an explicit set of variables.
    pub fn from_vars<I, K, V>(vars: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            vars: Some(
                vars.into_iter()
                    .map(|(k, v)| (k.into(), v.into()))
                    .collect(),
            ),
        }
    }

    /// Collect the raw settings.
    ///
    /// # Errors
    ///
    /// Returns an error if a variable is not valid UTF-8, or if the values
    /// cannot be deserialized.
    pub fn load(&self) -> Result<RawSettings, ConfigError> {
        let vars = match &self.vars {
            Some(vars) => vars.clone(),
            None => collect_vars(|var| std::env::var_os(var))?,
        };

        // Use the config crate's Environment source; keys arrive lowercased.
        let env_source = Environment::default().source(Some(vars));

        let config = config::Config::builder()
            .add_source(env_source)
            .build()
            .map_err(|e| {
                ConfigError::LoadError(format!("Failed to load environment variables: {}", e))
            })?;

        let raw = config.try_deserialize::<RawSettings>().map_err(|e| {
            ConfigError::LoadError(format!("Failed to parse environment variables: {}", e))
        })?;

        Ok(RawSettings {
            config_dir: non_empty(raw.config_dir),
            process_name: non_empty(raw.process_name),
            reload_signal: non_empty(raw.reload_signal),
            reload_debounce_ms: non_empty(raw.reload_debounce_ms),
        })
    }
}

/// Look up each known variable, rejecting values that are not UTF-8.
fn collect_vars<F>(lookup: F) -> Result<Map<String, String>, ConfigError>
where
    F: Fn(&str) -> Option<OsString>,
{
    let mut vars = Map::new();
    for var in VARS {
        let Some(value) = lookup(var) else {
            continue;
        };
        let value = value.into_string().map_err(|value| ConfigError::InvalidValue {
            var,
            reason: format!("{:?} is not valid UTF-8", value),
        })?;
        vars.insert(var.to_string(), value);
    }
    Ok(vars)
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

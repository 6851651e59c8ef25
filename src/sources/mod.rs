//! Startup settings sources.

mod env;

pub use env::{
    CONFIG_DIR, EnvSource, PROCESS_NAME, RELOAD_DEBOUNCE_MS, RELOAD_SIGNAL, RawSettings,
};

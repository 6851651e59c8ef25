//! Settings read from the real process environment.
//!
//! Kept to a single test: it mutates the environment of this test binary.

#![allow(unsafe_code)] // For env var manipulation in tests
#![cfg(unix)]

use reload_notifier::prelude::*;
use std::env;
use std::ffi::OsStr;
use std::os::unix::ffi::OsStrExt;

#[test]
fn test_from_env_with_non_utf8_variables() {
    unsafe {
        env::set_var("RELOAD_NOTIFIER_TEST_BYTES", OsStr::from_bytes(b"f\xffo"));
        env::set_var("CONFIG_DIR", "/etc/producer");
        env::set_var("PROCESS_NAME", "producer");
        env::remove_var("RELOAD_SIGNAL");
        env::remove_var("RELOAD_DEBOUNCE_MS");
    }

    // Unrelated variables are never read.
    let settings = Settings::from_env().unwrap();
    assert_eq!(settings.target.process_name(), "producer");
    assert!(settings.default_signal);

    unsafe {
        env::set_var("PROCESS_NAME", OsStr::from_bytes(b"prod\xffucer"));
    }

    let err = Settings::from_env().unwrap_err();
    assert!(matches!(
        err,
        ConfigError::InvalidValue {
            var: "PROCESS_NAME",
            ..
        }
    ));

    let err: StartupError = err.into();
    assert!(
        err.to_string()
            .starts_with("Invalid value for PROCESS_NAME: ")
    );

    unsafe {
        env::remove_var("RELOAD_NOTIFIER_TEST_BYTES");
        env::remove_var("CONFIG_DIR");
        env::remove_var("PROCESS_NAME");
    }
}

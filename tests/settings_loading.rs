//! Integration tests for startup settings.

use reload_notifier::prelude::*;
use reload_notifier::sources::EnvSource;
use std::path::PathBuf;
use std::time::Duration;

fn settings(vars: &[(&str, &str)]) -> std::result::Result<Settings, ConfigError> {
    Settings::load(&EnvSource::from_vars(vars.iter().copied()))
}

#[test]
fn test_full_settings() {
    let settings = settings(&[
        ("CONFIG_DIR", "/etc/producer, /etc/producer/conf.d"),
        ("PROCESS_NAME", "producer"),
        ("RELOAD_SIGNAL", "SIGUSR1"),
        ("RELOAD_DEBOUNCE_MS", "500"),
    ])
    .unwrap();

    assert_eq!(
        settings.watch.dirs(),
        &[
            PathBuf::from("/etc/producer"),
            PathBuf::from("/etc/producer/conf.d")
        ]
    );
    assert_eq!(settings.target.process_name(), "producer");
    assert_eq!(settings.target.signal().to_string(), "SIGUSR1");
    assert_eq!(settings.debounce, Some(Duration::from_millis(500)));
}

#[test]
fn test_default_signal_is_sighup() {
    let settings = settings(&[("CONFIG_DIR", "/cfg"), ("PROCESS_NAME", "producer")]).unwrap();
    assert_eq!(settings.target.signal(), ReloadSignal::default());
    assert_eq!(settings.target.signal().to_string(), "SIGHUP");
    assert!(settings.default_signal);
}

#[test]
fn test_startup_error_messages() {
    let cases: [(&[(&str, &str)], &str); 3] = [
        (&[("PROCESS_NAME", "producer")], "CONFIG_DIR env var is missing"),
        (&[("CONFIG_DIR", "/cfg")], "PROCESS_NAME env var is missing"),
        (
            &[
                ("CONFIG_DIR", "/cfg"),
                ("PROCESS_NAME", "producer"),
                ("RELOAD_SIGNAL", "SIGWHATEVER"),
            ],
            "Unknown signal for RELOAD_SIGNAL: SIGWHATEVER",
        ),
    ];

    for (vars, message) in cases {
        let err: StartupError = settings(vars).unwrap_err().into();
        assert_eq!(err.to_string(), message);
    }
}

#[test]
fn test_process_name_is_kept_verbatim() {
    let settings = settings(&[("CONFIG_DIR", "/cfg"), ("PROCESS_NAME", "My Producer")]).unwrap();
    assert_eq!(settings.target.process_name(), "My Producer");
}

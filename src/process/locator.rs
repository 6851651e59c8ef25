//! Find a running process by name.

use super::ProcessHandle;
use crate::error::{ReloadError, Result};
use std::path::Path;
use std::sync::Arc;
use sysinfo::{ProcessRefreshKind, System, ThreadKind, UpdateKind};

/// Longest name the Linux kernel keeps for a process (`TASK_COMM_LEN - 1`).
const SHORT_NAME_LEN: usize = 15;

/// Source of process table snapshots.
///
/// Implement this trait to look processes up somewhere other than the local
/// host, or to feed a fixed table in tests.
pub trait ProcessSource: Send + Sync {
    /// Take a snapshot of every running process.
    ///
    /// # Errors
    ///
    /// Returns [`ReloadError::ListFailed`] if the table cannot be read.
    fn processes(&self) -> Result<Vec<ProcessHandle>>;

    /// Human-readable name for this source (for logging/debugging).
    fn name(&self) -> String;
}

/// Process table of the local host, read through `sysinfo`.
///
/// Threads are left out; only whole processes can be targets. Names cut short
/// by the kernel are restored from the command line or executable path.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemProcesses;

impl ProcessSource for SystemProcesses {
    fn processes(&self) -> Result<Vec<ProcessHandle>> {
        if !sysinfo::IS_SUPPORTED_SYSTEM {
            return Err(ReloadError::ListFailed(format!(
                "process listing is not supported on {}",
                std::env::consts::OS
            )));
        }

        let mut sys = System::new();
        sys.refresh_processes_specifics(
            ProcessRefreshKind::new()
                .with_cmd(UpdateKind::OnlyIfNotSet)
                .with_exe(UpdateKind::OnlyIfNotSet),
        );

        Ok(sys
            .processes()
            .iter()
            .filter(|(_, process)| process.thread_kind() != Some(ThreadKind::Userland))
            .map(|(pid, process)| {
                let name = full_name(process.name(), process.cmd(), process.exe());
                ProcessHandle::new(pid.as_u32(), name)
            })
            .collect())
    }

    fn name(&self) -> String {
        "system".to_string()
    }
}

/// Undo the kernel's truncation of long process names.
///
/// A name shorter than [`SHORT_NAME_LEN`] is complete. Otherwise the file name
/// of `argv[0]`, then of the executable, is used if it extends the short name.
fn full_name(short: &str, cmd: &[String], exe: Option<&Path>) -> String {
    if short.len() < SHORT_NAME_LEN {
        return short.to_string();
    }

    cmd.first()
        .map(Path::new)
        .into_iter()
        .chain(exe)
        .filter_map(|path| path.file_name()?.to_str())
        .find(|candidate| candidate.starts_with(short))
        .unwrap_or(short)
        .to_string()
}

/// Looks up processes by exact name.
///
/// Every call takes a new snapshot. When several processes share the name,
/// the first one in snapshot order is returned; that order is not stable, so
/// which of them wins is unspecified.
///
/// # Examples
///
/// ```rust,no_run
/// use reload_notifier::process::ProcessLocator;
///
/// let locator = ProcessLocator::system();
/// match locator.find("nginx") {
///     Ok(handle) => println!("nginx is pid {}", handle.pid),
///     Err(e) => println!("{}", e),
/// }
/// ```
#[derive(Clone)]
pub struct ProcessLocator {
    source: Arc<dyn ProcessSource>,
}

impl ProcessLocator {
    /// Create a locator over the given source.
    pub fn new(source: Arc<dyn ProcessSource>) -> Self {
        Self { source }
    }

    /// Create a locator over the local process table.
    pub fn system() -> Self {
        Self::new(Arc::new(SystemProcesses))
    }

    /// Find the first process whose name equals `name` exactly.
    ///
    /// # Errors
    ///
    /// - [`ReloadError::ListFailed`] if the snapshot cannot be taken
    /// - [`ReloadError::NotFound`] if no process matches
    pub fn find(&self, name: &str) -> Result<ProcessHandle> {
        tracing::info!(process_name = name, source = %self.source.name(), "Searching for process");

        let found = self
            .source
            .processes()?
            .into_iter()
            .find(|process| process.name == name);

        match found {
            Some(handle) => {
                tracing::info!(process_name = %handle.name, pid = handle.pid, "Process found");
                Ok(handle)
            }
            None => Err(ReloadError::NotFound(name.to_string())),
        }
    }
}

impl std::fmt::Debug for ProcessLocator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProcessLocator")
            .field("source", &self.source.name())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct MockSource {
        table: Result<Vec<ProcessHandle>>,
    }

    impl MockSource {
        fn with_processes(processes: &[(u32, &str)]) -> Self {
            Self {
                table: Ok(processes
                    .iter()
                    .map(|(pid, name)| ProcessHandle::new(*pid, *name))
                    .collect()),
            }
        }

        fn failing(reason: &str) -> Self {
            Self {
                table: Err(ReloadError::ListFailed(reason.to_string())),
            }
        }
    }

    impl ProcessSource for MockSource {
        fn processes(&self) -> Result<Vec<ProcessHandle>> {
            self.table.clone()
        }

        fn name(&self) -> String {
            "mock".to_string()
        }
    }

    fn locator(source: MockSource) -> ProcessLocator {
        ProcessLocator::new(Arc::new(source))
    }

    #[test]
    fn test_find_exact_match() {
        let locator = locator(MockSource::with_processes(&[
            (1, "init"),
            (200, "producer"),
            (300, "consumer"),
        ]));

        let handle = locator.find("producer").unwrap();
        assert_eq!(handle, ProcessHandle::new(200, "producer"));
    }

    #[test]
    fn test_find_is_not_substring_or_case_insensitive() {
        let locator = locator(MockSource::with_processes(&[
            (10, "producer-v2"),
            (11, "Producer"),
            (12, "my-producer"),
        ]));

        let err = locator.find("producer").unwrap_err();
        assert_eq!(err, ReloadError::NotFound("producer".to_string()));
    }

    #[test]
    fn test_find_returns_first_of_duplicates() {
        let locator = locator(MockSource::with_processes(&[
            (5, "worker"),
            (6, "worker"),
            (7, "worker"),
        ]));

        let handle = locator.find("worker").unwrap();
        assert_eq!(handle.pid, 5);
    }

    #[test]
    fn test_list_failure_propagates() {
        let locator = locator(MockSource::failing("permission denied"));
        let err = locator.find("producer").unwrap_err();
        assert_eq!(err, ReloadError::ListFailed("permission denied".to_string()));
    }

    #[test]
    fn test_empty_table_is_not_found() {
        let locator = locator(MockSource::with_processes(&[]));
        assert!(matches!(locator.find("x"), Err(ReloadError::NotFound(_))));
    }

    #[test]
    fn test_system_snapshot_contains_self() {
        let table = SystemProcesses.processes().unwrap();
        let me = std::process::id();
        assert!(table.iter().any(|p| p.pid == me));
    }

    #[cfg(target_os = "linux")]
    #[test]
    fn test_system_snapshot_skips_threads() {
        use std::sync::mpsc;

        let (tid_tx, tid_rx) = mpsc::channel();
        let (done_tx, done_rx) = mpsc::channel::<()>();
        let worker = std::thread::spawn(move || {
            // "<pid>/task/<tid>"
            let link = std::fs::read_link("/proc/thread-self").unwrap();
            let tid: u32 = link.file_name().unwrap().to_str().unwrap().parse().unwrap();
            tid_tx.send(tid).unwrap();
            let _ = done_rx.recv();
        });

        let tid = tid_rx.recv().unwrap();
        let table = SystemProcesses.processes().unwrap();
        done_tx.send(()).unwrap();
        worker.join().unwrap();

        assert_ne!(tid, std::process::id());
        assert!(table.iter().any(|p| p.pid == std::process::id()));
        assert!(table.iter().all(|p| p.pid != tid));
    }

    #[test]
    fn test_short_names_are_kept() {
        let cmd = vec!["/usr/sbin/nginx".to_string()];
        assert_eq!(full_name("nginx", &cmd, None), "nginx");
        assert_eq!(full_name("producer", &[], None), "producer");
    }

    #[test]
    fn test_truncated_name_restored_from_command_line() {
        let cmd = vec![
            "/usr/bin/config-consumer-svc".to_string(),
            "--port".to_string(),
            "8080".to_string(),
        ];
        assert_eq!(
            full_name("config-consumer", &cmd, None),
            "config-consumer-svc"
        );
    }

    #[test]
    fn test_truncated_name_restored_from_executable() {
        let cmd = vec!["worker: idle".to_string()];
        let exe = Path::new("/opt/app/config-consumer-svc");
        assert_eq!(
            full_name("config-consumer", &cmd, Some(exe)),
            "config-consumer-svc"
        );
    }

    #[test]
    fn test_truncated_name_kept_when_nothing_extends_it() {
        let cmd = vec!["/usr/bin/python3".to_string(), "serve.py".to_string()];
        let exe = Path::new("/usr/bin/python3.12");
        assert_eq!(
            full_name("config-consumer", &cmd, Some(exe)),
            "config-consumer"
        );
    }

    #[test]
    fn test_long_process_name_is_found() {
        let name = full_name(
            "config-consumer",
            &["/usr/bin/config-consumer-svc".to_string()],
            None,
        );
        let locator = locator(MockSource::with_processes(&[(900, name.as_str())]));

        assert_eq!(locator.find("config-consumer-svc").unwrap().pid, 900);
    }
}

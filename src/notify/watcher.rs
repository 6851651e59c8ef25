//! Directory watching.

use crate::core::WatchTarget;
use crate::error::WatchError;
use crate::notify::ChangeEvent;
use notify::{Event, RecommendedWatcher, RecursiveMode, Watcher as NotifyWatcher};
use std::path::{Path, PathBuf};
use tokio::sync::mpsc;

/// The two sequences produced by a [`DirectoryWatcher`].
///
/// Both are unbounded and end only when the watcher is dropped.
#[derive(Debug)]
pub struct WatchStreams {
    /// Classified change events, in the order the backend reported them.
    pub events: mpsc::UnboundedReceiver<ChangeEvent>,
    /// Faults reported by the backend after setup.
    pub errors: mpsc::UnboundedReceiver<WatchError>,
}

/// Watches directories for changes.
///
/// Uses the `notify` crate's recommended backend (inotify on Linux). Watches
/// are non-recursive: subdirectories need their own entry.
///
/// # Examples
///
/// ```rust,no_run
/// use reload_notifier::core::WatchTarget;
/// use reload_notifier::notify::DirectoryWatcher;
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let target = WatchTarget::from_list("/etc/app")?;
/// let (watcher, mut streams) = DirectoryWatcher::start(&target)?;
///
/// while let Some(event) = streams.events.recv().await {
///     println!("{}", event);
/// }
/// # drop(watcher);
/// # Ok(())
/// # }
/// ```
pub struct DirectoryWatcher {
    watcher: RecommendedWatcher,
    watched_paths: Vec<PathBuf>,
}

impl DirectoryWatcher {
    /// Create a watcher with nothing subscribed yet.
    ///
    /// # Errors
    ///
    /// Returns an error if the notification backend cannot be created.
    pub fn new() -> Result<(Self, WatchStreams), WatchError> {
        let (event_tx, event_rx) = mpsc::unbounded_channel::<ChangeEvent>();
        let (error_tx, error_rx) = mpsc::unbounded_channel::<WatchError>();

        let watcher = notify::recommended_watcher(move |res: notify::Result<Event>| match res {
            Ok(event) => {
                for change in ChangeEvent::from_notify(event) {
                    let _ = event_tx.send(change);
                }
            }
            Err(e) => {
                let _ = error_tx.send(WatchError::Notify(e.to_string()));
            }
        })
        .map_err(|e| WatchError::Init(e.to_string()))?;

        Ok((
            Self {
                watcher,
                watched_paths: Vec::new(),
            },
            WatchStreams {
                events: event_rx,
                errors: error_rx,
            },
        ))
    }

    /// Create a watcher and subscribe every directory in `target`.
    ///
    /// # Errors
    ///
    /// Returns the first subscription failure. Nothing is left watching in
    /// that case.
    pub fn start(target: &WatchTarget) -> Result<(Self, WatchStreams), WatchError> {
        let (mut watcher, streams) = Self::new()?;
        for dir in target.iter() {
            watcher.watch(dir)?;
        }
        Ok((watcher, streams))
    }

    /// Add a path to watch for changes.
    ///
    /// # Errors
    ///
    /// Returns an error if the path cannot be watched (e.g., doesn't exist).
    pub fn watch(&mut self, path: impl AsRef<Path>) -> Result<(), WatchError> {
        let path = path.as_ref();

        let canonical_path = path.canonicalize().map_err(|e| WatchError::Subscribe {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;

        self.watcher
            .watch(&canonical_path, RecursiveMode::NonRecursive)
            .map_err(|e| WatchError::Subscribe {
                path: path.to_path_buf(),
                reason: e.to_string(),
            })?;

        if !self.watched_paths.contains(&canonical_path) {
            tracing::debug!(path = %canonical_path.display(), "Watching directory");
            self.watched_paths.push(canonical_path);
        }

        Ok(())
    }

    /// Get a list of currently watched paths (canonicalised).
    pub fn watched_paths(&self) -> &[PathBuf] {
        &self.watched_paths
    }
}

impl std::fmt::Debug for DirectoryWatcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DirectoryWatcher")
            .field("watched_paths", &self.watched_paths)
            .finish()
    }
}

//! Change events after classification.

use notify::EventKind;
use notify::event::ModifyKind;
use std::fmt;
use std::path::PathBuf;

/// What happened to a watched path.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChangeKind {
    /// File contents were written.
    Write,
    /// A file or directory was created.
    Create,
    /// A file or directory was removed.
    Remove,
    /// A file or directory was renamed.
    Rename,
    /// Permissions or other metadata changed.
    Chmod,
    /// Access events and anything the backend could not classify.
    Other,
}

impl ChangeKind {
    /// Map a `notify` event kind onto a change kind.
    ///
    /// Backends that cannot tell what kind of modification happened report
    /// `Modify(Any)`; that is treated as a write.
    pub fn from_notify(kind: &EventKind) -> Self {
        match kind {
            EventKind::Modify(ModifyKind::Data(_))
            | EventKind::Modify(ModifyKind::Any)
            | EventKind::Modify(ModifyKind::Other) => ChangeKind::Write,
            EventKind::Modify(ModifyKind::Metadata(_)) => ChangeKind::Chmod,
            EventKind::Modify(ModifyKind::Name(_)) => ChangeKind::Rename,
            EventKind::Create(_) => ChangeKind::Create,
            EventKind::Remove(_) => ChangeKind::Remove,
            EventKind::Access(_) | EventKind::Any | EventKind::Other => ChangeKind::Other,
        }
    }

    /// Whether this kind should trigger a reload.
    pub fn is_write(&self) -> bool {
        matches!(self, ChangeKind::Write)
    }
}

impl fmt::Display for ChangeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ChangeKind::Write => "WRITE",
            ChangeKind::Create => "CREATE",
            ChangeKind::Remove => "REMOVE",
            ChangeKind::Rename => "RENAME",
            ChangeKind::Chmod => "CHMOD",
            ChangeKind::Other => "OTHER",
        };
        f.write_str(name)
    }
}

/// A single change to a single path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChangeEvent {
    /// The path that changed
    pub path: PathBuf,
    /// What happened to it
    pub kind: ChangeKind,
}

impl ChangeEvent {
    /// Create an event.
    pub fn new(path: impl Into<PathBuf>, kind: ChangeKind) -> Self {
        Self {
            path: path.into(),
            kind,
        }
    }

    /// Split a `notify` event into one change event per path.
    pub fn from_notify(event: notify::Event) -> Vec<Self> {
        let kind = ChangeKind::from_notify(&event.kind);
        event
            .paths
            .into_iter()
            .map(|path| Self { path, kind })
            .collect()
    }
}

impl fmt::Display for ChangeEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}: {}", self.path.display().to_string(), self.kind)
    }
}

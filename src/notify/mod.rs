//! Filesystem change notifications and the loop that acts on them.
//!
//! ```text
//! notify backend ──▶ DirectoryWatcher ──▶ events ─┐
//!                                    └──▶ errors ─┴─▶ EventLoop ──▶ ReloadCoordinator
//! ```

mod event;
mod event_loop;
mod watcher;

pub use event::{ChangeEvent, ChangeKind};
pub use event_loop::{EventLoop, LoopStats};
pub use watcher::{DirectoryWatcher, WatchStreams};

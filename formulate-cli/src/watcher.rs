//! File watcher for watch mode.
//!
//! Monitors form definition files and reports debounced changes so the
//! artifacts can be regenerated.

use std::path::{Path, PathBuf};
use std::sync::mpsc::{channel, Receiver};
use std::time::Duration;

use notify::{RecommendedWatcher, RecursiveMode};
use notify_debouncer_mini::{new_debouncer, DebouncedEvent, Debouncer};
use tracing::trace;

use crate::error::{CliResult, WatchError};
use crate::scanner::is_form_file;

/// Event types for file changes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WatchEvent {
    /// A form file was created or modified.
    Modified(PathBuf),
    /// A form file was deleted.
    Deleted(PathBuf),
    /// An error occurred.
    Error(String),
}

/// File watcher for monitoring form definitions.
pub struct FileWatcher {
    /// Directory or single form file to watch.
    root: PathBuf,
    /// Debounce duration in milliseconds.
    debounce_ms: u64,
}

impl FileWatcher {
    /// Create a new file watcher for the given directory or file.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            debounce_ms: 500,
        }
    }

    /// Set the debounce duration in milliseconds.
    pub fn with_debounce(mut self, ms: u64) -> Self {
        self.debounce_ms = ms;
        self
    }

    /// Start watching for file changes.
    ///
    /// Events arrive on the returned receiver for as long as the debouncer
    /// is kept alive.
    pub fn watch(&self) -> CliResult<(Debouncer<RecommendedWatcher>, Receiver<WatchEvent>)> {
        let (tx, rx) = channel::<WatchEvent>();

        let mut debouncer = new_debouncer(
            Duration::from_millis(self.debounce_ms),
            move |result: Result<Vec<DebouncedEvent>, notify::Error>| match result {
                Ok(events) => {
                    for event in events {
                        if let Some(watch_event) = WatchEvent::from_path(event.path) {
                            // The receiver is gone once the main loop exits.
                            let _ = tx.send(watch_event);
                        }
                    }
                }
                Err(e) => {
                    let _ = tx.send(WatchEvent::Error(e.to_string()));
                }
            },
        )
        .map_err(|e| WatchError::Init(e.to_string()))?;

        let mode = if self.root.is_dir() {
            RecursiveMode::Recursive
        } else {
            RecursiveMode::NonRecursive
        };
        debouncer
            .watcher()
            .watch(&self.root, mode)
            .map_err(|e| WatchError::Notify(e.to_string()))?;

        Ok((debouncer, rx))
    }

    /// Get the path being watched.
    pub fn root(&self) -> &Path {
        &self.root
    }
}

impl WatchEvent {
    /// Classify a changed path; paths that are not form files yield `None`.
    pub fn from_path(path: PathBuf) -> Option<Self> {
        if !is_form_file(&path) {
            trace!(path = %path.display(), "Ignoring change");
            return None;
        }
        Some(if path.exists() {
            WatchEvent::Modified(path)
        } else {
            WatchEvent::Deleted(path)
        })
    }

    /// Get the path associated with this event.
    pub fn path(&self) -> Option<&Path> {
        match self {
            WatchEvent::Modified(p) | WatchEvent::Deleted(p) => Some(p),
            WatchEvent::Error(_) => None,
        }
    }

    /// Check if this is an error event.
    pub fn is_error(&self) -> bool {
        matches!(self, WatchEvent::Error(_))
    }

    /// Get the error message if this is an error event.
    pub fn error_message(&self) -> Option<&str> {
        match self {
            WatchEvent::Error(msg) => Some(msg),
            _ => None,
        }
    }
}

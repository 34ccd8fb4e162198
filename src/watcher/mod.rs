//! Transcript file watching for live reload.
//!
//! Chat front-ends append to the log while a conversation runs, and a
//! single save often arrives as several file events (truncate, write,
//! rename). The watcher folds such a burst into one "changed" signal once
//! the file has been quiet for the debounce period.

use std::ffi::OsString;
use std::path::{Path, PathBuf};
use std::sync::mpsc::{self, Receiver, TryRecvError};
use std::time::{Duration, Instant};

use notify::{Event, EventKind, RecommendedWatcher, RecursiveMode, Watcher};

/// Watches one transcript file and reports debounced changes.
pub struct TranscriptWatcher {
    // Dropping the watcher stops the OS subscription.
    _watcher: RecommendedWatcher,
    touches: Receiver<()>,
    target_path: PathBuf,
    debounce: Duration,
    last_touch: Option<Instant>,
}

/// Decides whether a file event concerns the transcript.
#[derive(Debug, Clone)]
struct EventFilter {
    dir: PathBuf,
    file_name: Option<OsString>,
}

impl EventFilter {
    fn for_target(target: &Path) -> Self {
        Self {
            dir: parent_dir(target),
            file_name: target.file_name().map(ToOwned::to_owned),
        }
    }

    fn matches(&self, event: &Event) -> bool {
        if matches!(event.kind, EventKind::Access(_)) {
            return false;
        }
        event.paths.iter().any(|path| {
            // Some backends only report the directory for renames.
            path == &self.dir || path.file_name() == self.file_name.as_deref()
        })
    }
}

impl TranscriptWatcher {
    /// Start watching `path`.
    ///
    /// The parent directory is watched rather than the file itself so
    /// editors that replace the file on save are still seen.
    ///
    /// # Errors
    /// Returns an error if the OS watcher can't be created or the
    /// directory can't be watched.
    pub fn new(path: impl AsRef<Path>, debounce: Duration) -> notify::Result<Self> {
        let path = path.as_ref();
        let target_path = path.canonicalize().unwrap_or_else(|_| path.to_path_buf());
        let filter = EventFilter::for_target(&target_path);
        let dir = filter.dir.clone();

        let (tx, touches) = mpsc::channel();
        let mut watcher = notify::recommended_watcher(move |res: notify::Result<Event>| match res {
            Ok(event) if filter.matches(&event) => {
                let _ = tx.send(());
            }
            Ok(event) => tracing::trace!(kind = ?event.kind, paths = ?event.paths, "ignored fs event"),
            Err(err) => tracing::warn!(error = %err, "transcript watch error"),
        })?;
        watcher.watch(&dir, RecursiveMode::NonRecursive)?;
        tracing::debug!(path = %target_path.display(), "watching transcript");

        Ok(Self {
            _watcher: watcher,
            touches,
            target_path,
            debounce,
            last_touch: None,
        })
    }

    pub fn target_path(&self) -> &Path {
        &self.target_path
    }

    /// Returns true once, after the transcript changed and then stayed
    /// quiet for the debounce period.
    pub fn take_change_ready(&mut self) -> bool {
        loop {
            match self.touches.try_recv() {
                Ok(()) => self.last_touch = Some(Instant::now()),
                Err(TryRecvError::Empty) => break,
                Err(TryRecvError::Disconnected) => {
                    tracing::warn!("transcript watcher stopped");
                    break;
                }
            }
        }
        match self.last_touch {
            Some(at) if at.elapsed() >= self.debounce => {
                self.last_touch = None;
                true
            }
            _ => false,
        }
    }
}

fn parent_dir(path: &Path) -> PathBuf {
    match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => PathBuf::from("."),
    }
}

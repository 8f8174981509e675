//! Input file watcher for watch mode.
//!
//! Watches the directories holding the inputs rather than the files, since
//! `serverless package` deletes and recreates the template and a watch on a
//! deleted file stops firing.

use std::path::{Path, PathBuf};
use std::time::Duration;

use notify::{Config, Event, RecommendedWatcher, RecursiveMode, Watcher};
use tokio::sync::mpsc;

/// Watches the service definition and compiled template for changes.
pub struct InputWatcher {
    files: Vec<PathBuf>,
    change_tx: mpsc::UnboundedSender<PathBuf>,
}

impl InputWatcher {
    /// Create a new InputWatcher.
    ///
    /// Returns the watcher and a receiver yielding each changed input.
    pub fn new(files: &[&Path]) -> (Self, mpsc::UnboundedReceiver<PathBuf>) {
        let (change_tx, change_rx) = mpsc::unbounded_channel();

        (
            Self {
                files: files.iter().map(|p| p.to_path_buf()).collect(),
                change_tx,
            },
            change_rx,
        )
    }

    /// Input files being watched.
    pub fn files(&self) -> &[PathBuf] {
        &self.files
    }

    /// Directories registered with the OS watcher, without duplicates.
    pub fn directories(&self) -> Vec<PathBuf> {
        let mut dirs: Vec<PathBuf> = Vec::new();
        for file in &self.files {
            let dir = parent_dir(file);
            if !dirs.contains(&dir) {
                dirs.push(dir);
            }
        }
        dirs
    }

    /// Start watching in a background thread.
    ///
    /// The returned watcher must be kept alive for events to flow.
    pub fn run(self) -> Result<RecommendedWatcher, notify::Error> {
        let tx = self.change_tx.clone();
        let files = self.files.clone();

        let mut watcher = RecommendedWatcher::new(
            move |res: notify::Result<Event>| match res {
                Ok(event) => {
                    if event.kind.is_modify() || event.kind.is_create() {
                        for path in event.paths {
                            if is_watched(&files, &path) {
                                tracing::debug!(path = %path.display(), "Input change detected");
                                let _ = tx.send(path);
                            }
                        }
                    }
                }
                Err(e) => tracing::error!("Watch error: {:?}", e),
            },
            Config::default().with_poll_interval(Duration::from_secs(2)),
        )?;

        for dir in self.directories() {
            watcher.watch(&dir, RecursiveMode::NonRecursive)?;
        }

        tracing::info!(files = ?self.files, "Input watcher started");
        Ok(watcher)
    }
}

fn parent_dir(file: &Path) -> PathBuf {
    match file.parent() {
        Some(dir) if !dir.as_os_str().is_empty() => dir.to_path_buf(),
        _ => PathBuf::from("."),
    }
}

/// Whether an event path refers to one of the watched files.
///
/// Event paths are absolute while configured paths may be relative, so the
/// file name decides, with the parent directory's name as a tie-breaker when
/// both have one.
pub fn is_watched(files: &[PathBuf], event_path: &Path) -> bool {
    files.iter().any(|file| {
        file.file_name().is_some()
            && file.file_name() == event_path.file_name()
            && match (dir_name(file), dir_name(event_path)) {
                (Some(expected), Some(actual)) => expected == actual,
                _ => true,
            }
    })
}

fn dir_name(path: &Path) -> Option<&std::ffi::OsStr> {
    path.parent().and_then(Path::file_name)
}

//! Tracks the data file size in the background.
//!
//! A `notify` watcher forwards file events to a dedicated thread. After each
//! write the thread stats the file and flips the shared [`Capacity`] flag
//! when the size crosses the configured limit in either direction. Writers
//! only ever read the flag, so the hot path never touches the filesystem.

use crate::core::watcher::error::WatchError;
use crossbeam::channel::{self, Receiver, Sender};
use notify::event::{AccessKind, AccessMode};
use notify::{Event, EventKind, RecommendedWatcher, RecursiveMode, Watcher};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::thread::{self, JoinHandle};
use tracing::{debug, info, warn};

pub mod error {
    use thiserror::Error;

    #[derive(Debug, Error)]
    pub enum WatchError {
        #[error("File watcher error: {0}")]
        Notify(#[from] notify::Error),

        #[error("Failed to spawn watcher thread: {0}")]
        Spawn(#[from] std::io::Error),
    }
}

/// Whether the data file has reached its size limit.
///
/// Starts out not full. Only the size watcher changes it.
#[derive(Debug, Default)]
pub struct Capacity {
    full: AtomicBool,
}

impl Capacity {
    pub fn is_full(&self) -> bool {
        self.full.load(Ordering::Acquire)
    }

    /// Returns `true` if the flag was previously clear.
    fn mark_full(&self) -> bool {
        !self.full.swap(true, Ordering::AcqRel)
    }

    /// Returns `true` if the flag was previously set.
    fn mark_available(&self) -> bool {
        self.full.swap(false, Ordering::AcqRel)
    }
}

/// Handle to the running watcher thread.
///
/// Dropping the handle without calling [`SizeWatcher::stop`] still ends the
/// thread, but does not wait for it.
pub struct SizeWatcher {
    watcher: RecommendedWatcher,
    path: PathBuf,
    shutdown: Sender<()>,
    handle: JoinHandle<()>,
}

impl SizeWatcher {
    /// Starts watching `path`, which must already exist.
    ///
    /// The current size is checked once after the watch is registered, so a
    /// file that is already over `limit` starts out full.
    pub fn start(path: &Path, limit: u64, capacity: Arc<Capacity>) -> Result<Self, WatchError> {
        let (event_tx, event_rx) = channel::unbounded();
        let mut watcher = notify::recommended_watcher(event_tx)?;
        watcher.watch(path, RecursiveMode::NonRecursive)?;

        let (shutdown, shutdown_rx) = channel::bounded(0);
        let size_check = SizeCheck {
            path: path.to_path_buf(),
            limit,
            capacity,
        };
        size_check.reconcile();

        let handle = thread::Builder::new()
            .name("size-watcher".to_string())
            .spawn(move || size_check.run(event_rx, shutdown_rx))?;

        debug!(path = %path.display(), limit, "size watcher started");
        Ok(Self {
            watcher,
            path: path.to_path_buf(),
            shutdown,
            handle,
        })
    }

    /// Stops the watcher and waits for its thread to exit.
    ///
    /// Problems during shutdown are logged, not returned.
    pub fn stop(self) {
        let Self {
            mut watcher,
            path,
            shutdown,
            handle,
        } = self;

        if let Err(err) = watcher.unwatch(&path) {
            warn!(path = %path.display(), error = %err, "failed to unwatch data file");
        }
        drop(watcher);
        drop(shutdown);

        if handle.join().is_err() {
            warn!("size watcher thread panicked");
        }
    }
}

struct SizeCheck {
    path: PathBuf,
    limit: u64,
    capacity: Arc<Capacity>,
}

impl SizeCheck {
    fn run(self, events: Receiver<notify::Result<Event>>, shutdown: Receiver<()>) {
        loop {
            crossbeam::select! {
                recv(events) -> msg => match msg {
                    Ok(Ok(event)) if is_write(&event.kind) => self.reconcile(),
                    Ok(Ok(_)) => {}
                    Ok(Err(err)) => warn!(error = %err, "data file watch error"),
                    Err(_) => break,
                },
                recv(shutdown) -> _ => break,
            }
        }
        debug!(path = %self.path.display(), "size watcher stopped");
    }

    fn reconcile(&self) {
        let size = match std::fs::metadata(&self.path) {
            Ok(metadata) => metadata.len(),
            Err(err) => {
                warn!(path = %self.path.display(), error = %err, "failed to read data file stat");
                return;
            }
        };

        if size >= self.limit {
            if self.capacity.mark_full() {
                info!(size, limit = self.limit, "data file size limit is reached");
            }
        } else if self.capacity.mark_available() {
            info!(size, limit = self.limit, "data file size is ok now");
        }
    }
}

fn is_write(kind: &EventKind) -> bool {
    matches!(
        kind,
        EventKind::Modify(_) | EventKind::Access(AccessKind::Close(AccessMode::Write))
    )
}

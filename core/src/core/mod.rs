//! Timer storage: a size-bounded redb file plus an in-memory alternative.

use crate::core::db::Database;
use crate::core::watcher::SizeWatcher;
use crate::types::{Backend, Config, Timer, TimerId};
use error::{OpenError, StorageError};
use std::path::Path;
use std::sync::Arc;
use tracing::{error, info};

pub(crate) mod db;
pub(crate) mod memory;
pub(crate) mod watcher;

pub use db::OPEN_TIMEOUT;
pub use db::error::DatabaseError;
pub use memory::MemoryStorage;
pub use watcher::Capacity;
pub use watcher::error::WatchError;

pub mod error {
    use super::*;
    use thiserror::Error;

    #[derive(Debug, Error)]
    pub enum StorageError {
        #[error("Failed to open storage: {0}")]
        Open(#[from] OpenError),

        #[error("Timer not found")]
        NotFound,

        #[error("Storage is full")]
        Full,

        #[error("Failed to encode timer: {0}")]
        Encode(#[source] serde_json::Error),

        #[error("Failed to decode timer {id}: {source}")]
        Decode {
            id: TimerId,
            source: serde_json::Error,
        },

        #[error("Database error: {0}")]
        Database(#[from] DatabaseError),
    }

    #[derive(Debug, Error)]
    pub enum OpenError {
        #[error("Database error: {0}")]
        Database(#[from] DatabaseError),

        #[error("Watcher error: {0}")]
        Watch(#[from] WatchError),
    }
}

/// Operations shared by every storage backend.
pub trait TimerStorage: Send + Sync {
    /// Looks up a timer. Ids that were never returned by `save_timer` yield
    /// `Err(NotFound)`.
    fn get_timer(&self, id: &str) -> Result<Timer, StorageError>;

    /// Saves a timer under a freshly generated id and returns that id.
    fn save_timer(&self, timer: &Timer) -> Result<TimerId, StorageError>;

    /// Releases the backend. Problems are logged, not returned.
    fn close(self: Box<Self>);
}

/// Opens the backend selected by `config.backend`.
pub fn open_storage(config: &Config) -> Result<Box<dyn TimerStorage>, StorageError> {
    match config.backend {
        Backend::Redb => Ok(Box::new(Storage::open_with(config)?)),
        Backend::Memory => Ok(Box::new(MemoryStorage::new())),
    }
}

/// Timers kept in a redb file whose size is capped.
///
/// Once the file reaches `limit` bytes, `save_timer` fails with
/// `StorageError::Full` until the file shrinks again. The flag is updated
/// asynchronously by a background watcher, so a few writes may land after
/// the file crosses the limit.
pub struct Storage {
    db: Database,
    watcher: SizeWatcher,
    capacity: Arc<Capacity>,
    limit: u64,
}

impl Storage {
    /// Opens or creates the data file and starts watching its size.
    ///
    /// On error every resource acquired so far is released again.
    pub fn open(path: &Path, limit: u64) -> Result<Self, StorageError> {
        let db = Database::open(path, OPEN_TIMEOUT).map_err(OpenError::from)?;

        let capacity = Arc::new(Capacity::default());
        let watcher =
            SizeWatcher::start(path, limit, Arc::clone(&capacity)).map_err(OpenError::from)?;

        info!(path = %path.display(), limit, "storage opened");
        Ok(Self {
            db,
            watcher,
            capacity,
            limit,
        })
    }

    pub fn open_with(config: &Config) -> Result<Self, StorageError> {
        Self::open(&config.data_file, config.max_size.bytes())
    }

    pub fn path(&self) -> &Path {
        self.db.path()
    }

    pub fn limit(&self) -> u64 {
        self.limit
    }

    /// Whether new timers are currently being rejected.
    pub fn is_full(&self) -> bool {
        self.capacity.is_full()
    }

    /// Stops the size watcher and closes the data file.
    pub fn close(self) {
        let Self { db, watcher, .. } = self;
        let path = db.path().to_path_buf();

        watcher.stop();
        drop(db);
        info!(path = %path.display(), "storage closed");
    }
}

/// Read operations.
impl Storage {
    pub fn get_timer(&self, id: &str) -> Result<Timer, StorageError> {
        let Ok(id) = TimerId::try_from(id) else {
            return Err(StorageError::NotFound);
        };

        let data = self.db.get(&id).map_err(|err| {
            error!(id = %id, error = %err, "failed to get timer from database");
            err
        })?;
        let Some(data) = data else {
            return Err(StorageError::NotFound);
        };

        Timer::decode(&data).map_err(|source| {
            error!(id = %id, error = %source, "failed to decode stored timer");
            StorageError::Decode { id, source }
        })
    }
}

/// Write operations.
impl Storage {
    pub fn save_timer(&self, timer: &Timer) -> Result<TimerId, StorageError> {
        if self.capacity.is_full() {
            return Err(StorageError::Full);
        }

        let data = timer.encode().map_err(StorageError::Encode)?;

        let id = TimerId::generate();
        self.db.put(&id, &data).map_err(|err| {
            error!(id = %id, error = %err, "failed to save timer in database");
            err
        })?;

        Ok(id)
    }

    /// Compacts the data file. The size watcher picks up the new size and
    /// may lift a full state.
    pub fn compact(&mut self) -> Result<bool, StorageError> {
        Ok(self.db.compact()?)
    }
}

impl TimerStorage for Storage {
    fn get_timer(&self, id: &str) -> Result<Timer, StorageError> {
        Storage::get_timer(self, id)
    }

    fn save_timer(&self, timer: &Timer) -> Result<TimerId, StorageError> {
        Storage::save_timer(self, timer)
    }

    fn close(self: Box<Self>) {
        Storage::close(*self)
    }
}

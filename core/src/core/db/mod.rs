//! Database layer for timer storage.
//!
//! A single redb file with one table (`timers`) mapping timer ids to encoded
//! records. redb locks the file exclusively while it is open; [`Database::open`]
//! waits a bounded time for that lock instead of failing immediately.

use crate::core::db::error::DatabaseError;
use crate::types::TimerId;
use redb::{ReadableDatabase, TableDefinition};
use std::path::{Path, PathBuf};
use std::thread;
use std::time::{Duration, Instant};
use tracing::debug;

pub mod error {
    use std::path::PathBuf;
    use std::time::Duration;
    use thiserror::Error;

    #[derive(Debug, Error)]
    pub enum DatabaseError {
        #[error("Database error: {0}")]
        Redb(#[from] redb::DatabaseError),

        #[error("Table error: {0}")]
        TableError(#[from] redb::TableError),

        #[error("Storage error: {0}")]
        StorageError(#[from] redb::StorageError),

        #[error("Transaction error: {0}")]
        TransactionError(#[from] redb::TransactionError),

        #[error("Commit error: {0}")]
        CommitError(#[from] redb::CommitError),

        #[error("Compaction error: {0}")]
        CompactionError(#[from] redb::CompactionError),

        #[error("IO error: {0}")]
        Io(#[from] std::io::Error),

        #[error("Data file {} is locked by another process (waited {waited:?})", path.display())]
        Locked { path: PathBuf, waited: Duration },
    }
}

/// How long [`Database::open`] waits for another holder to release the file.
pub const OPEN_TIMEOUT: Duration = Duration::from_secs(1);

const LOCK_RETRY_INTERVAL: Duration = Duration::from_millis(50);

/// Timers table: id → JSON-encoded timer
const TIMERS_TABLE: TableDefinition<&str, &[u8]> = TableDefinition::new("timers");

/// The main database struct wrapping redb.
pub struct Database {
    db: redb::Database,
    path: PathBuf,
}

impl Database {
    /// Opens the data file at `path`, creating it and the timers table if
    /// absent.
    ///
    /// Returns `Err(Locked)` if the file is still held by someone else after
    /// `timeout`.
    pub fn open(path: &Path, timeout: Duration) -> Result<Self, DatabaseError> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }

        let started = Instant::now();
        let db = loop {
            match redb::Database::create(path) {
                Ok(db) => break db,
                Err(redb::DatabaseError::DatabaseAlreadyOpen) => {
                    if started.elapsed() >= timeout {
                        return Err(DatabaseError::Locked {
                            path: path.to_path_buf(),
                            waited: timeout,
                        });
                    }
                    debug!(path = %path.display(), "data file is locked, retrying");
                    thread::sleep(LOCK_RETRY_INTERVAL);
                }
                Err(err) => return Err(err.into()),
            }
        };

        // Initialize tables
        let write_txn = db.begin_write()?;
        {
            let _ = write_txn.open_table(TIMERS_TABLE)?;
        }
        write_txn.commit()?;

        Ok(Self {
            db,
            path: path.to_path_buf(),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

/// Read operations.
impl Database {
    /// Retrieves the raw record stored under `id`.
    pub fn get(&self, id: &TimerId) -> Result<Option<Vec<u8>>, DatabaseError> {
        let read_txn = self.db.begin_read()?;
        let table = read_txn.open_table(TIMERS_TABLE)?;

        Ok(table.get(id.as_str())?.map(|guard| guard.value().to_vec()))
    }
}

/// Write operations.
impl Database {
    /// Stores `record` under `id`, replacing whatever was there.
    ///
    /// The record is durable once this returns; on error nothing is written.
    pub fn put(&self, id: &TimerId, record: &[u8]) -> Result<(), DatabaseError> {
        let write_txn = self.db.begin_write()?;
        {
            let mut table = write_txn.open_table(TIMERS_TABLE)?;
            table.insert(id.as_str(), record)?;
        }
        write_txn.commit()?;
        Ok(())
    }

    /// Compacts the data file, returning whether any space was reclaimed.
    pub fn compact(&mut self) -> Result<bool, DatabaseError> {
        Ok(self.db.compact()?)
    }
}

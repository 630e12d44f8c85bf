use crate::core::TimerStorage;
use crate::core::error::StorageError;
use crate::types::{Timer, TimerId};
use parking_lot::RwLock;
use std::collections::HashMap;

/// Timers held in process memory. There is no size limit and nothing
/// survives the process.
#[derive(Debug, Default)]
pub struct MemoryStorage {
    timers: RwLock<HashMap<TimerId, Timer>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.timers.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.timers.read().is_empty()
    }
}

impl TimerStorage for MemoryStorage {
    fn get_timer(&self, id: &str) -> Result<Timer, StorageError> {
        let id = TimerId::try_from(id).map_err(|_| StorageError::NotFound)?;
        self.timers
            .read()
            .get(&id)
            .cloned()
            .ok_or(StorageError::NotFound)
    }

    fn save_timer(&self, timer: &Timer) -> Result<TimerId, StorageError> {
        let id = TimerId::generate();
        self.timers.write().insert(id.clone(), timer.clone());
        Ok(id)
    }

    fn close(self: Box<Self>) {}
}

#[cfg(test)]
mod tests;

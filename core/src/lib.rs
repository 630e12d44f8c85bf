pub mod core;
pub mod types;

pub use crate::core::error::{OpenError, StorageError};
pub use crate::core::{
    Capacity, DatabaseError, MemoryStorage, OPEN_TIMEOUT, Storage, TimerStorage, WatchError,
    open_storage,
};
pub use types::{Backend, ByteSize, Config, Timer, TimerId};

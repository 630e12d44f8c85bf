pub(crate) mod config;
pub use config::{
    Backend, ByteSize, ByteSizeError, Config, ConfigError, ENV_DATA_FILE, ENV_DATA_FILE_MAX_SIZE,
};

pub(crate) mod timer;
pub use timer::Timer;

pub(crate) mod timer_id;
pub use timer_id::{TIMER_ID_LENGTH, TimerId, TimerIdError};

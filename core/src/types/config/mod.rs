mod core;
mod size;

pub use self::core::{Backend, Config, ConfigError, ENV_DATA_FILE, ENV_DATA_FILE_MAX_SIZE};
pub use size::{ByteSize, ByteSizeError};

use tempfile::TempDir;
use timerbox_core::{Backend, ByteSize, Config, Timer, open_storage};

/// Verify a TOML config selects the redb backend with the given file and limit.
#[test]
fn test_config_file_drives_storage() {
    let temp_dir = TempDir::new().unwrap();
    let data_file = temp_dir.path().join("timers.db");
    let config_path = temp_dir.path().join("timerbox.toml");
    std::fs::write(
        &config_path,
        format!(
            "data_file = {:?}\nmax_size = \"16M\"\nbackend = \"redb\"\n",
            data_file.display().to_string()
        ),
    )
    .unwrap();

    let config = Config::load(&config_path).unwrap();
    assert_eq!(config.max_size, ByteSize::mebibytes(16));
    assert_eq!(config.backend, Backend::Redb);
    assert!(config.validate().is_empty());

    let storage = open_storage(&config).unwrap();
    let id = storage.save_timer(&Timer::new("configured", 1)).unwrap();
    assert_eq!(storage.get_timer(&id).unwrap().name, "configured");
    storage.close();

    assert!(data_file.is_file());
}

/// Verify the memory backend never touches the configured data file.
#[test]
fn test_memory_backend_writes_no_file() {
    let temp_dir = TempDir::new().unwrap();
    let config = Config {
        data_file: temp_dir.path().join("unused.db"),
        backend: Backend::Memory,
        ..Config::default()
    };

    let storage = open_storage(&config).unwrap();
    storage.save_timer(&Timer::new("volatile", 1)).unwrap();
    storage.close();

    assert!(!config.data_file.exists());
}

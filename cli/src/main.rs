//! timerbox CLI
//!
//! Saves and looks up timers in a size-bounded data file.

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::process::ExitCode;
use std::time::SystemTime;
use timerbox_core::{Backend, ByteSize, Config, Storage, StorageError, Timer, open_storage};
use tracing_subscriber::{EnvFilter, fmt};

/// timerbox
#[derive(Parser, Debug)]
#[command(name = "timerbox")]
#[command(about = "Store named countdown timers in a size-bounded data file")]
#[command(version)]
struct Args {
    /// Config file (TOML); missing file means defaults
    #[arg(short, long, default_value = "timerbox.toml")]
    config: PathBuf,

    /// Data file path, overrides config and DATA_FILE
    #[arg(short, long)]
    data_file: Option<PathBuf>,

    /// Data file size limit such as 100M, overrides config and DATA_FILE_MAX_SIZE
    #[arg(short, long)]
    max_size: Option<ByteSize>,

    /// Keep timers in memory only. Nothing outlives the process, so only
    /// `save` works with it; useful for trying out the tool
    #[arg(long)]
    memory: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Save a timer and print its id
    Save {
        /// Display name
        #[arg(short, long, default_value = "")]
        name: String,

        /// Unix timestamp (seconds) to count down to
        #[arg(short, long)]
        deadline: i64,
    },

    /// Print a timer by id
    Get {
        /// Id returned by `save`
        id: String,
    },

    /// Compact the data file
    Compact,
}

fn main() -> ExitCode {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,timerbox_core=debug"));

    fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    let config = match load_config(&args) {
        Ok(config) => config,
        Err(message) => {
            tracing::error!("{message}");
            return ExitCode::FAILURE;
        }
    };

    if let Err(message) = check_backend(&args.command, config.backend) {
        tracing::error!("{message}");
        return ExitCode::FAILURE;
    }

    match run(args.command, &config) {
        Ok(()) => ExitCode::SUCCESS,
        Err(StorageError::NotFound) => {
            eprintln!("timer not found");
            ExitCode::FAILURE
        }
        Err(StorageError::Full) => {
            eprintln!("storage is full");
            ExitCode::FAILURE
        }
        Err(e) => {
            tracing::error!("{e}");
            ExitCode::FAILURE
        }
    }
}

fn load_config(args: &Args) -> Result<Config, String> {
    let mut config = Config::load(&args.config)
        .map_err(|e| format!("Failed to read config {}: {e}", args.config.display()))?;
    config
        .apply_env()
        .map_err(|e| format!("Failed to read environment: {e}"))?;

    if let Some(data_file) = &args.data_file {
        config.data_file = data_file.clone();
    }
    if let Some(max_size) = args.max_size {
        config.max_size = max_size;
    }
    if args.memory {
        config.backend = Backend::Memory;
    }

    let errors = config.validate();
    if !errors.is_empty() {
        return Err(format!("Invalid config: {}", errors.join(", ")));
    }

    tracing::debug!(
        data_file = %config.data_file.display(),
        max_size = %config.max_size,
        backend = %config.backend,
        "config loaded"
    );
    Ok(config)
}

/// Rejects commands that need timers from an earlier run, which the memory
/// backend cannot provide.
fn check_backend(command: &Commands, backend: Backend) -> Result<(), String> {
    match (command, backend) {
        (Commands::Get { .. }, Backend::Memory) => Err(
            "`get` needs a data file; the memory backend keeps nothing between runs".to_string(),
        ),
        (Commands::Compact, Backend::Memory) => {
            Err("`compact` needs a data file; the memory backend has none".to_string())
        }
        _ => Ok(()),
    }
}

fn run(command: Commands, config: &Config) -> Result<(), StorageError> {
    match command {
        Commands::Save { name, deadline } => {
            let storage = open_storage(config)?;
            let timer = Timer::new(name, deadline).created_at(SystemTime::now());
            let result = storage.save_timer(&timer);
            storage.close();
            println!("{}", result?);
        }
        Commands::Get { id } => {
            let storage = open_storage(config)?;
            let result = storage.get_timer(&id);
            storage.close();
            let timer = result?;

            let mut output = serde_json::json!(timer);
            output["remaining"] = timer.remaining(SystemTime::now()).into();
            println!("{output}");
        }
        Commands::Compact => {
            let mut storage = Storage::open_with(config)?;
            let compacted = storage.compact();
            storage.close();
            if compacted? {
                tracing::info!("data file compacted");
            } else {
                tracing::info!("nothing to compact");
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Args {
        Args::try_parse_from(std::iter::once("timerbox").chain(args.iter().copied())).unwrap()
    }

    #[test]
    fn test_memory_backend_allows_save() {
        let args = parse(&["--memory", "save", "--deadline", "10"]);
        assert!(check_backend(&args.command, Backend::Memory).is_ok());
    }

    #[test]
    fn test_memory_backend_rejects_get_and_compact() {
        let get = parse(&["--memory", "get", "abcd1234"]);
        let compact = parse(&["--memory", "compact"]);

        assert!(check_backend(&get.command, Backend::Memory).is_err());
        assert!(check_backend(&compact.command, Backend::Memory).is_err());
    }

    #[test]
    fn test_redb_backend_allows_every_command() {
        for args in [
            parse(&["save", "--deadline", "10"]),
            parse(&["get", "abcd1234"]),
            parse(&["compact"]),
        ] {
            assert!(check_backend(&args.command, Backend::Redb).is_ok());
        }
    }

    #[test]
    fn test_memory_flag_selects_memory_backend() {
        let args = parse(&[
            "--config",
            "/nonexistent/timerbox.toml",
            "--memory",
            "save",
            "--deadline",
            "1",
        ]);
        let config = load_config(&args).unwrap();
        assert_eq!(config.backend, Backend::Memory);
    }
}

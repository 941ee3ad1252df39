/// Tracing setup.
///
/// The terminal is in raw mode on the alternate screen while the game runs,
/// so log lines go to a file instead of stderr. `RUST_LOG` overrides the
/// configured level.

use std::fs::OpenOptions;
use std::sync::Mutex;

use tracing_subscriber::EnvFilter;

use crate::config::GeneralConfig;
use crate::error::{GameError, GameResult};

pub fn init(config: &GeneralConfig) -> GameResult<()> {
    let filter = match EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => EnvFilter::try_new(&config.log_level).map_err(|source| GameError::LogFilter {
            directive: config.log_level.clone(),
            source,
        })?,
    };

    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&config.log_file)
        .map_err(|source| GameError::LogFile {
            path: config.log_file.clone(),
            source,
        })?;

    let subscriber = tracing_subscriber::fmt()
        .with_ansi(false)
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .finish();

    tracing::subscriber::set_global_default(subscriber)?;
    Ok(())
}

/// Error types for the process shell.
///
/// Game rules never fail; rejected moves and deferred resets are policy,
/// not errors. What can fail is the terminal and the log file around them.

use std::io;
use std::path::PathBuf;

#[derive(thiserror::Error, Debug)]
pub enum GameError {
    #[error("Terminal error: {0}")]
    Terminal(#[from] io::Error),

    #[error("Could not open log file {path}: {source}")]
    LogFile {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Invalid log filter {directive:?}: {source}")]
    LogFilter {
        directive: String,
        #[source]
        source: tracing_subscriber::filter::ParseError,
    },

    #[error("Logging already initialized: {0}")]
    Subscriber(#[from] tracing::subscriber::SetGlobalDefaultError),
}

pub type GameResult<T> = Result<T, GameError>;

//! Demo error types.

use std::path::PathBuf;

use thiserror::Error;

/// Errors that stop the demo.
#[derive(Debug, Error)]
pub enum DemoError {
    #[error("terminal error: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid settings in {path}: {source}")]
    Settings {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("could not determine config directory")]
    NoConfigDir,

    #[error("logger already initialized")]
    Logger(#[from] log::SetLoggerError),
}

pub type DemoResult<T> = Result<T, DemoError>;

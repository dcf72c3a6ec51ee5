//! Unified application error type.
//!
//! Every failure class surfaces here so `main` has a single place to report
//! a diagnostic and exit nonzero. No retries, no recovery: this tool either
//! completes the exchange or fails loudly.

use crate::config::ConfigError;
use crate::port::PortError;
use std::path::PathBuf;
use thiserror::Error;

/// A specialized `Result` type for application operations.
pub type AppResult<T> = Result<T, AppError>;

/// Unified application error type.
#[derive(Debug, Error)]
pub enum AppError {
    /// Configuration file or environment override problem.
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// The puzzle file could not be read.
    #[error("Failed to read puzzle file '{path}': {source}")]
    PuzzleFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A serial port operation failed.
    #[error(transparent)]
    Port(#[from] PortError),

    /// The device's response was not valid UTF-8.
    #[error("Device response is not valid UTF-8: {0}")]
    InvalidResponse(#[from] std::string::FromUtf8Error),
}

impl AppError {
    /// Create a puzzle-file error from a path and I/O error.
    pub fn puzzle_file(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::PuzzleFile {
            path: path.into(),
            source,
        }
    }
}

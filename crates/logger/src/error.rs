//! Error types for the run logger
//!
//! Only construction can fail. Emission errors are handled inside the
//! logger and never surface to callers.

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias using [`LoggerError`]
pub type LoggerResult<T> = std::result::Result<T, LoggerError>;

#[derive(Error, Debug)]
pub enum LoggerError {
    #[error("Failed to create log directory {path}: {source}")]
    CreateDir {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to open log file {path}: {source}")]
    OpenLogFile {
        path: PathBuf,
        source: std::io::Error,
    },
}

use std::io;
use std::path::PathBuf;
use std::time::Duration;
use thiserror::Error;

/// Crate-level error surface.
///
/// Expected contention never reaches this enum: the strategy layer reports
/// acquisition outcomes as booleans, and these variants exist where the CLI
/// needs to distinguish busy from timeout for messaging and exit codes.
#[derive(Debug, Error)]
pub enum ExlockError {
    #[error("Failed to acquire lock on {path}: timeout after {duration:?}")]
    LockTimeout { path: PathBuf, duration: Duration },

    #[error("Failed to acquire lock on {0}: file is locked by another process")]
    LockBusy(PathBuf),

    #[error("Failed to acquire lock on {0}")]
    LockFailed(PathBuf),

    #[error("Invalid duration format '{input}': {message}")]
    InvalidDuration { input: String, message: String },

    #[error(transparent)]
    Io(#[from] io::Error),

    #[error("{0}")]
    Other(String),
}

impl ExlockError {
    pub fn exit_code(&self) -> i32 {
        match self {
            ExlockError::LockTimeout { .. } | ExlockError::LockBusy(_) => 2,
            _ => 1,
        }
    }
}

pub type Result<T> = std::result::Result<T, ExlockError>;

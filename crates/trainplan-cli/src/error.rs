//! CLI error type and its mapping to process exit codes.

use std::path::PathBuf;

use thiserror::Error;

use trainplan_review::ReviewError;
use trainplan_storage::StorageError;

#[derive(Debug, Error)]
pub enum CliError {
    #[error("failed to read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to write {}: {source}", path.display())]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("invalid JSON in {}: {source}", path.display())]
    Json {
        path: PathBuf,
        source: serde_json::Error,
    },

    #[error(transparent)]
    Storage(#[from] StorageError),

    #[error(transparent)]
    Review(#[from] ReviewError),

    #[error("{0}")]
    Usage(String),
}

impl CliError {
    /// 1 = usage or review-state error, 3 = I/O or storage error.
    pub fn exit_code(&self) -> i32 {
        match self {
            CliError::Usage(_) | CliError::Review(_) => 1,
            CliError::Read { .. }
            | CliError::Write { .. }
            | CliError::Json { .. }
            | CliError::Storage(_) => 3,
        }
    }
}

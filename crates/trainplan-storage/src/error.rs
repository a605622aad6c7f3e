//! Storage error types for trainplan-storage.
//!
//! [`StorageError`] covers serialization, filesystem, lookup and integrity
//! failures of the persistence boundary.

use thiserror::Error;

use trainplan_core::id::{ProgramId, WorkoutId};

/// Errors produced by storage operations.
#[derive(Debug, Error)]
pub enum StorageError {
    /// JSON serialization or deserialization failed.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Reading or writing the backing files failed.
    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),

    /// A program with the given ID was not found.
    #[error("program not found: {0}")]
    ProgramNotFound(ProgramId),

    /// A program with the given ID already exists.
    #[error("program already exists: {0}")]
    DuplicateProgram(ProgramId),

    /// A workout still carries pending annotations and cannot be committed.
    #[error("workout {workout} has unresolved pending changes")]
    Uncommitted { workout: WorkoutId },

    /// A data integrity violation was detected.
    #[error("integrity error: {reason}")]
    IntegrityError { reason: String },
}

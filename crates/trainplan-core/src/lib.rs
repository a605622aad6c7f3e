//! Core data model for trainplan.
//!
//! Defines the workout document tree ([`Workout`], [`Block`], circuits and
//! exercises), the pending annotations that mark uncommitted changes on tree
//! nodes, and the change-proposal model ([`Change`]) that the merge engine
//! overlays onto a workout.

pub mod change;
pub mod error;
pub mod id;
pub mod pending;
pub mod workout;

// Re-export commonly used types
pub use change::{parse_changes, Change, ChangeKind, KNOWN_CHANGE_KINDS};
pub use error::CoreError;
pub use id::{ExerciseId, ProgramId, ProposalId, WorkoutId};
pub use pending::{PendingKind, PendingStatus};
pub use workout::{
    Block, CircuitBlock, CircuitData, CircuitMetadata, ExerciseBlock, ExerciseData,
    ExerciseMetadata, Workout,
};

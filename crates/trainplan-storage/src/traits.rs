//! The [`ProgramStore`] trait defining the storage contract for programs.
//!
//! Only committed workouts cross this boundary: trees that still carry
//! pending annotations belong to a review in progress and are rejected by
//! [`committed_workouts`], which every backend calls before writing.
//!
//! All backends (InMemoryStore, JsonFileStore) implement this trait, so they
//! are swappable without changing the review layer or the CLI.

use trainplan_core::id::ProgramId;
use trainplan_core::workout::Workout;

use crate::error::StorageError;
use crate::types::ProgramSummary;

/// The storage contract for training programs.
///
/// The trait is synchronous, matching the single-threaded review flow.
pub trait ProgramStore {
    /// Creates a new empty program.
    fn create_program(&mut self, id: &ProgramId, name: &str) -> Result<(), StorageError>;

    /// Loads the workouts of a program, ordered by `program_order`.
    fn load_workouts(&self, id: &ProgramId) -> Result<Vec<Workout>, StorageError>;

    /// Overwrites the workouts of an existing program.
    ///
    /// Fails with [`StorageError::Uncommitted`] if any workout still carries
    /// pending annotations.
    fn save_workouts(&mut self, id: &ProgramId, workouts: &[Workout]) -> Result<(), StorageError>;

    /// Deletes a program and all its workouts.
    fn delete_program(&mut self, id: &ProgramId) -> Result<(), StorageError>;

    /// Lists all stored programs.
    fn list_programs(&self) -> Result<Vec<ProgramSummary>, StorageError>;
}

/// Validates `workouts` for persistence under program `id` and returns them
/// sorted by `program_order`.
pub fn committed_workouts(
    id: &ProgramId,
    workouts: &[Workout],
) -> Result<Vec<Workout>, StorageError> {
    for workout in workouts {
        if !workout.is_committed() {
            return Err(StorageError::Uncommitted {
                workout: workout.id.clone(),
            });
        }
        if &workout.program_id != id {
            return Err(StorageError::IntegrityError {
                reason: format!(
                    "workout {} belongs to program {}, not {}",
                    workout.id, workout.program_id, id
                ),
            });
        }
    }
    let mut sorted = workouts.to_vec();
    sorted.sort_by_key(|w| w.program_order);
    Ok(sorted)
}

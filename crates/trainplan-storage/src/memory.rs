//! In-memory implementation of [`ProgramStore`].
//!
//! [`InMemoryStore`] is a first-class backend for tests and ephemeral review
//! sessions. It keeps every program in a `HashMap` with the same validation
//! rules as the file backend.

use std::collections::HashMap;

use trainplan_core::id::ProgramId;
use trainplan_core::workout::Workout;

use crate::error::StorageError;
use crate::traits::{committed_workouts, ProgramStore};
use crate::types::{ProgramSummary, StoredProgram};

/// HashMap-backed program store.
#[derive(Debug, Default)]
pub struct InMemoryStore {
    programs: HashMap<ProgramId, StoredProgram>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        InMemoryStore::default()
    }
}

impl ProgramStore for InMemoryStore {
    fn create_program(&mut self, id: &ProgramId, name: &str) -> Result<(), StorageError> {
        if self.programs.contains_key(id) {
            return Err(StorageError::DuplicateProgram(id.clone()));
        }
        self.programs
            .insert(id.clone(), StoredProgram::new(id.clone(), name));
        Ok(())
    }

    fn load_workouts(&self, id: &ProgramId) -> Result<Vec<Workout>, StorageError> {
        self.programs
            .get(id)
            .map(|p| p.workouts.clone())
            .ok_or_else(|| StorageError::ProgramNotFound(id.clone()))
    }

    fn save_workouts(&mut self, id: &ProgramId, workouts: &[Workout]) -> Result<(), StorageError> {
        let sorted = committed_workouts(id, workouts)?;
        let program = self
            .programs
            .get_mut(id)
            .ok_or_else(|| StorageError::ProgramNotFound(id.clone()))?;
        program.workouts = sorted;
        Ok(())
    }

    fn delete_program(&mut self, id: &ProgramId) -> Result<(), StorageError> {
        self.programs
            .remove(id)
            .map(|_| ())
            .ok_or_else(|| StorageError::ProgramNotFound(id.clone()))
    }

    fn list_programs(&self) -> Result<Vec<ProgramSummary>, StorageError> {
        let mut summaries: Vec<ProgramSummary> =
            self.programs.values().map(StoredProgram::summary).collect();
        summaries.sort_by(|a, b| a.id.cmp(&b.id));
        Ok(summaries)
    }
}

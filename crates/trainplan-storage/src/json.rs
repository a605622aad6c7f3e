//! JSON-file implementation of [`ProgramStore`].
//!
//! [`JsonFileStore`] keeps one pretty-printed JSON document per program at
//! `<root>/<program_id>.json`. Writes go to a temporary sibling file first
//! and are renamed into place, so a crash never leaves a half-written program.

use std::fs;
use std::path::{Path, PathBuf};

use trainplan_core::id::ProgramId;
use trainplan_core::workout::Workout;

use crate::error::StorageError;
use crate::traits::{committed_workouts, ProgramStore};
use crate::types::{ProgramSummary, StoredProgram};

const EXTENSION: &str = "json";

/// Directory-backed program store.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    root: PathBuf,
}

impl JsonFileStore {
    /// Opens (and creates if needed) a store rooted at `root`.
    pub fn open(root: impl Into<PathBuf>) -> Result<Self, StorageError> {
        let root = root.into();
        fs::create_dir_all(&root)?;
        Ok(JsonFileStore { root })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn path_for(&self, id: &ProgramId) -> Result<PathBuf, StorageError> {
        let raw = id.as_str();
        if raw.is_empty() || raw.starts_with('.') || raw.contains(['/', '\\']) {
            return Err(StorageError::IntegrityError {
                reason: format!("program id '{}' is not usable as a file name", raw),
            });
        }
        Ok(self.root.join(format!("{}.{}", raw, EXTENSION)))
    }

    fn read(&self, id: &ProgramId) -> Result<StoredProgram, StorageError> {
        let path = self.path_for(id)?;
        if !path.exists() {
            return Err(StorageError::ProgramNotFound(id.clone()));
        }
        let text = fs::read_to_string(&path)?;
        let program: StoredProgram = serde_json::from_str(&text)?;
        if &program.id != id {
            return Err(StorageError::IntegrityError {
                reason: format!("{} contains program {}", path.display(), program.id),
            });
        }
        Ok(program)
    }

    fn write(&self, program: &StoredProgram) -> Result<(), StorageError> {
        let path = self.path_for(&program.id)?;
        let tmp = path.with_extension("json.tmp");
        fs::write(&tmp, serde_json::to_string_pretty(program)?)?;
        fs::rename(&tmp, &path)?;
        tracing::debug!("wrote program {} to {}", program.id, path.display());
        Ok(())
    }
}

impl ProgramStore for JsonFileStore {
    fn create_program(&mut self, id: &ProgramId, name: &str) -> Result<(), StorageError> {
        if self.path_for(id)?.exists() {
            return Err(StorageError::DuplicateProgram(id.clone()));
        }
        self.write(&StoredProgram::new(id.clone(), name))
    }

    fn load_workouts(&self, id: &ProgramId) -> Result<Vec<Workout>, StorageError> {
        let mut workouts = self.read(id)?.workouts;
        workouts.sort_by_key(|w| w.program_order);
        Ok(workouts)
    }

    fn save_workouts(&mut self, id: &ProgramId, workouts: &[Workout]) -> Result<(), StorageError> {
        let sorted = committed_workouts(id, workouts)?;
        let mut program = self.read(id)?;
        program.workouts = sorted;
        self.write(&program)
    }

    fn delete_program(&mut self, id: &ProgramId) -> Result<(), StorageError> {
        let path = self.path_for(id)?;
        if !path.exists() {
            return Err(StorageError::ProgramNotFound(id.clone()));
        }
        fs::remove_file(path)?;
        Ok(())
    }

    fn list_programs(&self) -> Result<Vec<ProgramSummary>, StorageError> {
        let mut summaries = Vec::new();
        for entry in fs::read_dir(&self.root)? {
            let path = entry?.path();
            if path.extension().and_then(|e| e.to_str()) != Some(EXTENSION) {
                continue;
            }
            let text = fs::read_to_string(&path)?;
            match serde_json::from_str::<StoredProgram>(&text) {
                Ok(program) => summaries.push(program.summary()),
                Err(e) => {
                    tracing::warn!("skipping unreadable program file {}: {}", path.display(), e)
                }
            }
        }
        summaries.sort_by(|a, b| a.id.cmp(&b.id));
        Ok(summaries)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use trainplan_core::workout::{Block, CircuitData, ExerciseBlock, ExerciseData};

    fn sample_workout() -> Workout {
        let mut w = Workout::new("w1".into(), "Pull", "prog".into(), 0);
        w.blocks.push(Block::exercise(ExerciseData::new("row", "Row")));
        w.blocks.push(Block::circuit(CircuitData::new(
            "Arms",
            vec![ExerciseBlock::new(ExerciseData::new("curl", "Curl"))],
        )));
        w
    }

    #[test]
    fn workouts_survive_a_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let id = ProgramId::from("prog");
        {
            let mut store = JsonFileStore::open(dir.path()).unwrap();
            store.create_program(&id, "Hypertrophy").unwrap();
            store.save_workouts(&id, &[sample_workout()]).unwrap();
        }
        let store = JsonFileStore::open(dir.path()).unwrap();
        assert_eq!(store.load_workouts(&id).unwrap(), vec![sample_workout()]);
        assert_eq!(
            store.list_programs().unwrap(),
            vec![ProgramSummary {
                id: id.clone(),
                name: "Hypertrophy".to_string(),
                workouts: 1,
            }]
        );
    }

    #[test]
    fn ids_that_escape_the_root_are_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = JsonFileStore::open(dir.path()).unwrap();
        let err = store
            .create_program(&ProgramId::from("../evil"), "x")
            .unwrap_err();
        assert!(matches!(err, StorageError::IntegrityError { .. }));
    }

    #[test]
    fn unreadable_files_are_skipped_when_listing() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("junk.json"), "not json").unwrap();
        let mut store = JsonFileStore::open(dir.path()).unwrap();
        store.create_program(&ProgramId::from("prog"), "P").unwrap();
        assert_eq!(store.list_programs().unwrap().len(), 1);
    }

    #[test]
    fn delete_removes_the_file() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = JsonFileStore::open(dir.path()).unwrap();
        let id = ProgramId::from("prog");
        store.create_program(&id, "P").unwrap();
        store.delete_program(&id).unwrap();
        assert!(matches!(
            store.load_workouts(&id),
            Err(StorageError::ProgramNotFound(_))
        ));
    }
}

//! Storage-layer types for program metadata and the stored document.

use serde::{Deserialize, Serialize};

use trainplan_core::id::ProgramId;
use trainplan_core::workout::Workout;

/// Summary of a stored program (for listing).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProgramSummary {
    /// Program identifier.
    pub id: ProgramId,
    /// Program name.
    pub name: String,
    /// Number of workouts in the program.
    pub workouts: usize,
}

/// A whole program as it is kept by the backends.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoredProgram {
    pub id: ProgramId,
    pub name: String,
    #[serde(default)]
    pub workouts: Vec<Workout>,
}

impl StoredProgram {
    pub fn new(id: ProgramId, name: &str) -> Self {
        StoredProgram {
            id,
            name: name.to_string(),
            workouts: Vec::new(),
        }
    }

    pub fn summary(&self) -> ProgramSummary {
        ProgramSummary {
            id: self.id.clone(),
            name: self.name.clone(),
            workouts: self.workouts.len(),
        }
    }
}

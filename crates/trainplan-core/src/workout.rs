//! The workout document tree.
//!
//! A [`Workout`] is an ordered list of [`Block`]s. A block is either a single
//! exercise or a circuit, and a circuit holds its own ordered list of
//! [`ExerciseBlock`]s. Any block or nested exercise may carry a
//! [`PendingStatus`] describing an uncommitted change.
//!
//! Order is meaningful at both levels: it is both the display order and the
//! execution order of the session.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::id::{ExerciseId, ProgramId, ProposalId, WorkoutId};
use crate::pending::PendingStatus;

/// One workout (training session) of a program.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Workout {
    pub id: WorkoutId,
    pub name: String,
    pub program_id: ProgramId,
    /// Position of this workout within its program.
    pub program_order: u32,
    #[serde(default)]
    pub blocks: Vec<Block>,
}

/// One entry in a workout's top-level list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Block {
    Exercise(ExerciseBlock),
    Circuit(CircuitBlock),
}

/// A single exercise, either at the top level or inside a circuit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExerciseBlock {
    pub exercise: ExerciseData,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pending: Option<PendingStatus>,
}

/// A group of exercises performed as a round.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CircuitBlock {
    pub circuit: CircuitData,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pending: Option<PendingStatus>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CircuitData {
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub metadata: CircuitMetadata,
    #[serde(default)]
    pub exercises: Vec<ExerciseBlock>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CircuitMetadata {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sets: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rest: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExerciseData {
    pub id: ExerciseId,
    pub name: String,
    #[serde(default)]
    pub metadata: ExerciseMetadata,
}

/// Prescription for one exercise. Reps, weight and rest are free-form text
/// ("8-12", "RPE 8", "90s") as written by the coach.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExerciseMetadata {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sets: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reps: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weight: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rest: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

// ---------------------------------------------------------------------------
// Workout
// ---------------------------------------------------------------------------

impl Workout {
    pub fn new(
        id: WorkoutId,
        name: impl Into<String>,
        program_id: ProgramId,
        program_order: u32,
    ) -> Self {
        Workout {
            id,
            name: name.into(),
            program_id,
            program_order,
            blocks: Vec::new(),
        }
    }

    /// Every proposal id materialized anywhere in the tree, including
    /// annotations on exercises nested inside circuits.
    pub fn pending_proposal_ids(&self) -> HashSet<ProposalId> {
        let mut ids = HashSet::new();
        for block in &self.blocks {
            if let Some(pending) = block.pending() {
                ids.insert(pending.proposal_id().clone());
            }
            if let Block::Circuit(circuit) = block {
                for exercise in &circuit.circuit.exercises {
                    if let Some(pending) = &exercise.pending {
                        ids.insert(pending.proposal_id().clone());
                    }
                }
            }
        }
        ids
    }

    /// Returns `true` when no node in the tree carries a pending annotation.
    pub fn is_committed(&self) -> bool {
        self.blocks.iter().all(|block| {
            block.pending().is_none()
                && block
                    .as_circuit()
                    .map_or(true, |c| c.circuit.exercises.iter().all(|e| e.pending.is_none()))
        })
    }
}

// ---------------------------------------------------------------------------
// Block
// ---------------------------------------------------------------------------

impl Block {
    /// Creates an unannotated single-exercise block.
    pub fn exercise(exercise: ExerciseData) -> Self {
        Block::Exercise(ExerciseBlock::new(exercise))
    }

    /// Creates an unannotated circuit block.
    pub fn circuit(circuit: CircuitData) -> Self {
        Block::Circuit(CircuitBlock {
            circuit,
            pending: None,
        })
    }

    pub fn pending(&self) -> Option<&PendingStatus> {
        match self {
            Block::Exercise(b) => b.pending.as_ref(),
            Block::Circuit(b) => b.pending.as_ref(),
        }
    }

    pub fn set_pending(&mut self, pending: Option<PendingStatus>) {
        match self {
            Block::Exercise(b) => b.pending = pending,
            Block::Circuit(b) => b.pending = pending,
        }
    }

    /// Detaches and returns the block's own annotation.
    pub fn take_pending(&mut self) -> Option<PendingStatus> {
        match self {
            Block::Exercise(b) => b.pending.take(),
            Block::Circuit(b) => b.pending.take(),
        }
    }

    /// Consumes the block and returns it with the given annotation attached.
    pub fn with_pending(mut self, pending: PendingStatus) -> Self {
        self.set_pending(Some(pending));
        self
    }

    /// Consumes the block and returns it with its own annotation stripped.
    /// Annotations on nested circuit exercises are left alone.
    pub fn without_pending(mut self) -> Self {
        self.set_pending(None);
        self
    }

    pub fn as_circuit(&self) -> Option<&CircuitBlock> {
        match self {
            Block::Circuit(c) => Some(c),
            Block::Exercise(_) => None,
        }
    }

    pub fn as_circuit_mut(&mut self) -> Option<&mut CircuitBlock> {
        match self {
            Block::Circuit(c) => Some(c),
            Block::Exercise(_) => None,
        }
    }

    /// Short kind name used in diagnostics.
    pub fn kind_name(&self) -> &'static str {
        match self {
            Block::Exercise(_) => "exercise",
            Block::Circuit(_) => "circuit",
        }
    }
}

impl ExerciseBlock {
    pub fn new(exercise: ExerciseData) -> Self {
        ExerciseBlock {
            exercise,
            pending: None,
        }
    }

    pub fn with_pending(mut self, pending: PendingStatus) -> Self {
        self.pending = Some(pending);
        self
    }

    pub fn without_pending(mut self) -> Self {
        self.pending = None;
        self
    }
}

impl CircuitData {
    pub fn new(name: impl Into<String>, exercises: Vec<ExerciseBlock>) -> Self {
        CircuitData {
            name: name.into(),
            description: String::new(),
            metadata: CircuitMetadata::default(),
            exercises,
        }
    }
}

impl ExerciseData {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        ExerciseData {
            id: ExerciseId(id.into()),
            name: name.into(),
            metadata: ExerciseMetadata::default(),
        }
    }
}

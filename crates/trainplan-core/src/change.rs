//! The change-proposal model.
//!
//! A [`Change`] is one atomic, identified request to add, update or remove a
//! block or a circuit exercise in one workout of a program. The set of kinds
//! is the closed enum [`ChangeKind`], so every match over proposals is checked
//! for exhaustiveness by the compiler.
//!
//! Indices are expressed against the workout as it was before the batch was
//! applied. Compensating for index drift inside a batch is the engine's job,
//! not the producer's.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::CoreError;
use crate::id::ProposalId;
use crate::workout::{Block, ExerciseBlock};

/// Wire names of every change kind this build understands.
pub const KNOWN_CHANGE_KINDS: [&str; 6] = [
    "add_block",
    "update_block",
    "remove_block",
    "add_circuit_exercise",
    "update_circuit_exercise",
    "remove_circuit_exercise",
];

/// A single proposed change to a workout tree.
///
/// Serialized flat: `{"type": "remove_block", "id": "...", "workoutIndex": 0, "blockIndex": 2}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Change {
    /// Unique proposal id.
    pub id: ProposalId,
    /// Which workout of the program this proposal targets.
    pub workout_index: usize,
    #[serde(flatten)]
    pub kind: ChangeKind,
}

/// What a [`Change`] does.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ChangeKind {
    /// Insert `block` so that it ends up at `block_index`.
    #[serde(rename_all = "camelCase")]
    AddBlock { block_index: usize, block: Block },
    /// Replace the block at `block_index`.
    #[serde(rename_all = "camelCase")]
    UpdateBlock { block_index: usize, block: Block },
    /// Remove the block at `block_index`.
    #[serde(rename_all = "camelCase")]
    RemoveBlock { block_index: usize },
    /// Insert `exercise` into the circuit at `circuit_block_index`.
    #[serde(rename_all = "camelCase")]
    AddCircuitExercise {
        circuit_block_index: usize,
        exercise_index: usize,
        exercise: ExerciseBlock,
    },
    /// Replace one exercise of the circuit at `circuit_block_index`.
    #[serde(rename_all = "camelCase")]
    UpdateCircuitExercise {
        circuit_block_index: usize,
        exercise_index: usize,
        exercise: ExerciseBlock,
    },
    /// Remove one exercise of the circuit at `circuit_block_index`.
    #[serde(rename_all = "camelCase")]
    RemoveCircuitExercise {
        circuit_block_index: usize,
        exercise_index: usize,
    },
}

impl Change {
    pub fn new(id: impl Into<ProposalId>, workout_index: usize, kind: ChangeKind) -> Self {
        Change {
            id: id.into(),
            workout_index,
            kind,
        }
    }

    /// Decodes one proposal, distinguishing an unknown kind from a malformed body.
    pub fn from_value(value: &Value) -> Result<Change, CoreError> {
        let kind = match value.get("type").and_then(Value::as_str) {
            Some(kind) => kind,
            None => return Err(CoreError::MissingChangeKind),
        };
        if !KNOWN_CHANGE_KINDS.contains(&kind) {
            return Err(CoreError::UnknownChangeKind {
                kind: kind.to_string(),
            });
        }
        Ok(Change::deserialize(value)?)
    }
}

impl ChangeKind {
    /// Stable wire name of this kind, as listed in [`KNOWN_CHANGE_KINDS`].
    pub fn label(&self) -> &'static str {
        match self {
            ChangeKind::AddBlock { .. } => "add_block",
            ChangeKind::UpdateBlock { .. } => "update_block",
            ChangeKind::RemoveBlock { .. } => "remove_block",
            ChangeKind::AddCircuitExercise { .. } => "add_circuit_exercise",
            ChangeKind::UpdateCircuitExercise { .. } => "update_circuit_exercise",
            ChangeKind::RemoveCircuitExercise { .. } => "remove_circuit_exercise",
        }
    }
}

/// Decodes a proposal batch leniently.
///
/// Each element is decoded on its own; elements with an unknown kind or a
/// malformed body are skipped with a warning so one bad proposal never drops
/// the rest of the batch.
pub fn parse_changes(value: &Value) -> Vec<Change> {
    let Some(items) = value.as_array() else {
        tracing::warn!("proposal batch is not a JSON array, ignoring it");
        return Vec::new();
    };

    let mut changes = Vec::with_capacity(items.len());
    for (position, item) in items.iter().enumerate() {
        match Change::from_value(item) {
            Ok(change) => changes.push(change),
            Err(e) => tracing::warn!("skipping proposal at position {}: {}", position, e),
        }
    }
    changes
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn change_json_is_flat_and_camel_case() {
        let change = Change::new(
            "p1",
            2,
            ChangeKind::RemoveCircuitExercise {
                circuit_block_index: 1,
                exercise_index: 0,
            },
        );
        let json = serde_json::to_value(&change).unwrap();
        assert_eq!(
            json,
            json!({
                "id": "p1",
                "workoutIndex": 2,
                "type": "remove_circuit_exercise",
                "circuitBlockIndex": 1,
                "exerciseIndex": 0,
            })
        );
        let back: Change = serde_json::from_value(json).unwrap();
        assert_eq!(back, change);
    }

    #[test]
    fn labels_cover_every_known_kind() {
        let block = Block::exercise(crate::workout::ExerciseData::new("a", "A"));
        let exercise = ExerciseBlock::new(crate::workout::ExerciseData::new("b", "B"));
        let kinds = [
            ChangeKind::AddBlock { block_index: 0, block: block.clone() },
            ChangeKind::UpdateBlock { block_index: 0, block },
            ChangeKind::RemoveBlock { block_index: 0 },
            ChangeKind::AddCircuitExercise {
                circuit_block_index: 0,
                exercise_index: 0,
                exercise: exercise.clone(),
            },
            ChangeKind::UpdateCircuitExercise {
                circuit_block_index: 0,
                exercise_index: 0,
                exercise,
            },
            ChangeKind::RemoveCircuitExercise {
                circuit_block_index: 0,
                exercise_index: 0,
            },
        ];
        let labels: Vec<&str> = kinds.iter().map(ChangeKind::label).collect();
        assert_eq!(labels, KNOWN_CHANGE_KINDS);
    }

    #[test]
    fn parse_changes_skips_unknown_and_malformed_entries() {
        let batch = json!([
            {"type": "remove_block", "id": "p1", "workoutIndex": 0, "blockIndex": 0},
            {"type": "reorder_blocks", "id": "p2", "workoutIndex": 0},
            {"type": "remove_block", "id": "p3", "workoutIndex": 0},
            {"id": "p4", "workoutIndex": 0},
            {"type": "update_block", "id": "p5", "workoutIndex": 1, "blockIndex": 0,
             "block": {"type": "exercise", "exercise": {"id": "dl", "name": "Deadlift"}}},
        ]);
        let changes = parse_changes(&batch);
        let ids: Vec<&str> = changes.iter().map(|c| c.id.as_str()).collect();
        assert_eq!(ids, vec!["p1", "p5"]);
    }

    #[test]
    fn from_value_reports_unknown_kind() {
        let err = Change::from_value(&json!({"type": "swap_blocks", "id": "p1", "workoutIndex": 0}))
            .unwrap_err();
        assert!(matches!(err, CoreError::UnknownChangeKind { ref kind } if kind == "swap_blocks"));
    }

    #[test]
    fn non_array_batch_is_empty() {
        assert!(parse_changes(&json!({"type": "remove_block"})).is_empty());
    }
}

//! Ordering a proposal batch for sequential application.
//!
//! Removals and updates only annotate nodes in place, so they never change
//! array lengths and may run first in any relative order. Insertions grow
//! arrays and run last, from the highest target index to the lowest: an
//! insertion at a high index leaves every lower, still-pending target index
//! untouched. Circuit-exercise insertions run before block insertions so that
//! their `circuit_block_index` is resolved against the pre-batch block list.

use std::cmp::{Ordering, Reverse};

use trainplan_core::change::{Change, ChangeKind};

/// Application phase of a proposal. Phases run in declaration order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ApplyPhase {
    Removal,
    Update,
    CircuitInsert,
    BlockInsert,
}

impl ApplyPhase {
    pub fn of(kind: &ChangeKind) -> ApplyPhase {
        match kind {
            ChangeKind::RemoveBlock { .. } | ChangeKind::RemoveCircuitExercise { .. } => {
                ApplyPhase::Removal
            }
            ChangeKind::UpdateBlock { .. } | ChangeKind::UpdateCircuitExercise { .. } => {
                ApplyPhase::Update
            }
            ChangeKind::AddCircuitExercise { .. } => ApplyPhase::CircuitInsert,
            ChangeKind::AddBlock { .. } => ApplyPhase::BlockInsert,
        }
    }
}

/// Reorders a batch into an application-safe sequence.
///
/// The sort is stable, so removals and updates keep their submission order.
pub fn sort_changes(mut changes: Vec<Change>) -> Vec<Change> {
    changes.sort_by(compare_changes);
    changes
}

fn compare_changes(a: &Change, b: &Change) -> Ordering {
    ApplyPhase::of(&a.kind)
        .cmp(&ApplyPhase::of(&b.kind))
        .then_with(|| Reverse(insertion_key(&a.kind)).cmp(&Reverse(insertion_key(&b.kind))))
}

/// Target position of an insertion; `(0, 0)` for index-neutral kinds.
fn insertion_key(kind: &ChangeKind) -> (usize, usize) {
    match kind {
        ChangeKind::AddCircuitExercise {
            circuit_block_index,
            exercise_index,
            ..
        } => (*circuit_block_index, *exercise_index),
        ChangeKind::AddBlock { block_index, .. } => (*block_index, 0),
        ChangeKind::UpdateBlock { .. }
        | ChangeKind::RemoveBlock { .. }
        | ChangeKind::UpdateCircuitExercise { .. }
        | ChangeKind::RemoveCircuitExercise { .. } => (0, 0),
    }
}

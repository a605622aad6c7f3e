//! The merge engine: overlays a proposal batch onto a workout as pending
//! annotations.
//!
//! Merging never mutates its input. Proposals already materialized in the
//! tree are recognized by their ids and never applied a second time. When
//! nothing is left to apply the input is handed back borrowed, which lets
//! callers detect "nothing changed" by pointer equality.
//!
//! Indices always refer to the pre-batch tree. Re-merging a batch over a tree
//! that already carries some of its annotations therefore replays the batch
//! from the tree those annotations were made against, which makes
//! `merge(merge(w, P), P) == merge(w, P)` hold even for proposals that were
//! skipped the first time.
//!
//! Removals are marked, not spliced: the removed node stays in place with a
//! [`PendingStatus::Removing`] annotation until the proposal is accepted. This
//! keeps every sibling index in the batch stable. Insertions past the end of
//! a list append.

use std::borrow::Cow;
use std::collections::HashSet;

use trainplan_core::change::{Change, ChangeKind};
use trainplan_core::id::ProposalId;
use trainplan_core::pending::PendingStatus;
use trainplan_core::workout::{Block, ExerciseBlock, Workout};

use crate::error::SkipReason;
use crate::resolve::{resolve, Decision};
use crate::sort::sort_changes;

/// A proposal that was recovered from instead of applied.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedChange {
    pub proposal_id: ProposalId,
    pub reason: SkipReason,
}

/// Result of [`merge_with_report`].
#[derive(Debug, Clone)]
pub struct MergeReport<'a> {
    /// The annotated tree. Borrowed when no proposal remained to apply.
    pub workout: Cow<'a, Workout>,
    /// Proposals newly materialized by this merge, in application order.
    pub applied: Vec<ProposalId>,
    /// Proposals skipped because their target was missing or of the wrong kind.
    pub skipped: Vec<SkippedChange>,
}

impl MergeReport<'_> {
    /// Returns `true` if the merge produced a new tree.
    pub fn changed(&self) -> bool {
        matches!(self.workout, Cow::Owned(_))
    }
}

/// Overlays the proposals of `changes` that target `workout_index` onto
/// `workout`.
pub fn merge<'a>(
    workout: &'a Workout,
    changes: &[Change],
    workout_index: usize,
) -> Cow<'a, Workout> {
    merge_with_report(workout, changes, workout_index).workout
}

/// Like [`merge`], also reporting which proposals were applied or skipped.
pub fn merge_with_report<'a>(
    workout: &'a Workout,
    changes: &[Change],
    workout_index: usize,
) -> MergeReport<'a> {
    let present = workout.pending_proposal_ids();
    let mut seen = HashSet::new();
    let batch: Vec<&Change> = changes
        .iter()
        .filter(|c| c.workout_index == workout_index)
        .filter(|c| seen.insert(c.id.clone()))
        .collect();

    if batch.iter().all(|c| present.contains(&c.id)) {
        return MergeReport {
            workout: Cow::Borrowed(workout),
            applied: Vec::new(),
            skipped: Vec::new(),
        };
    }

    let mut replayed: Vec<&ProposalId> = batch
        .iter()
        .map(|c| &c.id)
        .filter(|id| present.contains(*id))
        .collect();
    if replayed.is_empty() {
        return apply_batch(workout, workout.clone(), batch);
    }

    // Part of the batch is already in the tree: undo it and replay the whole
    // batch against the tree it was written for.
    replayed.sort();
    tracing::debug!(
        "replaying {} materialized proposals on workout {}",
        replayed.len(),
        workout.id
    );
    let mut base = workout.clone();
    for id in replayed {
        base = resolve(&base, id, Decision::Reject);
    }
    let mut report = apply_batch(workout, base, batch);
    report.applied.retain(|id| !present.contains(id));
    report
}

fn apply_batch<'a>(workout: &Workout, mut merged: Workout, batch: Vec<&Change>) -> MergeReport<'a> {
    let mut applied = Vec::with_capacity(batch.len());
    let mut skipped = Vec::new();

    for change in sort_changes(batch.into_iter().cloned().collect()) {
        match apply_change(&mut merged.blocks, &change) {
            Ok(()) => {
                tracing::debug!(
                    "applied {} proposal {} to workout {}",
                    change.kind.label(),
                    change.id,
                    workout.id
                );
                applied.push(change.id);
            }
            Err(reason) => {
                tracing::warn!(
                    "skipping {} proposal {} for workout {}: {}",
                    change.kind.label(),
                    change.id,
                    workout.id,
                    reason
                );
                skipped.push(SkippedChange {
                    proposal_id: change.id,
                    reason,
                });
            }
        }
    }

    MergeReport {
        workout: Cow::Owned(merged),
        applied,
        skipped,
    }
}

/// Proposal ids in `changes` targeting `workout_index` that are not yet
/// materialized in `workout`.
pub fn unapplied_ids(
    workout: &Workout,
    changes: &[Change],
    workout_index: usize,
) -> HashSet<ProposalId> {
    let present = workout.pending_proposal_ids();
    changes
        .iter()
        .filter(|c| c.workout_index == workout_index && !present.contains(&c.id))
        .map(|c| c.id.clone())
        .collect()
}

fn apply_change(blocks: &mut Vec<Block>, change: &Change) -> Result<(), SkipReason> {
    let proposal_id = change.id.clone();
    match &change.kind {
        ChangeKind::AddBlock { block_index, block } => {
            let index = (*block_index).min(blocks.len());
            blocks.insert(
                index,
                block.clone().with_pending(PendingStatus::Adding { proposal_id }),
            );
        }
        ChangeKind::UpdateBlock { block_index, block } => {
            let slot = unannotated_block(blocks, *block_index)?;
            // The snapshot must not bury annotations of other proposals.
            if let Some(nested) = nested_pending_id(slot) {
                return Err(SkipReason::TargetAlreadyPending {
                    proposal_id: nested.clone(),
                });
            }
            let old = std::mem::replace(slot, block.clone());
            slot.set_pending(Some(PendingStatus::Updating {
                proposal_id,
                old_block: Box::new(old),
            }));
        }
        ChangeKind::RemoveBlock { block_index } => {
            let slot = unannotated_block(blocks, *block_index)?;
            slot.set_pending(Some(PendingStatus::Removing { proposal_id }));
        }
        ChangeKind::AddCircuitExercise {
            circuit_block_index,
            exercise_index,
            exercise,
        } => {
            let exercises = circuit_exercises(blocks, *circuit_block_index)?;
            let index = (*exercise_index).min(exercises.len());
            exercises.insert(
                index,
                exercise.clone().with_pending(PendingStatus::Adding { proposal_id }),
            );
        }
        ChangeKind::UpdateCircuitExercise {
            circuit_block_index,
            exercise_index,
            exercise,
        } => {
            let exercises = circuit_exercises(blocks, *circuit_block_index)?;
            let slot = unannotated_exercise(exercises, *circuit_block_index, *exercise_index)?;
            let old = std::mem::replace(slot, exercise.clone());
            slot.pending = Some(PendingStatus::Updating {
                proposal_id,
                old_block: Box::new(Block::Exercise(old)),
            });
        }
        ChangeKind::RemoveCircuitExercise {
            circuit_block_index,
            exercise_index,
        } => {
            let exercises = circuit_exercises(blocks, *circuit_block_index)?;
            let slot = unannotated_exercise(exercises, *circuit_block_index, *exercise_index)?;
            slot.pending = Some(PendingStatus::Removing { proposal_id });
        }
    }
    Ok(())
}

fn unannotated_block(blocks: &mut [Block], index: usize) -> Result<&mut Block, SkipReason> {
    let len = blocks.len();
    let block = blocks
        .get_mut(index)
        .ok_or(SkipReason::BlockOutOfRange { index, len })?;
    if let Some(pending) = block.pending() {
        return Err(SkipReason::TargetAlreadyPending {
            proposal_id: pending.proposal_id().clone(),
        });
    }
    Ok(block)
}

fn nested_pending_id(block: &Block) -> Option<&ProposalId> {
    block
        .as_circuit()?
        .circuit
        .exercises
        .iter()
        .find_map(|e| e.pending.as_ref().map(|p| p.proposal_id()))
}

fn circuit_exercises(
    blocks: &mut [Block],
    index: usize,
) -> Result<&mut Vec<ExerciseBlock>, SkipReason> {
    let len = blocks.len();
    match blocks.get_mut(index) {
        Some(Block::Circuit(circuit)) => Ok(&mut circuit.circuit.exercises),
        Some(other) => Err(SkipReason::NotACircuit {
            index,
            found: other.kind_name(),
        }),
        None => Err(SkipReason::BlockOutOfRange { index, len }),
    }
}

fn unannotated_exercise(
    exercises: &mut [ExerciseBlock],
    circuit_block_index: usize,
    index: usize,
) -> Result<&mut ExerciseBlock, SkipReason> {
    let len = exercises.len();
    let exercise = exercises
        .get_mut(index)
        .ok_or(SkipReason::ExerciseOutOfRange {
            circuit_block_index,
            index,
            len,
        })?;
    if let Some(pending) = &exercise.pending {
        return Err(SkipReason::TargetAlreadyPending {
            proposal_id: pending.proposal_id().clone(),
        });
    }
    Ok(exercise)
}

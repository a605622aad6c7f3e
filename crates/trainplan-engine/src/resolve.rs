//! Accepting or rejecting one proposal on an annotated tree.
//!
//! Every node whose annotation names the resolved proposal is settled
//! according to this table, for blocks and for exercises nested inside
//! circuits alike:
//!
//! | annotation | accept                | reject                   |
//! |------------|-----------------------|--------------------------|
//! | Adding     | keep, strip annotation| delete node              |
//! | Removing   | delete node           | keep, strip annotation   |
//! | Updating   | keep new content      | restore `old_block`      |
//!
//! Nodes annotated by other proposals are left untouched.

use trainplan_core::id::ProposalId;
use trainplan_core::pending::PendingStatus;
use trainplan_core::workout::{Block, ExerciseBlock, Workout};

/// The reviewer's verdict on one proposal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Decision {
    Accept,
    Reject,
}

/// What happens to a node once its annotation is settled.
#[derive(Debug, Clone, PartialEq)]
pub enum Resolution {
    /// Keep the node as it is now, without the annotation.
    Keep,
    /// Drop the node from its list.
    Delete,
    /// Put the pre-change snapshot back.
    Restore(Box<Block>),
}

impl Resolution {
    pub fn of(pending: PendingStatus, decision: Decision) -> Resolution {
        match (pending, decision) {
            (PendingStatus::Adding { .. }, Decision::Accept) => Resolution::Keep,
            (PendingStatus::Adding { .. }, Decision::Reject) => Resolution::Delete,
            (PendingStatus::Removing { .. }, Decision::Accept) => Resolution::Delete,
            (PendingStatus::Removing { .. }, Decision::Reject) => Resolution::Keep,
            (PendingStatus::Updating { .. }, Decision::Accept) => Resolution::Keep,
            (PendingStatus::Updating { old_block, .. }, Decision::Reject) => {
                Resolution::Restore(old_block)
            }
        }
    }
}

/// Returns `workout` with the effect of `proposal_id` made permanent
/// (accept) or undone (reject).
///
/// Resolving an id that appears nowhere in the tree returns an equal copy.
pub fn resolve(workout: &Workout, proposal_id: &ProposalId, decision: Decision) -> Workout {
    let mut resolved = workout.clone();
    let blocks = std::mem::take(&mut resolved.blocks);
    resolved.blocks = blocks
        .into_iter()
        .filter_map(|block| resolve_block(block, proposal_id, decision))
        .collect();
    tracing::debug!(
        "resolved proposal {} ({:?}) on workout {}: {} -> {} blocks",
        proposal_id,
        decision,
        workout.id,
        workout.blocks.len(),
        resolved.blocks.len()
    );
    resolved
}

fn resolve_block(mut block: Block, proposal_id: &ProposalId, decision: Decision) -> Option<Block> {
    if block.pending().is_some_and(|p| p.is_for(proposal_id)) {
        if let Some(pending) = block.take_pending() {
            match Resolution::of(pending, decision) {
                Resolution::Keep => {}
                Resolution::Delete => return None,
                Resolution::Restore(old) => block = *old,
            }
        }
    }

    if let Block::Circuit(circuit) = &mut block {
        let exercises = std::mem::take(&mut circuit.circuit.exercises);
        circuit.circuit.exercises = exercises
            .into_iter()
            .filter_map(|exercise| resolve_exercise(exercise, proposal_id, decision))
            .collect();
    }
    Some(block)
}

fn resolve_exercise(
    mut exercise: ExerciseBlock,
    proposal_id: &ProposalId,
    decision: Decision,
) -> Option<ExerciseBlock> {
    if !exercise.pending.as_ref().is_some_and(|p| p.is_for(proposal_id)) {
        return Some(exercise);
    }
    let pending = exercise.pending.take()?;
    match Resolution::of(pending, decision) {
        Resolution::Keep => Some(exercise),
        Resolution::Delete => None,
        Resolution::Restore(old) => match *old {
            Block::Exercise(previous) => Some(previous),
            Block::Circuit(_) => {
                tracing::warn!(
                    "proposal {} restored a circuit snapshot inside a circuit; keeping exercise {}",
                    proposal_id,
                    exercise.exercise.id
                );
                Some(exercise)
            }
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use trainplan_core::workout::{CircuitData, ExerciseData};

    fn workout(blocks: Vec<Block>) -> Workout {
        let mut w = Workout::new("w1".into(), "Upper B", "prog".into(), 1);
        w.blocks = blocks;
        w
    }

    fn exercise(id: &str) -> ExerciseBlock {
        ExerciseBlock::new(ExerciseData::new(id, id))
    }

    fn adding(id: &str) -> PendingStatus {
        PendingStatus::Adding {
            proposal_id: id.into(),
        }
    }

    fn removing(id: &str) -> PendingStatus {
        PendingStatus::Removing {
            proposal_id: id.into(),
        }
    }

    #[test]
    fn resolution_table() {
        let old = Block::exercise(ExerciseData::new("a", "a"));
        let updating = PendingStatus::Updating {
            proposal_id: "p".into(),
            old_block: Box::new(old.clone()),
        };
        assert_eq!(Resolution::of(adding("p"), Decision::Accept), Resolution::Keep);
        assert_eq!(Resolution::of(adding("p"), Decision::Reject), Resolution::Delete);
        assert_eq!(Resolution::of(removing("p"), Decision::Accept), Resolution::Delete);
        assert_eq!(Resolution::of(removing("p"), Decision::Reject), Resolution::Keep);
        assert_eq!(Resolution::of(updating.clone(), Decision::Accept), Resolution::Keep);
        assert_eq!(
            Resolution::of(updating, Decision::Reject),
            Resolution::Restore(Box::new(old))
        );
    }

    #[test]
    fn accept_adding_strips_annotation() {
        let w = workout(vec![Block::Exercise(exercise("a").with_pending(adding("p1")))]);
        let resolved = resolve(&w, &"p1".into(), Decision::Accept);
        assert_eq!(resolved.blocks, vec![Block::Exercise(exercise("a"))]);
    }

    #[test]
    fn reject_adding_deletes_node() {
        let w = workout(vec![
            Block::Exercise(exercise("a").with_pending(adding("p1"))),
            Block::Exercise(exercise("b")),
        ]);
        let resolved = resolve(&w, &"p1".into(), Decision::Reject);
        assert_eq!(resolved.blocks, vec![Block::Exercise(exercise("b"))]);
    }

    #[test]
    fn other_proposals_are_untouched() {
        let w = workout(vec![
            Block::Exercise(exercise("a").with_pending(removing("p1"))),
            Block::Exercise(exercise("b").with_pending(adding("p2"))),
        ]);
        let resolved = resolve(&w, &"p2".into(), Decision::Accept);
        assert_eq!(resolved.blocks[0], w.blocks[0]);
        assert!(resolved.blocks[1].pending().is_none());
    }

    #[test]
    fn unknown_proposal_leaves_tree_equal() {
        let w = workout(vec![Block::Exercise(exercise("a").with_pending(removing("p1")))]);
        assert_eq!(resolve(&w, &"nope".into(), Decision::Accept), w);
    }

    #[test]
    fn nested_exercises_resolve_independently_of_circuit() {
        let circuit = Block::circuit(CircuitData::new(
            "C1",
            vec![
                exercise("e1").with_pending(removing("px")),
                exercise("e2"),
                exercise("e3").with_pending(adding("py")),
            ],
        ))
        .with_pending(adding("pc"));
        let w = workout(vec![circuit]);

        let after_x = resolve(&w, &"px".into(), Decision::Accept);
        let c = after_x.blocks[0].as_circuit().unwrap();
        assert_eq!(c.pending, Some(adding("pc")));
        let ids: Vec<&str> = c
            .circuit
            .exercises
            .iter()
            .map(|e| e.exercise.id.0.as_str())
            .collect();
        assert_eq!(ids, vec!["e2", "e3"]);

        let after_c = resolve(&after_x, &"pc".into(), Decision::Accept);
        let c = after_c.blocks[0].as_circuit().unwrap();
        assert!(c.pending.is_none());
        assert_eq!(c.circuit.exercises[1].pending, Some(adding("py")));
    }

    #[test]
    fn reject_nested_update_restores_exercise() {
        let previous = exercise("e1");
        let updated = ExerciseBlock::new(ExerciseData::new("e1", "Goblet Squat")).with_pending(
            PendingStatus::Updating {
                proposal_id: "pu".into(),
                old_block: Box::new(Block::Exercise(previous.clone())),
            },
        );
        let w = workout(vec![Block::circuit(CircuitData::new("C1", vec![updated]))]);
        let resolved = resolve(&w, &"pu".into(), Decision::Reject);
        assert_eq!(
            resolved.blocks[0].as_circuit().unwrap().circuit.exercises,
            vec![previous]
        );
    }

    #[test]
    fn nested_update_with_circuit_snapshot_keeps_current_exercise() {
        let bogus =
            ExerciseBlock::new(ExerciseData::new("e1", "e1")).with_pending(PendingStatus::Updating {
                proposal_id: "pu".into(),
                old_block: Box::new(Block::circuit(CircuitData::new("X", vec![]))),
            });
        let w = workout(vec![Block::circuit(CircuitData::new("C1", vec![bogus]))]);
        let resolved = resolve(&w, &"pu".into(), Decision::Reject);
        assert_eq!(
            resolved.blocks[0].as_circuit().unwrap().circuit.exercises,
            vec![exercise("e1")]
        );
    }
}

//! Property tests for reviews where proposals keep streaming in between
//! decisions.
//!
//! After every step no preview may carry an annotation for a proposal that
//! was settled, whether the reviewer decided it or it went away with the
//! node it was attached to, and every annotation must belong to an
//! outstanding proposal.

use std::collections::HashSet;

use proptest::prelude::*;

use trainplan_core::change::{Change, ChangeKind};
use trainplan_core::id::ProposalId;
use trainplan_core::workout::{Block, CircuitData, ExerciseBlock, ExerciseData, Workout};
use trainplan_review::ReviewSession;

#[derive(Debug, Clone)]
enum Step {
    Stream(Vec<(usize, ChangeKind)>),
    Resend(usize),
    Decide { pick: usize, accept: bool },
}

fn arb_exercise() -> impl Strategy<Value = ExerciseBlock> {
    (0u32..20).prop_map(|n| {
        ExerciseBlock::new(ExerciseData::new(format!("ex-{n}"), "Exercise"))
    })
}

fn arb_block() -> impl Strategy<Value = Block> {
    prop_oneof![
        arb_exercise().prop_map(Block::Exercise),
        prop::collection::vec(arb_exercise(), 0..4)
            .prop_map(|exercises| Block::circuit(CircuitData::new("circuit", exercises))),
    ]
}

fn arb_workouts() -> impl Strategy<Value = Vec<Workout>> {
    prop::collection::vec(prop::collection::vec(arb_block(), 0..4), 1..3).prop_map(|days| {
        days.into_iter()
            .enumerate()
            .map(|(i, blocks)| {
                let id = format!("day-{i}");
                let mut w = Workout::new(id.as_str().into(), "Day", "prog".into(), i as u32);
                w.blocks = blocks;
                w
            })
            .collect()
    })
}

fn arb_kind() -> impl Strategy<Value = ChangeKind> {
    prop_oneof![
        (0usize..5, arb_block())
            .prop_map(|(block_index, block)| ChangeKind::AddBlock { block_index, block }),
        (0usize..5, arb_block())
            .prop_map(|(block_index, block)| ChangeKind::UpdateBlock { block_index, block }),
        (0usize..5).prop_map(|block_index| ChangeKind::RemoveBlock { block_index }),
        (0usize..5, 0usize..4, arb_exercise()).prop_map(|(c, e, exercise)| {
            ChangeKind::AddCircuitExercise {
                circuit_block_index: c,
                exercise_index: e,
                exercise,
            }
        }),
        (0usize..5, 0usize..4, arb_exercise()).prop_map(|(c, e, exercise)| {
            ChangeKind::UpdateCircuitExercise {
                circuit_block_index: c,
                exercise_index: e,
                exercise,
            }
        }),
        (0usize..5, 0usize..4).prop_map(|(c, e)| ChangeKind::RemoveCircuitExercise {
            circuit_block_index: c,
            exercise_index: e,
        }),
    ]
}

fn arb_step() -> impl Strategy<Value = Step> {
    prop_oneof![
        3 => prop::collection::vec((0usize..2, arb_kind()), 1..4).prop_map(Step::Stream),
        1 => any::<usize>().prop_map(Step::Resend),
        3 => (any::<usize>(), any::<bool>())
            .prop_map(|(pick, accept)| Step::Decide { pick, accept }),
    ]
}

fn outstanding(session: &ReviewSession) -> Vec<ProposalId> {
    session.batch().changes().iter().map(|c| c.id.clone()).collect()
}

proptest! {
    #[test]
    fn settled_proposals_never_come_back(
        workouts in arb_workouts(),
        steps in prop::collection::vec(arb_step(), 1..12)
    ) {
        let mut session = ReviewSession::new(workouts);
        let mut sent: Vec<Change> = Vec::new();
        let mut settled: HashSet<ProposalId> = HashSet::new();

        for step in steps {
            match step {
                Step::Stream(items) => {
                    let mut changes = Vec::with_capacity(items.len());
                    for (workout_index, kind) in items {
                        let id = format!("p{}", sent.len());
                        let change = Change::new(id.as_str(), workout_index, kind);
                        sent.push(change.clone());
                        changes.push(change);
                    }
                    session.add_proposed_changes(changes);
                }
                Step::Resend(n) => {
                    if !sent.is_empty() {
                        let change = sent[n % sent.len()].clone();
                        session.add_proposed_changes(vec![change]);
                    }
                }
                Step::Decide { pick, accept } => {
                    let before = outstanding(&session);
                    if !before.is_empty() {
                        let id = before[pick % before.len()].clone();
                        let decided = if accept {
                            session.apply_pending_proposal_by_id(&id)
                        } else {
                            session.reject_pending_proposal_by_id(&id)
                        };
                        prop_assert!(decided);
                        let after: HashSet<ProposalId> =
                            outstanding(&session).into_iter().collect();
                        prop_assert!(!after.contains(&id));
                        settled.extend(before.into_iter().filter(|id| !after.contains(id)));
                    }
                }
            }

            let batch = session.batch();
            for change in batch.changes() {
                prop_assert!(!settled.contains(&change.id), "{} came back", change.id);
            }
            for workout in session.workouts() {
                for id in workout.pending_proposal_ids() {
                    prop_assert!(!settled.contains(&id), "{} annotated after settling", id);
                    prop_assert!(batch.contains(&id), "{} annotated but not outstanding", id);
                }
            }
        }

        while let Some(id) = session.current_change_id().cloned() {
            prop_assert!(session.reject_pending_proposal_by_id(&id));
        }
        prop_assert!(session.is_settled());
    }
}

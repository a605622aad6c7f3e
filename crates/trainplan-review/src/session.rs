//! The editor state layer: preview trees kept in step with the proposal store.
//!
//! [`ReviewSession`] owns the workouts of one program and the outstanding
//! [`ProposalBatch`]. Proposals are merged into their workout once, when they
//! arrive; a proposal the merge skips stays outstanding (and reported) until
//! the reviewer dismisses it. Accepting or rejecting a proposal resolves it
//! on its target workout and removes it from the batch in one step.
//!
//! Resolving a node can carry away annotations nested inside it, for example
//! accepting the removal of a circuit whose exercises have proposals of their
//! own. Those proposals are dropped from the batch together with the node, and
//! a settled id is never merged again.

use std::borrow::Cow;
use std::collections::{BTreeSet, HashSet};

use trainplan_core::change::Change;
use trainplan_core::id::ProposalId;
use trainplan_core::workout::Workout;
use trainplan_engine::{merge_with_report, resolve, Decision, SkippedChange};

use crate::batch::ProposalBatch;
use crate::error::ReviewError;

/// Workouts under review together with their outstanding proposals.
#[derive(Debug, Clone, Default)]
pub struct ReviewSession {
    workouts: Vec<Workout>,
    batch: ProposalBatch,
    skipped: Vec<SkippedChange>,
    settled: BTreeSet<ProposalId>,
}

impl ReviewSession {
    /// Starts a session over committed workouts, in program order.
    pub fn new(workouts: Vec<Workout>) -> Self {
        ReviewSession {
            workouts,
            ..ReviewSession::default()
        }
    }

    /// Rebuilds a session from previews and proposals saved earlier.
    ///
    /// The previews are taken as they are; they are not re-merged, since
    /// decisions taken since the batch arrived may have shifted positions.
    pub fn resume(
        workouts: Vec<Workout>,
        changes: Vec<Change>,
        current: Option<ProposalId>,
        settled: impl IntoIterator<Item = ProposalId>,
    ) -> Self {
        let mut batch = ProposalBatch::from_changes(changes);
        batch.set_current_change_id(current);
        ReviewSession {
            workouts,
            batch,
            skipped: Vec::new(),
            settled: settled.into_iter().collect(),
        }
    }

    /// The preview trees, annotated with every applied proposal.
    pub fn workouts(&self) -> &[Workout] {
        &self.workouts
    }

    pub fn workout(&self, index: usize) -> Option<&Workout> {
        self.workouts.get(index)
    }

    pub fn batch(&self) -> &ProposalBatch {
        &self.batch
    }

    pub fn current_change_id(&self) -> Option<&ProposalId> {
        self.batch.current()
    }

    /// Proposals a merge could not place in their workout and that are still
    /// outstanding.
    pub fn skipped(&self) -> &[SkippedChange] {
        &self.skipped
    }

    /// Ids decided by the reviewer or carried away with a resolved node.
    pub fn settled(&self) -> &BTreeSet<ProposalId> {
        &self.settled
    }

    /// Adds streamed-in proposals and merges the new ones into the previews.
    /// Proposals that were already settled are ignored.
    pub fn add_proposed_changes(&mut self, changes: impl IntoIterator<Item = Change>) -> usize {
        let fresh: Vec<Change> = changes
            .into_iter()
            .filter(|c| self.is_new(&c.id))
            .collect();
        let added = self.batch.add_proposed_changes(fresh.clone());
        self.merge_fresh(&fresh);
        added
    }

    /// Replaces the batch. Annotations left behind by proposals that are no
    /// longer in the batch are rolled back before the new proposals are merged.
    pub fn set_proposed_changes(&mut self, changes: impl IntoIterator<Item = Change>) {
        let known = self.batch_ids();
        let settled = &self.settled;
        let incoming: Vec<Change> = changes
            .into_iter()
            .filter(|c| !settled.contains(&c.id))
            .collect();
        self.batch.set_proposed_changes(incoming);

        let keep = self.batch_ids();
        for index in 0..self.workouts.len() {
            let mut stale: Vec<ProposalId> = self.workouts[index]
                .pending_proposal_ids()
                .into_iter()
                .filter(|id| !keep.contains(id))
                .collect();
            stale.sort();
            for id in stale {
                tracing::debug!(
                    "rolling back dropped proposal {} on workout {}",
                    id,
                    self.workouts[index].id
                );
                let swept = resolve_in(&mut self.workouts[index], &id, Decision::Reject);
                self.drop_swept(swept, index);
            }
        }
        self.skipped.retain(|s| keep.contains(&s.proposal_id));

        let fresh: Vec<Change> = self
            .batch
            .changes()
            .iter()
            .filter(|c| !known.contains(&c.id))
            .cloned()
            .collect();
        self.merge_fresh(&fresh);
    }

    /// Accepts one proposal. Returns `false` if it is not outstanding.
    pub fn apply_pending_proposal_by_id(&mut self, id: &ProposalId) -> bool {
        self.settle(id, Decision::Accept)
    }

    /// Rejects one proposal. Returns `false` if it is not outstanding.
    pub fn reject_pending_proposal_by_id(&mut self, id: &ProposalId) -> bool {
        self.settle(id, Decision::Reject)
    }

    /// Moves the review focus; see [`ProposalBatch::set_current_change_id`].
    pub fn set_current_change_id(&mut self, id: Option<ProposalId>) -> bool {
        self.batch.set_current_change_id(id)
    }

    /// Returns `true` once every proposal is decided and no workout carries
    /// an annotation.
    pub fn is_settled(&self) -> bool {
        self.batch.is_empty() && self.workouts.iter().all(Workout::is_committed)
    }

    /// Ends the session, handing back the committed workouts.
    pub fn into_committed(self) -> Result<Vec<Workout>, ReviewError> {
        if !self.batch.is_empty() {
            return Err(ReviewError::OutstandingProposals {
                count: self.batch.len(),
            });
        }
        if let Some(workout) = self.workouts.iter().find(|w| !w.is_committed()) {
            return Err(ReviewError::UnresolvedAnnotations {
                workout: workout.id.clone(),
            });
        }
        Ok(self.workouts)
    }

    fn batch_ids(&self) -> HashSet<ProposalId> {
        self.batch.changes().iter().map(|c| c.id.clone()).collect()
    }

    fn is_new(&self, id: &ProposalId) -> bool {
        if self.settled.contains(id) {
            tracing::debug!("proposal {} was already settled, ignoring", id);
            return false;
        }
        !self.batch.contains(id)
    }

    fn settle(&mut self, id: &ProposalId, decision: Decision) -> bool {
        let Some(change) = self.batch.get(id) else {
            tracing::debug!("ignoring {:?} for unknown proposal {}", decision, id);
            return false;
        };
        let workout_index = change.workout_index;
        match self.workouts.get_mut(workout_index) {
            Some(workout) => {
                let swept = resolve_in(workout, id, decision);
                self.drop_swept(swept, workout_index);
            }
            None => tracing::warn!(
                "proposal {} targets workout {} but the program has {} workouts",
                id,
                workout_index,
                self.workouts.len()
            ),
        }
        self.batch.take(id);
        self.skipped.retain(|s| &s.proposal_id != id);
        self.settled.insert(id.clone());
        true
    }

    fn drop_swept(&mut self, swept: Vec<ProposalId>, workout_index: usize) {
        for id in swept {
            if self.batch.take(&id).is_none() {
                continue;
            }
            tracing::debug!(
                "proposal {} went away with its node on workout {}",
                id,
                workout_index
            );
            self.skipped.retain(|s| s.proposal_id != id);
            self.settled.insert(id);
        }
    }

    /// Merges proposals that have not been merged before. Ids already in the
    /// batch or already settled never reach this point.
    fn merge_fresh(&mut self, fresh: &[Change]) {
        if fresh.is_empty() {
            return;
        }
        for (index, workout) in self.workouts.iter_mut().enumerate() {
            let report = merge_with_report(workout, fresh, index);
            self.skipped.extend(report.skipped);
            let merged = match report.workout {
                Cow::Owned(merged) => Some(merged),
                Cow::Borrowed(_) => None,
            };
            if let Some(merged) = merged {
                *workout = merged;
            }
        }

        let count = self.workouts.len();
        for change in fresh {
            if change.workout_index >= count {
                tracing::warn!(
                    "proposal {} targets workout {} but the program has {} workouts",
                    change.id,
                    change.workout_index,
                    count
                );
            }
        }
    }
}

/// Resolves `id` on one workout and returns the other proposals whose
/// annotations were removed along with it.
fn resolve_in(workout: &mut Workout, id: &ProposalId, decision: Decision) -> Vec<ProposalId> {
    let before = workout.pending_proposal_ids();
    *workout = resolve(workout, id, decision);
    let after = workout.pending_proposal_ids();
    let mut swept: Vec<ProposalId> = before
        .into_iter()
        .filter(|p| p != id && !after.contains(p))
        .collect();
    swept.sort();
    swept
}

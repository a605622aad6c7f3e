//! The proposal store: outstanding proposals plus the review cursor.
//!
//! The list and the cursor are only ever updated together, so the cursor can
//! never point at a proposal that was already resolved or removed.

use std::collections::HashSet;

use trainplan_core::change::Change;
use trainplan_core::id::ProposalId;

/// Outstanding proposals under review and the proposal currently in focus.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProposalBatch {
    changes: Vec<Change>,
    current: Option<ProposalId>,
}

impl ProposalBatch {
    pub fn new() -> Self {
        ProposalBatch::default()
    }

    /// Creates a batch from `changes`, dropping repeated ids.
    pub fn from_changes(changes: impl IntoIterator<Item = Change>) -> Self {
        let mut batch = ProposalBatch::new();
        batch.set_proposed_changes(changes);
        batch
    }

    pub fn changes(&self) -> &[Change] {
        &self.changes
    }

    pub fn len(&self) -> usize {
        self.changes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.changes.is_empty()
    }

    pub fn contains(&self, id: &ProposalId) -> bool {
        self.position(id).is_some()
    }

    pub fn get(&self, id: &ProposalId) -> Option<&Change> {
        self.changes.iter().find(|c| &c.id == id)
    }

    /// The proposal in focus, if any.
    pub fn current(&self) -> Option<&ProposalId> {
        self.current.as_ref()
    }

    pub fn current_change(&self) -> Option<&Change> {
        self.current.as_ref().and_then(|id| self.get(id))
    }

    /// Outstanding proposals targeting one workout, in submission order.
    pub fn for_workout(&self, workout_index: usize) -> impl Iterator<Item = &Change> + '_ {
        self.changes
            .iter()
            .filter(move |c| c.workout_index == workout_index)
    }

    /// Appends proposals, ignoring ids that are already outstanding.
    /// Focuses the first proposal if nothing was in focus.
    ///
    /// Returns the number of proposals added.
    pub fn add_proposed_changes(&mut self, changes: impl IntoIterator<Item = Change>) -> usize {
        let mut known: HashSet<ProposalId> =
            self.changes.iter().map(|c| c.id.clone()).collect();
        let before = self.changes.len();
        for change in changes {
            if known.insert(change.id.clone()) {
                self.changes.push(change);
            } else {
                tracing::debug!("proposal {} already outstanding, ignoring", change.id);
            }
        }
        if self.current.is_none() {
            self.current = self.changes.first().map(|c| c.id.clone());
        }
        self.changes.len() - before
    }

    /// Replaces the whole batch and focuses its first proposal.
    pub fn set_proposed_changes(&mut self, changes: impl IntoIterator<Item = Change>) {
        self.changes.clear();
        self.current = None;
        self.add_proposed_changes(changes);
    }

    /// Moves the focus. Only an outstanding id (or `None`) is accepted;
    /// returns `false` and leaves the focus alone otherwise.
    pub fn set_current_change_id(&mut self, id: Option<ProposalId>) -> bool {
        match id {
            None => {
                self.current = None;
                true
            }
            Some(id) if self.contains(&id) => {
                self.current = Some(id);
                true
            }
            Some(id) => {
                tracing::warn!("cannot focus proposal {}: not outstanding", id);
                false
            }
        }
    }

    /// Removes a proposal and moves the focus to the one that takes its
    /// place, wrapping around to the first. Unknown ids are a no-op.
    pub fn take(&mut self, id: &ProposalId) -> Option<Change> {
        let position = self.position(id)?;
        let removed = self.changes.remove(position);
        self.current = if self.changes.is_empty() {
            None
        } else {
            Some(self.changes[position % self.changes.len()].id.clone())
        };
        tracing::debug!(
            "proposal {} left the batch, focus now {:?}",
            removed.id,
            self.current
        );
        Some(removed)
    }

    fn position(&self, id: &ProposalId) -> Option<usize> {
        self.changes.iter().position(|c| &c.id == id)
    }
}

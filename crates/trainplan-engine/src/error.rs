//! Diagnostics for proposals the merge engine could not apply.
//!
//! None of these abort a merge. A proposal that hits one of them is skipped,
//! logged, and reported in [`MergeReport::skipped`](crate::merge::MergeReport).

use thiserror::Error;

use trainplan_core::id::ProposalId;

/// Why a single proposal was skipped.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SkipReason {
    /// The addressed block does not exist (or an insertion index lies past the end).
    #[error("block index {index} out of range (workout has {len} blocks)")]
    BlockOutOfRange { index: usize, len: usize },

    /// A circuit-exercise proposal addressed a block that is not a circuit.
    #[error("block {index} is a {found} block, not a circuit")]
    NotACircuit { index: usize, found: &'static str },

    /// The addressed circuit exercise does not exist.
    #[error(
        "exercise index {index} out of range in circuit block {circuit_block_index} \
         ({len} exercises)"
    )]
    ExerciseOutOfRange {
        circuit_block_index: usize,
        index: usize,
        len: usize,
    },

    /// The target already carries an annotation from another proposal.
    /// Overwriting it would lose the information needed to undo that proposal.
    #[error("target already carries pending proposal '{proposal_id}'")]
    TargetAlreadyPending { proposal_id: ProposalId },
}

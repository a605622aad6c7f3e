//! Error types for the review layer.

use thiserror::Error;

use trainplan_core::id::WorkoutId;

/// Errors produced when leaving a review session.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ReviewError {
    /// Proposals are still waiting for a decision.
    #[error("{count} proposal(s) still outstanding")]
    OutstandingProposals { count: usize },

    /// A workout still carries annotations with no outstanding proposal.
    #[error("workout {workout} still carries pending annotations")]
    UnresolvedAnnotations { workout: WorkoutId },
}

//! Pending annotations: uncommitted changes attached to tree nodes.
//!
//! An annotation names the proposal that produced it and, for updates, keeps
//! a complete snapshot of the replaced node so the change can be rolled back
//! exactly. Rendering collaborators read annotations through [`PendingKind`]
//! but never write them.

use serde::{Deserialize, Serialize};

use crate::id::ProposalId;
use crate::workout::Block;

/// An uncommitted change attached to a block or a nested circuit exercise.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum PendingStatus {
    /// The node was inserted by the proposal.
    #[serde(rename_all = "camelCase")]
    Adding { proposal_id: ProposalId },
    /// The node is marked for removal by the proposal. It stays in place so
    /// sibling indices remain stable until the proposal is resolved.
    #[serde(rename_all = "camelCase")]
    Removing { proposal_id: ProposalId },
    /// The node replaced `old_block`. For nested circuit exercises the
    /// snapshot is a [`Block::Exercise`].
    #[serde(rename_all = "camelCase")]
    Updating {
        proposal_id: ProposalId,
        old_block: Box<Block>,
    },
}

/// Field-less view of a [`PendingStatus`], used to pick a visual treatment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PendingKind {
    Adding,
    Removing,
    Updating,
}

impl PendingStatus {
    pub fn proposal_id(&self) -> &ProposalId {
        match self {
            PendingStatus::Adding { proposal_id }
            | PendingStatus::Removing { proposal_id }
            | PendingStatus::Updating { proposal_id, .. } => proposal_id,
        }
    }

    pub fn kind(&self) -> PendingKind {
        match self {
            PendingStatus::Adding { .. } => PendingKind::Adding,
            PendingStatus::Removing { .. } => PendingKind::Removing,
            PendingStatus::Updating { .. } => PendingKind::Updating,
        }
    }

    /// Returns `true` if this annotation was produced by `id`.
    pub fn is_for(&self, id: &ProposalId) -> bool {
        self.proposal_id() == id
    }
}

//! Stable ID newtypes for program entities.
//!
//! All IDs are distinct newtype wrappers over `String`, providing type safety
//! so that a `ProposalId` cannot be accidentally used where an `ExerciseId`
//! is expected. They serialize transparently as plain JSON strings.

use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Identifier of one change proposal.
///
/// Proposal producers normally send a UUID, but any string is accepted.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProposalId(pub String);

/// Workout identity, assigned by persistence.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct WorkoutId(pub String);

/// Exercise identity. Exercises are matched by id, never by array position.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ExerciseId(pub String);

/// Training program identity.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProgramId(pub String);

impl ProposalId {
    /// Mints a fresh random (v4) proposal id.
    pub fn generate() -> Self {
        ProposalId(Uuid::new_v4().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl ProgramId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

// Display implementations -- just print the inner value.

impl fmt::Display for ProposalId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl fmt::Display for WorkoutId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl fmt::Display for ExerciseId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl fmt::Display for ProgramId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for ProposalId {
    fn from(s: &str) -> Self {
        ProposalId(s.to_string())
    }
}

impl From<&str> for WorkoutId {
    fn from(s: &str) -> Self {
        WorkoutId(s.to_string())
    }
}

impl From<&str> for ExerciseId {
    fn from(s: &str) -> Self {
        ExerciseId(s.to_string())
    }
}

impl From<&str> for ProgramId {
    fn from(s: &str) -> Self {
        ProgramId(s.to_string())
    }
}

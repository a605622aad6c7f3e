//! Core error types for trainplan-core.
//!
//! Uses `thiserror` for structured, matchable error variants. These only
//! arise at the proposal-decoding boundary; the tree model itself has no
//! failure modes.

use thiserror::Error;

/// Errors produced while decoding change proposals.
#[derive(Debug, Error)]
pub enum CoreError {
    /// The proposal has no `type` discriminator.
    #[error("proposal has no 'type' field")]
    MissingChangeKind,

    /// The proposal names a kind this build does not understand.
    #[error("unknown change kind: '{kind}'")]
    UnknownChangeKind { kind: String },

    /// The proposal has a known kind but its body does not match the schema.
    #[error("malformed proposal: {0}")]
    MalformedChange(#[from] serde_json::Error),
}

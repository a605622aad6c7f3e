//! Proposal merge engine for workout trees.
//!
//! Three pure, synchronous stages:
//! - [`sort`]: orders a proposal batch so insertions never invalidate the
//!   indices of proposals applied after them.
//! - [`merge`]: overlays the sorted batch onto a workout as pending
//!   annotations, skipping proposals already materialized in the tree.
//! - [`resolve`]: settles one proposal, making its effect permanent or
//!   undoing it exactly.
//!
//! Malformed proposals never abort a batch; they are skipped and surfaced as
//! [`SkipReason`] diagnostics.

pub mod error;
pub mod merge;
pub mod resolve;
pub mod sort;

pub use error::SkipReason;
pub use merge::{merge, merge_with_report, unapplied_ids, MergeReport, SkippedChange};
pub use resolve::{resolve, Decision, Resolution};
pub use sort::{sort_changes, ApplyPhase};

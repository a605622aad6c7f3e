//! Review layer for AI-proposed workout edits.
//!
//! - [`batch`]: the proposal store, outstanding proposals and the review
//!   cursor updated as one unit.
//! - [`session`]: the editor state that keeps annotated previews of every
//!   workout in step with the store and applies accept/reject decisions.

pub mod batch;
pub mod error;
pub mod session;

pub use batch::ProposalBatch;
pub use error::ReviewError;
pub use session::ReviewSession;
pub use trainplan_engine::Decision;

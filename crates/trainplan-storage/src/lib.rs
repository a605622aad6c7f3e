//! Persistence boundary for trainplan programs.
//!
//! Provides the [`ProgramStore`] trait that every backend implements, plus
//! [`InMemoryStore`] and [`JsonFileStore`] as first-class backends. Only
//! committed workouts (no pending annotations) are ever written.
//!
//! # Modules
//!
//! - [`error`]: StorageError enum with all failure modes
//! - [`types`]: ProgramSummary and the stored program document
//! - [`traits`]: ProgramStore trait and commit validation
//! - [`memory`]: InMemoryStore implementation
//! - [`json`]: JsonFileStore implementation

pub mod error;
pub mod json;
pub mod memory;
pub mod traits;
pub mod types;

// Re-export key types for ergonomic use.
pub use error::StorageError;
pub use json::JsonFileStore;
pub use memory::InMemoryStore;
pub use traits::{committed_workouts, ProgramStore};
pub use types::{ProgramSummary, StoredProgram};

//! On-disk form of a review in progress.
//!
//! A review spans several invocations of the binary, so the annotated
//! previews, the outstanding and settled proposals and the focus are saved
//! between them.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use trainplan_core::change::Change;
use trainplan_core::id::{ProgramId, ProposalId};
use trainplan_core::workout::Workout;
use trainplan_review::ReviewSession;

use crate::error::CliError;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionFile {
    pub program_id: ProgramId,
    pub workouts: Vec<Workout>,
    #[serde(default)]
    pub changes: Vec<Change>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub current: Option<ProposalId>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub settled: Vec<ProposalId>,
}

impl SessionFile {
    pub fn capture(program_id: ProgramId, session: &ReviewSession) -> Self {
        SessionFile {
            program_id,
            workouts: session.workouts().to_vec(),
            changes: session.batch().changes().to_vec(),
            current: session.current_change_id().cloned(),
            settled: session.settled().iter().cloned().collect(),
        }
    }

    pub fn into_session(self) -> (ProgramId, ReviewSession) {
        let session =
            ReviewSession::resume(self.workouts, self.changes, self.current, self.settled);
        (self.program_id, session)
    }

    pub fn load(path: &Path) -> Result<Self, CliError> {
        let value = read_json(path)?;
        serde_json::from_value(value).map_err(|source| CliError::Json {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn save(&self, path: &Path) -> Result<(), CliError> {
        write_json(path, self)
    }
}

/// Reads a file and parses it as untyped JSON.
pub fn read_json(path: &Path) -> Result<serde_json::Value, CliError> {
    let text = fs::read_to_string(path).map_err(|source| CliError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_str(&text).map_err(|source| CliError::Json {
        path: path.to_path_buf(),
        source,
    })
}

/// Writes any serializable value as pretty-printed JSON.
pub fn write_json<T: Serialize>(path: &Path, value: &T) -> Result<(), CliError> {
    let text = serde_json::to_string_pretty(value).map_err(|source| CliError::Json {
        path: path.to_path_buf(),
        source,
    })?;
    fs::write(path, text).map_err(|source| CliError::Write {
        path: path.to_path_buf(),
        source,
    })
}

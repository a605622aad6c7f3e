//! Subcommand implementations.
//!
//! Each command returns the text to print on stdout so the same code path is
//! used by the binary and by the tests below.

use std::fs;
use std::path::Path;

use trainplan_core::change::{parse_changes, Change};
use trainplan_core::id::{ProgramId, ProposalId};
use trainplan_engine::{merge_with_report, sort_changes, Decision};
use trainplan_review::ReviewSession;
use trainplan_storage::{JsonFileStore, ProgramStore};

use crate::error::CliError;
use crate::session_file::{read_json, SessionFile};

/// Reads a proposal batch, skipping entries of unknown kinds.
fn load_changes(path: &Path) -> Result<Vec<Change>, CliError> {
    Ok(parse_changes(&read_json(path)?))
}

fn to_pretty<T: serde::Serialize>(value: &T) -> String {
    serde_json::to_string_pretty(value)
        .unwrap_or_else(|e| format!("{{\"error\": \"failed to serialize output: {}\"}}", e))
}

/// `preview`: merges a batch over the stored workouts without starting a review.
pub fn preview(
    store_dir: &Path,
    program: &ProgramId,
    changes_path: &Path,
    only_workout: Option<usize>,
) -> Result<String, CliError> {
    let store = JsonFileStore::open(store_dir)?;
    let workouts = store.load_workouts(program)?;
    let changes = load_changes(changes_path)?;

    if let Some(index) = only_workout {
        if index >= workouts.len() {
            return Err(CliError::Usage(format!(
                "workout {} does not exist (program has {})",
                index,
                workouts.len()
            )));
        }
    }

    let mut previews = Vec::new();
    for (index, workout) in workouts.iter().enumerate() {
        if only_workout.is_some_and(|only| only != index) {
            continue;
        }
        let report = merge_with_report(workout, &changes, index);
        for skipped in &report.skipped {
            eprintln!(
                "workout {}: skipped proposal {}: {}",
                index, skipped.proposal_id, skipped.reason
            );
        }
        previews.push(report.workout.into_owned());
    }
    Ok(to_pretty(&previews))
}

/// `pending`: lists a batch in the order the engine applies it.
pub fn pending(changes_path: &Path) -> Result<String, CliError> {
    let changes = load_changes(changes_path)?;
    let mut indices: Vec<usize> = changes.iter().map(|c| c.workout_index).collect();
    indices.sort_unstable();
    indices.dedup();

    let mut lines = Vec::new();
    for index in indices {
        let for_workout: Vec<Change> = changes
            .iter()
            .filter(|c| c.workout_index == index)
            .cloned()
            .collect();
        for change in sort_changes(for_workout) {
            lines.push(format!(
                "workout {:<3} {:<24} {}",
                index,
                change.kind.label(),
                change.id
            ));
        }
    }
    Ok(lines.join("\n"))
}

/// `review start`: opens a review of a stored program.
pub fn review_start(
    store_dir: &Path,
    program: &ProgramId,
    changes_path: &Path,
    session_path: &Path,
) -> Result<String, CliError> {
    if session_path.exists() {
        return Err(CliError::Usage(format!(
            "a review is already in progress at {}",
            session_path.display()
        )));
    }
    let store = JsonFileStore::open(store_dir)?;
    let mut session = ReviewSession::new(store.load_workouts(program)?);
    session.add_proposed_changes(load_changes(changes_path)?);
    report_skipped(&session);
    SessionFile::capture(program.clone(), &session).save(session_path)?;
    Ok(summary(&session))
}

/// `review add`: streams more proposals into a running review.
pub fn review_add(changes_path: &Path, session_path: &Path) -> Result<String, CliError> {
    let (program, mut session) = SessionFile::load(session_path)?.into_session();
    let added = session.add_proposed_changes(load_changes(changes_path)?);
    report_skipped(&session);
    SessionFile::capture(program, &session).save(session_path)?;
    Ok(format!("added {} proposal(s)\n{}", added, summary(&session)))
}

/// `review decide`: accepts or rejects one proposal.
pub fn review_decide(
    session_path: &Path,
    proposal: &ProposalId,
    decision: Decision,
) -> Result<String, CliError> {
    let (program, mut session) = SessionFile::load(session_path)?.into_session();
    let settled = match decision {
        Decision::Accept => session.apply_pending_proposal_by_id(proposal),
        Decision::Reject => session.reject_pending_proposal_by_id(proposal),
    };
    if !settled {
        return Err(CliError::Usage(format!(
            "proposal {} is not outstanding in this review",
            proposal
        )));
    }
    SessionFile::capture(program, &session).save(session_path)?;
    Ok(summary(&session))
}

/// `review focus`: moves the review cursor.
pub fn review_focus(session_path: &Path, proposal: Option<ProposalId>) -> Result<String, CliError> {
    let (program, mut session) = SessionFile::load(session_path)?.into_session();
    if !session.set_current_change_id(proposal.clone()) {
        return Err(CliError::Usage(format!(
            "proposal {} is not outstanding in this review",
            proposal.map(|p| p.to_string()).unwrap_or_default()
        )));
    }
    SessionFile::capture(program, &session).save(session_path)?;
    Ok(summary(&session))
}

/// `review commit`: writes the settled workouts back and closes the review.
pub fn review_commit(store_dir: &Path, session_path: &Path) -> Result<String, CliError> {
    let (program, session) = SessionFile::load(session_path)?.into_session();
    let workouts = session.into_committed()?;
    let mut store = JsonFileStore::open(store_dir)?;
    store.save_workouts(&program, &workouts)?;
    fs::remove_file(session_path).map_err(|source| CliError::Write {
        path: session_path.to_path_buf(),
        source,
    })?;
    Ok(format!("committed {} workout(s) to program {}", workouts.len(), program))
}

fn report_skipped(session: &ReviewSession) {
    for skipped in session.skipped() {
        eprintln!("skipped proposal {}: {}", skipped.proposal_id, skipped.reason);
    }
}

fn summary(session: &ReviewSession) -> String {
    let batch = session.batch();
    match batch.current_change() {
        Some(change) => format!(
            "{} proposal(s) outstanding; current: {} ({}, workout {})",
            batch.len(),
            change.id,
            change.kind.label(),
            change.workout_index
        ),
        None if batch.is_empty() => "no proposals outstanding; ready to commit".to_string(),
        None => format!("{} proposal(s) outstanding", batch.len()),
    }
}

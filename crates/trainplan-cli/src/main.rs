//! Training program review CLI.
//!
//! Provides the `trainplan` binary for previewing AI-proposed edits to a
//! stored training program and for reviewing them one proposal at a time.
//!
//! Configuration comes from flags with environment fallbacks:
//! - `TRAINPLAN_STORE`: program store directory (default: "./programs")
//! - `TRAINPLAN_LOG`: log filter directives (default: "warn")

mod commands;
mod error;
mod session_file;

use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand, ValueEnum};
use tracing_subscriber::EnvFilter;

use trainplan_core::id::{ProgramId, ProposalId};
use trainplan_engine::Decision;

/// Training program review tools.
#[derive(Parser)]
#[command(name = "trainplan", about = "Preview and review proposed edits to training programs")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

/// Available subcommands.
#[derive(Subcommand)]
enum Commands {
    /// Print the annotated preview of a proposal batch.
    Preview {
        /// Program store directory.
        #[arg(long, env = "TRAINPLAN_STORE", default_value = "./programs")]
        store: PathBuf,

        /// Program ID.
        #[arg(short, long)]
        program: String,

        /// JSON file holding the proposal batch.
        #[arg(short, long)]
        changes: PathBuf,

        /// Only preview this workout (index within the program).
        #[arg(short, long)]
        workout: Option<usize>,
    },
    /// List a proposal batch in application order.
    Pending {
        /// JSON file holding the proposal batch.
        #[arg(short, long)]
        changes: PathBuf,
    },
    /// Review proposals one at a time.
    Review {
        #[command(subcommand)]
        action: ReviewAction,
    },
}

#[derive(Subcommand)]
enum ReviewAction {
    /// Start reviewing a batch against a stored program.
    Start {
        #[arg(long, env = "TRAINPLAN_STORE", default_value = "./programs")]
        store: PathBuf,
        #[arg(short, long)]
        program: String,
        #[arg(short, long)]
        changes: PathBuf,
        /// Review session file.
        #[arg(short, long, default_value = "review.json")]
        session: PathBuf,
    },
    /// Add more proposals to the running review.
    Add {
        #[arg(short, long)]
        changes: PathBuf,
        #[arg(short, long, default_value = "review.json")]
        session: PathBuf,
    },
    /// Accept or reject one proposal.
    Decide {
        #[arg(short, long)]
        proposal: String,
        #[arg(short, long, value_enum)]
        decision: DecisionArg,
        #[arg(short, long, default_value = "review.json")]
        session: PathBuf,
    },
    /// Move the focus to another proposal (or clear it).
    Focus {
        #[arg(short, long)]
        proposal: Option<String>,
        #[arg(short, long, default_value = "review.json")]
        session: PathBuf,
    },
    /// Save the settled workouts back to the store.
    Commit {
        #[arg(long, env = "TRAINPLAN_STORE", default_value = "./programs")]
        store: PathBuf,
        #[arg(short, long, default_value = "review.json")]
        session: PathBuf,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum DecisionArg {
    Accept,
    Reject,
}

impl From<DecisionArg> for Decision {
    fn from(arg: DecisionArg) -> Self {
        match arg {
            DecisionArg::Accept => Decision::Accept,
            DecisionArg::Reject => Decision::Reject,
        }
    }
}

fn main() {
    let filter =
        EnvFilter::try_from_env("TRAINPLAN_LOG").unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let result = match cli.command {
        Commands::Preview {
            store,
            program,
            changes,
            workout,
        } => commands::preview(&store, &ProgramId(program), &changes, workout),
        Commands::Pending { changes } => commands::pending(&changes),
        Commands::Review { action } => match action {
            ReviewAction::Start {
                store,
                program,
                changes,
                session,
            } => commands::review_start(&store, &ProgramId(program), &changes, &session),
            ReviewAction::Add { changes, session } => commands::review_add(&changes, &session),
            ReviewAction::Decide {
                proposal,
                decision,
                session,
            } => commands::review_decide(&session, &ProposalId(proposal), decision.into()),
            ReviewAction::Focus { proposal, session } => {
                commands::review_focus(&session, proposal.map(ProposalId))
            }
            ReviewAction::Commit { store, session } => commands::review_commit(&store, &session),
        },
    };

    match result {
        Ok(output) => {
            if !output.is_empty() {
                println!("{}", output);
            }
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            process::exit(e.exit_code());
        }
    }
}

//! Command-line front end: loads a snapshot, applies one command, saves the result.

pub mod commands;
pub mod formatters;
pub mod output;

use std::path::PathBuf;

use strsim::levenshtein;
use thiserror::Error;

use crate::{
    config::ConfigManager,
    errors::{LedgerError, StorageError},
    utils::{app_data_dir, ledger_file_in},
};

pub use commands::Command;

const COMMANDS: &[&str] = &[
    "init", "budget", "txn", "dashboard", "analytics", "check", "config", "help",
];

#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Ledger(#[from] LedgerError),
    #[error(transparent)]
    Storage(#[from] StorageError),
    #[error("{0}")]
    Usage(String),
    #[error("unknown command `{input}`{}", suggestion_hint(.suggestion))]
    UnknownCommand {
        input: String,
        suggestion: Option<String>,
    },
    #[error("invariant check failed for {0} budget(s)")]
    CheckFailed(usize),
}

fn suggestion_hint(suggestion: &Option<String>) -> String {
    suggestion
        .as_ref()
        .map(|name| format!("; did you mean `{name}`?"))
        .unwrap_or_default()
}

/// Where the CLI reads and writes its data.
#[derive(Debug, Clone)]
pub struct CliContext {
    pub ledger_path: PathBuf,
    pub config: ConfigManager,
    pub json: bool,
}

/// Parses process arguments and runs the requested command.
pub fn run_cli() -> Result<(), CliError> {
    let args: Vec<String> = std::env::args().skip(1).collect();
    run_with_args(args)
}

pub fn run_with_args(args: Vec<String>) -> Result<(), CliError> {
    let mut file: Option<PathBuf> = None;
    let mut json = false;
    let mut rest = Vec::new();
    let mut iter = args.into_iter();
    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "--file" | "-f" => {
                let value = iter
                    .next()
                    .ok_or_else(|| CliError::Usage("--file requires a path".into()))?;
                file = Some(PathBuf::from(value));
            }
            "--json" => json = true,
            _ => rest.push(arg),
        }
    }

    let base = app_data_dir();
    let context = CliContext {
        ledger_path: file.unwrap_or_else(|| ledger_file_in(&base)),
        config: ConfigManager::with_base_dir(base),
        json,
    };
    let command = Command::parse(&rest)?;
    tracing::debug!(?command, path = %context.ledger_path.display(), "running command");
    commands::execute(command, &context)
}

/// Closest known command name within an edit distance of three.
pub fn suggest(input: &str) -> Option<String> {
    closest(input, COMMANDS)
}

/// Closest candidate within an edit distance of three.
pub fn closest(input: &str, candidates: &[&str]) -> Option<String> {
    candidates
        .iter()
        .map(|name| (levenshtein(name, input), *name))
        .filter(|(distance, _)| *distance <= 3)
        .min_by_key(|(distance, _)| *distance)
        .map(|(_, name)| name.to_string())
}

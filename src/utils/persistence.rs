use std::{fs, path::Path};

use crate::{errors::StorageError, ledger::Ledger};

use super::write_atomic;

/// Snapshot read from disk together with consistency findings.
///
/// Loading never repairs data; warnings are surfaced for the caller to display.
#[derive(Debug, Clone)]
pub struct LoadReport {
    pub ledger: Ledger,
    pub warnings: Vec<String>,
}

/// Writes the provided ledger to disk atomically by staging to a temporary file.
pub fn save_snapshot(ledger: &Ledger, path: &Path) -> Result<(), StorageError> {
    let json = serde_json::to_string_pretty(ledger)?;
    write_atomic(path, &json)?;
    tracing::debug!(
        path = %path.display(),
        budgets = ledger.budgets().len(),
        transactions = ledger.transactions().len(),
        "snapshot saved"
    );
    Ok(())
}

/// Loads a ledger snapshot from disk, returning structured errors on failure.
pub fn load_snapshot(path: &Path) -> Result<LoadReport, StorageError> {
    if !path.exists() {
        return Err(StorageError::Persistence(format!(
            "snapshot `{}` not found",
            path.display()
        )));
    }
    let data = fs::read_to_string(path)?;
    let ledger: Ledger = serde_json::from_str(&data)?;
    let warnings = audit(&ledger);
    for warning in &warnings {
        tracing::warn!(path = %path.display(), "{warning}");
    }
    Ok(LoadReport { ledger, warnings })
}

/// Loads the snapshot at `path`, or an empty ledger when the file does not exist yet.
pub fn load_or_default(path: &Path) -> Result<LoadReport, StorageError> {
    if path.exists() {
        load_snapshot(path)
    } else {
        Ok(LoadReport {
            ledger: Ledger::new(),
            warnings: Vec::new(),
        })
    }
}

fn audit(ledger: &Ledger) -> Vec<String> {
    let mut warnings: Vec<String> = ledger
        .verify_spent()
        .into_iter()
        .map(|drift| {
            format!(
                "budget `{}` records spent {} but its expenses sum to {}",
                drift.budget_name, drift.recorded, drift.expected
            )
        })
        .collect();
    let dangling = ledger.dangling_transactions().len();
    if dangling > 0 {
        warnings.push(format!(
            "{dangling} transaction(s) reference a deleted budget"
        ));
    }
    warnings
}

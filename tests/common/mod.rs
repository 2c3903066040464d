#![allow(dead_code)]

use std::{path::PathBuf, sync::Mutex};

use budget_tracker::ledger::{spent_matches, FixedClock, Ledger, NewBudget};
use once_cell::sync::Lazy;
use tempfile::TempDir;
use uuid::Uuid;

/// Holds TempDir guards so temporary folders live for the duration of the test run.
static TEST_DIRS: Lazy<Mutex<Vec<TempDir>>> = Lazy::new(|| Mutex::new(Vec::new()));

/// Creates an isolated data directory for a single test.
pub fn temp_home() -> PathBuf {
    let temp = TempDir::new().expect("create temp dir");
    let base = temp.path().to_path_buf();
    TEST_DIRS.lock().expect("lock temp dir registry").push(temp);
    base
}

pub fn clock() -> FixedClock {
    FixedClock::ymd(2025, 11, 3).expect("valid date")
}

pub fn clock_on(year: i32, month: u32, day: u32) -> FixedClock {
    FixedClock::ymd(year, month, day).expect("valid date")
}

/// Ledger holding a single budget, returned with that budget's id.
pub fn ledger_with_budget(name: &str, limit: f64) -> (Ledger, Uuid) {
    let (ledger, budget) = Ledger::new()
        .create_budget(NewBudget::new(name, limit), &clock())
        .expect("create budget")
        .into_parts();
    (ledger, budget.id)
}

/// Recomputes every budget's spend from scratch and asserts it matches the stored value.
pub fn assert_spent_consistent(ledger: &Ledger) {
    for budget in ledger.budgets() {
        let expected: f64 = ledger
            .transactions()
            .iter()
            .filter(|txn| txn.is_expense() && txn.budget_id == Some(budget.id))
            .map(|txn| txn.amount.abs())
            .sum();
        assert!(
            spent_matches(budget.spent, expected),
            "budget {} records {} but expenses sum to {}",
            budget.name,
            budget.spent,
            expected
        );
    }
    assert!(ledger.verify_spent().is_empty());
}

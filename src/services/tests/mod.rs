
use crate::ledger::{FixedClock, Ledger, NewBudget};
use uuid::Uuid;

pub(super) fn clock() -> FixedClock {
    FixedClock::ymd(2025, 11, 3).unwrap()
}

pub(super) fn ledger_with_budget(name: &str, limit: f64) -> (Ledger, Uuid) {
    let (ledger, budget) = Ledger::new()
        .create_budget(NewBudget::new(name, limit), &clock())
        .unwrap()
        .into_parts();
    (ledger, budget.id)
}

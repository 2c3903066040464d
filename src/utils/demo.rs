//! Sample dataset for first runs and demos.

use chrono::NaiveDate;

use crate::{
    errors::LedgerResult,
    ledger::{FixedClock, Ledger, NewBudget, NewTransaction, PaymentMethod},
};

/// Builds the sample household ledger for November 2025.
///
/// Everything goes through the regular ledger operations, so budget spend
/// matches the sample expenses.
pub fn sample_ledger() -> LedgerResult<Ledger> {
    let opening = on(1);
    let mut ledger = Ledger::new();

    let mut budget_ids = Vec::new();
    for (name, limit, color) in [
        ("Groceries", 30000.0, "#10b981"),
        ("Rent", 50000.0, "#f59e0b"),
        ("Entertainment", 15000.0, "#8b5cf6"),
    ] {
        let (next, budget) = ledger
            .create_budget(NewBudget::new(name, limit).with_color(color), &opening)?
            .into_parts();
        ledger = next;
        budget_ids.push(budget.id);
    }
    let (groceries, rent, entertainment) = (budget_ids[0], budget_ids[1], budget_ids[2]);

    let entries = [
        (
            1,
            NewTransaction::income(85000.0, "Salary")
                .with_notes("Monthly salary")
                .paid_by(PaymentMethod::Bank),
        ),
        (
            1,
            NewTransaction::expense(3200.0, "Food")
                .for_budget(groceries)
                .with_notes("Market shopping")
                .paid_by(PaymentMethod::Cash),
        ),
        (
            1,
            NewTransaction::expense(50000.0, "Housing")
                .for_budget(rent)
                .with_notes("Monthly rent")
                .paid_by(PaymentMethod::Bank),
        ),
        (
            2,
            NewTransaction::expense(4500.0, "Entertainment")
                .for_budget(entertainment)
                .with_notes("Cinema tickets")
                .paid_by(PaymentMethod::Card),
        ),
        (
            3,
            NewTransaction::expense(2500.0, "Food")
                .for_budget(groceries)
                .with_notes("Weekly groceries")
                .paid_by(PaymentMethod::Card),
        ),
    ];
    for (day, draft) in entries {
        ledger = ledger.create_transaction(draft, &on(day))?.ledger;
    }

    tracing::debug!(
        budgets = ledger.budgets().len(),
        transactions = ledger.transactions().len(),
        "sample ledger built"
    );
    Ok(ledger)
}

fn on(day: u32) -> FixedClock {
    FixedClock::new(
        NaiveDate::from_ymd_opt(2025, 11, day).unwrap_or(NaiveDate::MIN),
    )
}

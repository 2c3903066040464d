#![doc(test(attr(deny(warnings))))]

//! Budget Tracker keeps category budgets consistent with a ledger of income
//! and expense transactions, and folds that ledger into summary views.
//!
//! The [`ledger`] and [`analytics`] modules are pure: they take a snapshot and
//! return values without touching the filesystem. Persistence, configuration
//! and the command-line front end live in [`utils`], [`config`] and [`cli`].
//!
//! ```
//! use budget_tracker::analytics::budget_utilization;
//! use budget_tracker::ledger::{FixedClock, Ledger, NewBudget, NewTransaction};
//!
//! let clock = FixedClock::ymd(2025, 11, 3).unwrap();
//! let (ledger, groceries) = Ledger::new()
//!     .create_budget(NewBudget::new("Groceries", 30000.0), &clock)
//!     .unwrap()
//!     .into_parts();
//! let ledger = ledger
//!     .create_transaction(NewTransaction::expense(2500.0, "Food").for_budget(groceries.id), &clock)
//!     .unwrap()
//!     .ledger;
//!
//! let budget = ledger.budget(groceries.id).unwrap();
//! assert_eq!(budget.spent, 2500.0);
//! assert!(!budget_utilization(budget).is_over_budget);
//! ```

pub mod analytics;
pub mod cli;
pub mod config;
pub mod errors;
pub mod ledger;
pub mod services;
pub mod utils;

use std::sync::Once;

static INIT_TRACING: Once = Once::new();

/// Initializes global tracing and emits a startup debug log.
pub fn init() {
    INIT_TRACING.call_once(|| {
        utils::init_tracing();
        tracing::debug!("Budget Tracker tracing initialized.");
    });
}

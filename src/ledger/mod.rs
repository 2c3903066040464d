//! Ledger domain models and the snapshot state machine that keeps budget spend consistent.

pub mod budget;
#[allow(clippy::module_inception)]
pub mod ledger;
pub mod time;
pub mod transaction;

pub use budget::{Budget, BudgetChanges, NewBudget, DEFAULT_BUDGET_COLOR};
pub use ledger::{spent_matches, Ledger, Mutation, SpentDrift, SPENT_TOLERANCE};
pub use time::{Clock, FixedClock, SystemClock};
pub use transaction::{NewTransaction, PaymentMethod, Transaction, TransactionKind};

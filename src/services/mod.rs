//! Service façades that callers use to drive the ledger and read summaries.

pub mod budget_service;
pub mod summary_service;
pub mod transaction_service;

pub use budget_service::{BudgetService, BudgetStatus};
pub use summary_service::{AnalyticsReport, Dashboard, SummaryService};
pub use transaction_service::{TransactionService, TransactionView};

#[cfg(test)]
mod tests;

//! Stateless aggregations over a ledger snapshot.
//!
//! Every function here only reads its input, so results are identical on
//! repeated calls and safe to compute from several threads at once.

pub mod breakdown;
pub mod query;
pub mod totals;
pub mod utilization;

pub use breakdown::{by_category, by_month, category_shares, CategoryShare, CategoryTotal, MonthTotals};
pub use query::{categories, filter_by_category, recent, CategoryFilter};
pub use totals::{totals, Totals};
pub use utilization::{budget_utilization, Utilization};

use serde::Serialize;

use crate::analytics::{self, CategoryFilter, CategoryShare, MonthTotals, Totals};
use crate::config::Config;
use crate::ledger::Ledger;

use super::{BudgetService, BudgetStatus, TransactionService, TransactionView};

/// Everything the overview screen needs from one snapshot.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Dashboard {
    pub totals: Totals,
    pub budgets: Vec<BudgetStatus>,
    pub recent: Vec<TransactionView>,
    pub categories: Vec<String>,
}

/// Monthly and per-category breakdowns for the analytics screen.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnalyticsReport {
    /// Most recent month first, capped by configuration.
    pub monthly: Vec<MonthTotals>,
    pub categories: Vec<CategoryShare>,
    pub budgets: Vec<BudgetStatus>,
}

pub struct SummaryService;

impl SummaryService {
    pub fn dashboard(ledger: &Ledger, config: &Config, filter: &CategoryFilter) -> Dashboard {
        let dashboard = Dashboard {
            totals: analytics::totals(ledger.transactions()),
            budgets: BudgetService::list(ledger),
            recent: TransactionService::recent(ledger, filter, config.recent_transactions),
            categories: analytics::categories(ledger.transactions()),
        };
        tracing::debug!(
            budgets = dashboard.budgets.len(),
            recent = dashboard.recent.len(),
            "dashboard assembled"
        );
        dashboard
    }

    pub fn analytics(ledger: &Ledger, config: &Config) -> AnalyticsReport {
        let transactions = ledger.transactions();
        let mut monthly = analytics::by_month(transactions);
        monthly.reverse();
        monthly.truncate(config.monthly_overview_months);
        AnalyticsReport {
            monthly,
            categories: analytics::category_shares(&analytics::by_category(transactions)),
            budgets: BudgetService::list(ledger),
        }
    }
}

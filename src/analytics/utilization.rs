use serde::Serialize;

use crate::ledger::Budget;

use super::breakdown::percentage_of;

/// How much of a budget's limit has been consumed.
///
/// `percentage` is raw and may exceed 100; clamp with [`Utilization::bar_width`]
/// when drawing a progress bar.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Utilization {
    pub percentage: f64,
    pub is_over_budget: bool,
}

impl Utilization {
    pub fn bar_width(&self) -> f64 {
        self.percentage.min(100.0)
    }
}

/// Zero limit reports 0% but is still over budget once anything is spent.
pub fn budget_utilization(budget: &Budget) -> Utilization {
    Utilization {
        percentage: percentage_of(budget.spent, budget.monthly_limit),
        is_over_budget: budget.spent > budget.monthly_limit,
    }
}

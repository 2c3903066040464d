//! Business logic helpers for managing budgets.

use serde::Serialize;
use uuid::Uuid;

use crate::analytics::{budget_utilization, Utilization};
use crate::errors::{LedgerError, LedgerResult};
use crate::ledger::{Budget, BudgetChanges, Clock, Ledger, Mutation, NewBudget};

/// A budget paired with its current utilization.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BudgetStatus {
    pub budget: Budget,
    pub utilization: Utilization,
}

impl BudgetStatus {
    pub fn of(budget: &Budget) -> Self {
        Self {
            budget: budget.clone(),
            utilization: budget_utilization(budget),
        }
    }
}

/// Provides validated budget operations over ledger snapshots.
pub struct BudgetService;

impl BudgetService {
    pub fn create(ledger: &Ledger, draft: NewBudget, clock: &dyn Clock) -> LedgerResult<Mutation<Budget>> {
        let mutation = ledger.create_budget(draft, clock)?;
        tracing::info!(
            budget_id = %mutation.record.id,
            name = %mutation.record.name,
            limit = mutation.record.monthly_limit,
            "budget created"
        );
        Ok(mutation)
    }

    pub fn update(ledger: &Ledger, id: Uuid, changes: BudgetChanges) -> LedgerResult<Mutation<Budget>> {
        if changes.is_empty() {
            tracing::debug!(budget_id = %id, "budget update without changes");
        }
        let mutation = ledger.update_budget(id, changes)?;
        tracing::info!(budget_id = %id, name = %mutation.record.name, "budget updated");
        Ok(mutation)
    }

    /// Removes the budget; its transactions are kept and become unattributed.
    pub fn remove(ledger: &Ledger, id: Uuid) -> LedgerResult<Mutation<Budget>> {
        let mutation = ledger.delete_budget(id)?;
        let orphaned = mutation
            .ledger
            .transactions()
            .iter()
            .filter(|txn| txn.budget_id == Some(id))
            .count();
        if orphaned > 0 {
            tracing::warn!(budget_id = %id, orphaned, "budget deleted with linked transactions");
        } else {
            tracing::info!(budget_id = %id, "budget deleted");
        }
        Ok(mutation)
    }

    pub fn list(ledger: &Ledger) -> Vec<BudgetStatus> {
        ledger.budgets().iter().map(BudgetStatus::of).collect()
    }

    pub fn utilization(ledger: &Ledger, id: Uuid) -> LedgerResult<Utilization> {
        ledger
            .budget(id)
            .map(budget_utilization)
            .ok_or_else(|| LedgerError::budget_not_found(id))
    }
}

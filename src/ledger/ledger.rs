use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::{LedgerError, LedgerResult};

use super::{
    budget::{Budget, BudgetChanges, NewBudget},
    time::Clock,
    transaction::{NewTransaction, Transaction},
};

/// Relative tolerance used when comparing recorded and recomputed spend.
/// Scaled by the expected amount, with a floor of one currency unit.
pub const SPENT_TOLERANCE: f64 = 1e-9;

/// Whether a recorded spend agrees with the recomputed one within [`SPENT_TOLERANCE`].
pub fn spent_matches(recorded: f64, expected: f64) -> bool {
    (recorded - expected).abs() <= SPENT_TOLERANCE * expected.abs().max(1.0)
}

/// Immutable snapshot of every budget and transaction.
///
/// Mutations never touch `self`; each returns a fresh snapshot in a [`Mutation`].
/// Deserialization goes through [`Ledger::try_from_parts`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "SnapshotParts")]
pub struct Ledger {
    budgets: Vec<Budget>,
    transactions: Vec<Transaction>,
}

/// Wire shape of a snapshot before record-level validation.
#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct SnapshotParts {
    #[serde(default)]
    budgets: Vec<Budget>,
    #[serde(default)]
    transactions: Vec<Transaction>,
}

impl TryFrom<SnapshotParts> for Ledger {
    type Error = LedgerError;

    fn try_from(parts: SnapshotParts) -> LedgerResult<Self> {
        Ledger::try_from_parts(parts.budgets, parts.transactions)
    }
}

/// Outcome of a successful ledger operation: the next snapshot plus the affected record.
#[derive(Debug, Clone, PartialEq)]
pub struct Mutation<T> {
    pub ledger: Ledger,
    pub record: T,
}

impl<T> Mutation<T> {
    pub fn into_parts(self) -> (Ledger, T) {
        (self.ledger, self.record)
    }
}

/// A budget whose recorded spend disagrees with its linked expenses.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SpentDrift {
    pub budget_id: Uuid,
    pub budget_name: String,
    pub recorded: f64,
    pub expected: f64,
}

impl Ledger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Wraps collections received from a persistence collaborator.
    ///
    /// Each record must satisfy the field rules the mutation operations enforce,
    /// and ids must be unique. Spend drift and dangling budget references are
    /// accepted here and reported by [`Ledger::verify_spent`] and
    /// [`Ledger::dangling_transactions`].
    pub fn try_from_parts(budgets: Vec<Budget>, transactions: Vec<Transaction>) -> LedgerResult<Self> {
        let mut seen = HashSet::new();
        for budget in &budgets {
            budget.check()?;
            if !seen.insert(budget.id) {
                return Err(LedgerError::Validation(format!(
                    "duplicate budget id {}",
                    budget.id
                )));
            }
        }
        seen.clear();
        for transaction in &transactions {
            transaction.check()?;
            if !seen.insert(transaction.id) {
                return Err(LedgerError::Validation(format!(
                    "duplicate transaction id {}",
                    transaction.id
                )));
            }
        }
        Ok(Self {
            budgets,
            transactions,
        })
    }

    pub fn budgets(&self) -> &[Budget] {
        &self.budgets
    }

    pub fn transactions(&self) -> &[Transaction] {
        &self.transactions
    }

    pub fn budget(&self, id: Uuid) -> Option<&Budget> {
        self.budgets.iter().find(|budget| budget.id == id)
    }

    pub fn transaction(&self, id: Uuid) -> Option<&Transaction> {
        self.transactions.iter().find(|txn| txn.id == id)
    }

    pub fn is_empty(&self) -> bool {
        self.budgets.is_empty() && self.transactions.is_empty()
    }

    pub fn create_budget(&self, draft: NewBudget, clock: &dyn Clock) -> LedgerResult<Mutation<Budget>> {
        let budget = Budget::open(draft, clock.today())?;
        let mut next = self.clone();
        next.budgets.push(budget.clone());
        Ok(Mutation {
            ledger: next,
            record: budget,
        })
    }

    /// Edits name, limit, or color. `spent` is not reachable through this path.
    pub fn update_budget(&self, id: Uuid, changes: BudgetChanges) -> LedgerResult<Mutation<Budget>> {
        let mut next = self.clone();
        let budget = next
            .budget_mut(id)
            .ok_or_else(|| LedgerError::budget_not_found(id))?;
        budget.apply(changes)?;
        let updated = budget.clone();
        Ok(Mutation {
            ledger: next,
            record: updated,
        })
    }

    /// Removes a budget. Linked transactions keep their now-dangling `budget_id`.
    pub fn delete_budget(&self, id: Uuid) -> LedgerResult<Mutation<Budget>> {
        let index = self
            .budgets
            .iter()
            .position(|budget| budget.id == id)
            .ok_or_else(|| LedgerError::budget_not_found(id))?;
        let mut next = self.clone();
        let removed = next.budgets.remove(index);
        Ok(Mutation {
            ledger: next,
            record: removed,
        })
    }

    /// Records a transaction and charges its budget in the same state transition.
    pub fn create_transaction(
        &self,
        draft: NewTransaction,
        clock: &dyn Clock,
    ) -> LedgerResult<Mutation<Transaction>> {
        let transaction = Transaction::record(draft, clock.today())?;
        let mut next = self.clone();
        if let Some(budget) = transaction
            .charged_budget()
            .and_then(|budget_id| next.budget_mut(budget_id))
        {
            budget.spent += transaction.magnitude();
        }
        next.transactions.push(transaction.clone());
        Ok(Mutation {
            ledger: next,
            record: transaction,
        })
    }

    /// Removes a transaction and refunds its budget, never below zero.
    pub fn delete_transaction(&self, id: Uuid) -> LedgerResult<Mutation<Transaction>> {
        let index = self
            .transactions
            .iter()
            .position(|txn| txn.id == id)
            .ok_or_else(|| LedgerError::transaction_not_found(id))?;
        let mut next = self.clone();
        let removed = next.transactions.remove(index);
        if let Some(budget) = removed
            .charged_budget()
            .and_then(|budget_id| next.budget_mut(budget_id))
        {
            budget.spent = (budget.spent - removed.magnitude()).max(0.0);
        }
        Ok(Mutation {
            ledger: next,
            record: removed,
        })
    }

    /// Sum of expense magnitudes charged to `budget_id`, computed from transactions alone.
    pub fn expected_spent(&self, budget_id: Uuid) -> f64 {
        self.transactions
            .iter()
            .filter(|txn| txn.charged_budget() == Some(budget_id))
            .map(Transaction::magnitude)
            .sum()
    }

    /// Recomputes every budget's spend independently and reports mismatches.
    pub fn verify_spent(&self) -> Vec<SpentDrift> {
        self.budgets
            .iter()
            .filter_map(|budget| {
                let expected = self.expected_spent(budget.id);
                if !spent_matches(budget.spent, expected) {
                    Some(SpentDrift {
                        budget_id: budget.id,
                        budget_name: budget.name.clone(),
                        recorded: budget.spent,
                        expected,
                    })
                } else {
                    None
                }
            })
            .collect()
    }

    /// Transactions whose budget reference points at a budget that no longer exists.
    pub fn dangling_transactions(&self) -> Vec<&Transaction> {
        self.transactions
            .iter()
            .filter(|txn| matches!(txn.budget_id, Some(id) if self.budget(id).is_none()))
            .collect()
    }

    /// Name of the budget a transaction is attributed to; `None` reads as "no budget".
    pub fn budget_label(&self, transaction: &Transaction) -> Option<&str> {
        transaction
            .budget_id
            .and_then(|id| self.budget(id))
            .map(|budget| budget.name.as_str())
    }

    fn budget_mut(&mut self, id: Uuid) -> Option<&mut Budget> {
        self.budgets.iter_mut().find(|budget| budget.id == id)
    }
}

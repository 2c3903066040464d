//! Business logic helpers for managing transactions.

use serde::Serialize;
use uuid::Uuid;

use crate::analytics::{filter_by_category, recent, CategoryFilter};
use crate::errors::LedgerResult;
use crate::ledger::{Clock, Ledger, Mutation, NewTransaction, Transaction};

/// A transaction with its budget resolved for display.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionView {
    pub transaction: Transaction,
    /// `None` for income, unattributed expenses, and deleted budgets.
    pub budget_name: Option<String>,
}

impl TransactionView {
    pub fn resolve(ledger: &Ledger, transaction: &Transaction) -> Self {
        Self {
            transaction: transaction.clone(),
            budget_name: ledger.budget_label(transaction).map(str::to_string),
        }
    }
}

/// Provides validated create/delete helpers and listings for transactions.
pub struct TransactionService;

impl TransactionService {
    pub fn create(
        ledger: &Ledger,
        draft: NewTransaction,
        clock: &dyn Clock,
    ) -> LedgerResult<Mutation<Transaction>> {
        let mutation = ledger.create_transaction(draft, clock)?;
        let txn = &mutation.record;
        if let Some(budget_id) = txn.budget_id {
            if mutation.ledger.budget(budget_id).is_none() {
                tracing::warn!(
                    transaction_id = %txn.id,
                    budget_id = %budget_id,
                    "transaction references an unknown budget; recorded without charge"
                );
            }
        }
        tracing::info!(
            transaction_id = %txn.id,
            kind = %txn.kind,
            amount = txn.amount,
            category = %txn.category,
            "transaction recorded"
        );
        Ok(mutation)
    }

    pub fn remove(ledger: &Ledger, id: Uuid) -> LedgerResult<Mutation<Transaction>> {
        let mutation = ledger.delete_transaction(id)?;
        tracing::info!(
            transaction_id = %id,
            amount = mutation.record.amount,
            "transaction deleted"
        );
        Ok(mutation)
    }

    /// Transactions in insertion order, narrowed by category.
    pub fn list(ledger: &Ledger, filter: &CategoryFilter) -> Vec<TransactionView> {
        filter_by_category(ledger.transactions(), filter)
            .into_iter()
            .map(|txn| TransactionView::resolve(ledger, txn))
            .collect()
    }

    /// Newest `limit` transactions matching `filter`, newest first.
    pub fn recent(ledger: &Ledger, filter: &CategoryFilter, limit: usize) -> Vec<TransactionView> {
        recent(filter_by_category(ledger.transactions(), filter), limit)
            .into_iter()
            .map(|txn| TransactionView::resolve(ledger, txn))
            .collect()
    }
}

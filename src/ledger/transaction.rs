use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::{LedgerError, LedgerResult};

/// A single signed monetary event. Expenses are stored negative, income positive.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct Transaction {
    pub id: Uuid,
    #[serde(default)]
    pub budget_id: Option<Uuid>,
    pub amount: f64,
    #[serde(rename = "type")]
    pub kind: TransactionKind,
    pub category: String,
    pub date: NaiveDate,
    #[serde(default)]
    pub notes: Option<String>,
    #[serde(default)]
    pub payment_method: PaymentMethod,
}

impl Transaction {
    /// Validates a draft and normalizes the stored sign against its kind.
    pub(crate) fn record(draft: NewTransaction, date: NaiveDate) -> LedgerResult<Self> {
        if !draft.amount.is_finite() || draft.amount <= 0.0 {
            return Err(LedgerError::Validation(format!(
                "amount must be a positive number (got {})",
                draft.amount
            )));
        }
        let category = draft.category.trim();
        if category.is_empty() {
            return Err(LedgerError::Validation("category must not be empty".into()));
        }

        let (amount, budget_id) = match draft.kind {
            TransactionKind::Income => (draft.amount, None),
            TransactionKind::Expense => (-draft.amount, draft.budget_id),
        };
        let notes = draft
            .notes
            .map(|text| text.trim().to_string())
            .filter(|text| !text.is_empty());

        Ok(Self {
            id: Uuid::new_v4(),
            budget_id,
            amount,
            kind: draft.kind,
            category: category.to_string(),
            date,
            notes,
            payment_method: draft.payment_method.unwrap_or_default(),
        })
    }

    /// Checks a stored record: sign matches kind, category is present, and
    /// income carries no budget.
    pub(crate) fn check(&self) -> LedgerResult<()> {
        let signed_ok = match self.kind {
            TransactionKind::Expense => self.amount < 0.0,
            TransactionKind::Income => self.amount > 0.0,
        };
        if !self.amount.is_finite() || !signed_ok {
            return Err(LedgerError::Validation(format!(
                "transaction {} has amount {} which does not match type {}",
                self.id, self.amount, self.kind
            )));
        }
        if self.category.trim().is_empty() {
            return Err(LedgerError::Validation(format!(
                "transaction {} has an empty category",
                self.id
            )));
        }
        if self.is_income() && self.budget_id.is_some() {
            return Err(LedgerError::Validation(format!(
                "income transaction {} must not reference a budget",
                self.id
            )));
        }
        Ok(())
    }

    pub fn magnitude(&self) -> f64 {
        self.amount.abs()
    }

    pub fn is_expense(&self) -> bool {
        self.kind == TransactionKind::Expense
    }

    pub fn is_income(&self) -> bool {
        self.kind == TransactionKind::Income
    }

    /// Budget this transaction counts against, if any. Income never counts.
    pub fn charged_budget(&self) -> Option<Uuid> {
        if self.is_expense() {
            self.budget_id
        } else {
            None
        }
    }

    /// Calendar month bucket in `YYYY-MM` form.
    pub fn month_key(&self) -> String {
        self.date.format("%Y-%m").to_string()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionKind {
    Expense,
    Income,
}

impl fmt::Display for TransactionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TransactionKind::Expense => f.write_str("expense"),
            TransactionKind::Income => f.write_str("income"),
        }
    }
}

impl FromStr for TransactionKind {
    type Err = LedgerError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "expense" => Ok(TransactionKind::Expense),
            "income" => Ok(TransactionKind::Income),
            other => Err(LedgerError::Validation(format!(
                "unknown transaction type `{other}` (expected expense or income)"
            ))),
        }
    }
}

/// How a transaction was paid. Display-only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaymentMethod {
    #[default]
    Cash,
    Card,
    Bank,
}

impl fmt::Display for PaymentMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PaymentMethod::Cash => f.write_str("cash"),
            PaymentMethod::Card => f.write_str("card"),
            PaymentMethod::Bank => f.write_str("bank"),
        }
    }
}

impl FromStr for PaymentMethod {
    type Err = LedgerError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "cash" => Ok(PaymentMethod::Cash),
            "card" => Ok(PaymentMethod::Card),
            "bank" => Ok(PaymentMethod::Bank),
            other => Err(LedgerError::Validation(format!(
                "unknown payment method `{other}` (expected cash, card or bank)"
            ))),
        }
    }
}

/// Caller-supplied fields for a new transaction. `amount` is the unsigned magnitude.
#[derive(Debug, Clone, PartialEq)]
pub struct NewTransaction {
    pub kind: TransactionKind,
    pub amount: f64,
    pub category: String,
    pub budget_id: Option<Uuid>,
    pub notes: Option<String>,
    pub payment_method: Option<PaymentMethod>,
}

impl NewTransaction {
    pub fn new(kind: TransactionKind, amount: f64, category: impl Into<String>) -> Self {
        Self {
            kind,
            amount,
            category: category.into(),
            budget_id: None,
            notes: None,
            payment_method: None,
        }
    }

    pub fn expense(amount: f64, category: impl Into<String>) -> Self {
        Self::new(TransactionKind::Expense, amount, category)
    }

    pub fn income(amount: f64, category: impl Into<String>) -> Self {
        Self::new(TransactionKind::Income, amount, category)
    }

    pub fn for_budget(mut self, budget_id: Uuid) -> Self {
        self.budget_id = Some(budget_id);
        self
    }

    pub fn with_notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = Some(notes.into());
        self
    }

    pub fn paid_by(mut self, method: PaymentMethod) -> Self {
        self.payment_method = Some(method);
        self
    }
}

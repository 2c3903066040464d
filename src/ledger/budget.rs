use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::{LedgerError, LedgerResult};

pub const DEFAULT_BUDGET_COLOR: &str = "#10b981";

/// A named monthly spending ceiling with its accumulated spend.
///
/// `spent` is materialized by the ledger; it is only changed through
/// transaction creation and deletion.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct Budget {
    pub id: Uuid,
    pub name: String,
    pub monthly_limit: f64,
    pub color: String,
    pub spent: f64,
    pub start_date: NaiveDate,
}

impl Budget {
    pub(crate) fn open(draft: NewBudget, start_date: NaiveDate) -> LedgerResult<Self> {
        let name = validate_name(&draft.name)?;
        let monthly_limit = validate_limit(draft.monthly_limit)?;
        Ok(Self {
            id: Uuid::new_v4(),
            name,
            monthly_limit,
            color: draft
                .color
                .unwrap_or_else(|| DEFAULT_BUDGET_COLOR.to_string()),
            spent: 0.0,
            start_date,
        })
    }

    /// Checks a stored record against the same rules `open` applies.
    pub(crate) fn check(&self) -> LedgerResult<()> {
        validate_name(&self.name)?;
        validate_limit(self.monthly_limit)?;
        if !self.spent.is_finite() || self.spent < 0.0 {
            return Err(LedgerError::Validation(format!(
                "budget `{}` has invalid spent {}",
                self.name, self.spent
            )));
        }
        Ok(())
    }

    pub fn remaining(&self) -> f64 {
        self.monthly_limit - self.spent
    }

    /// Applies the caller-editable fields, validating before anything is written.
    pub(crate) fn apply(&mut self, changes: BudgetChanges) -> LedgerResult<()> {
        let name = changes.name.as_deref().map(validate_name).transpose()?;
        let limit = changes.monthly_limit.map(validate_limit).transpose()?;
        if let Some(name) = name {
            self.name = name;
        }
        if let Some(limit) = limit {
            self.monthly_limit = limit;
        }
        if let Some(color) = changes.color {
            self.color = color;
        }
        Ok(())
    }
}

/// Caller-supplied fields for a budget that does not exist yet.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewBudget {
    pub name: String,
    pub monthly_limit: f64,
    #[serde(default)]
    pub color: Option<String>,
}

impl NewBudget {
    pub fn new(name: impl Into<String>, monthly_limit: f64) -> Self {
        Self {
            name: name.into(),
            monthly_limit,
            color: None,
        }
    }

    pub fn with_color(mut self, color: impl Into<String>) -> Self {
        self.color = Some(color.into());
        self
    }
}

/// Partial update for a budget. Spend is not editable here.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BudgetChanges {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub monthly_limit: Option<f64>,
    #[serde(default)]
    pub color: Option<String>,
}

impl BudgetChanges {
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.monthly_limit.is_none() && self.color.is_none()
    }
}

fn validate_name(raw: &str) -> LedgerResult<String> {
    let name = raw.trim();
    if name.is_empty() {
        return Err(LedgerError::Validation(
            "budget name must not be empty".into(),
        ));
    }
    Ok(name.to_string())
}

fn validate_limit(limit: f64) -> LedgerResult<f64> {
    if !limit.is_finite() {
        return Err(LedgerError::Validation(
            "monthly limit must be a finite number".into(),
        ));
    }
    if limit < 0.0 {
        return Err(LedgerError::Validation(format!(
            "monthly limit must not be negative (got {limit})"
        )));
    }
    Ok(limit)
}

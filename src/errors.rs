use std::fmt;

use thiserror::Error;
use uuid::Uuid;

/// Entity families the ledger can report as missing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntityKind {
    Budget,
    Transaction,
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EntityKind::Budget => f.write_str("budget"),
            EntityKind::Transaction => f.write_str("transaction"),
        }
    }
}

/// Error type that captures caller-input failures of ledger operations.
#[derive(Debug, Error, PartialEq)]
pub enum LedgerError {
    #[error("Validation failed: {0}")]
    Validation(String),
    #[error("{entity} not found: {id}")]
    NotFound { entity: EntityKind, id: Uuid },
}

impl LedgerError {
    pub fn budget_not_found(id: Uuid) -> Self {
        LedgerError::NotFound {
            entity: EntityKind::Budget,
            id,
        }
    }

    pub fn transaction_not_found(id: Uuid) -> Self {
        LedgerError::NotFound {
            entity: EntityKind::Transaction,
            id,
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, LedgerError::NotFound { .. })
    }
}

pub type LedgerResult<T> = Result<T, LedgerError>;

/// Failures raised while reading or writing snapshots and configuration.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),
    #[error("Persistence error: {0}")]
    Persistence(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_found_message_names_entity() {
        let id = Uuid::new_v4();
        let err = LedgerError::budget_not_found(id);
        assert_eq!(err.to_string(), format!("budget not found: {id}"));
        assert!(err.is_not_found());
    }

    #[test]
    fn validation_is_not_a_lookup_failure() {
        let err = LedgerError::Validation("name must not be empty".into());
        assert!(!err.is_not_found());
        assert!(err.to_string().contains("name must not be empty"));
    }
}

mod common;

use std::fs;

use budget_tracker::{
    errors::StorageError,
    ledger::{Ledger, NewTransaction, PaymentMethod},
    utils::{
        demo::sample_ledger,
        persistence::{load_snapshot, save_snapshot},
    },
};
use common::{clock, ledger_with_budget, temp_home};

#[test]
fn save_and_load_roundtrip() {
    let path = temp_home().join("ledger.json");
    let ledger = sample_ledger().unwrap();
    save_snapshot(&ledger, &path).expect("save snapshot");

    let report = load_snapshot(&path).expect("load snapshot");
    assert_eq!(report.ledger, ledger);
    assert!(report.warnings.is_empty());
}

#[test]
fn snapshot_uses_data_contract_field_names() {
    let path = temp_home().join("ledger.json");
    let (ledger, id) = ledger_with_budget("Groceries", 30000.0);
    let ledger = ledger
        .create_transaction(
            NewTransaction::expense(2500.0, "Food")
                .for_budget(id)
                .paid_by(PaymentMethod::Card),
            &clock(),
        )
        .unwrap()
        .ledger;
    save_snapshot(&ledger, &path).unwrap();

    let json: serde_json::Value = serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
    let budget = &json["budgets"][0];
    assert_eq!(budget["monthlyLimit"], 30000.0);
    assert_eq!(budget["spent"], 2500.0);
    assert_eq!(budget["startDate"], "2025-11-03");
    let txn = &json["transactions"][0];
    assert_eq!(txn["type"], "expense");
    assert_eq!(txn["amount"], -2500.0);
    assert_eq!(txn["budgetId"], id.to_string());
    assert_eq!(txn["paymentMethod"], "card");
}

#[test]
fn loading_reports_drift_without_repairing() {
    let path = temp_home().join("drifted.json");
    let (ledger, id) = ledger_with_budget("Groceries", 30000.0);
    let mut json = serde_json::to_value(&ledger).unwrap();
    json["budgets"][0]["spent"] = serde_json::json!(18500.0);
    fs::write(&path, serde_json::to_string(&json).unwrap()).unwrap();

    let report = load_snapshot(&path).unwrap();
    assert_eq!(report.ledger.budget(id).unwrap().spent, 18500.0);
    assert_eq!(report.warnings.len(), 1);
    assert!(report.warnings[0].contains("Groceries"));
}

#[test]
fn corrupt_snapshot_is_a_serde_error() {
    let path = temp_home().join("broken.json");
    fs::write(&path, "{ not json").unwrap();
    assert!(matches!(load_snapshot(&path), Err(StorageError::Serde(_))));
}

#[test]
fn empty_document_loads_as_empty_ledger() {
    let path = temp_home().join("empty.json");
    fs::write(&path, "{}").unwrap();
    let report = load_snapshot(&path).unwrap();
    assert_eq!(report.ledger, Ledger::new());
}

#[test]
fn records_breaking_field_rules_are_rejected_on_load() {
    let path = temp_home().join("invalid.json");
    let ledger = sample_ledger().unwrap();
    let mut json = serde_json::to_value(&ledger).unwrap();
    json["transactions"][0]["amount"] = serde_json::json!(-85000.0);
    fs::write(&path, serde_json::to_string(&json).unwrap()).unwrap();

    match load_snapshot(&path) {
        Err(StorageError::Serde(err)) => assert!(err.to_string().contains("Validation failed")),
        other => panic!("expected a validation failure, got {other:?}"),
    }
}

#[test]
fn unknown_fields_are_rejected_on_load() {
    let path = temp_home().join("extra.json");
    let (ledger, _) = ledger_with_budget("Groceries", 30000.0);
    let mut json = serde_json::to_value(&ledger).unwrap();
    json["budgets"][0]["bogus"] = serde_json::json!(1);
    fs::write(&path, serde_json::to_string(&json).unwrap()).unwrap();

    assert!(matches!(load_snapshot(&path), Err(StorageError::Serde(_))));
}

mod common;

use fintrack_core::ledger::LedgerStore;
use fintrack_core::storage::{JsonStore, StorageBackend};
use std::fs;

fn open(dir: &std::path::Path) -> (LedgerStore, Vec<String>) {
    LedgerStore::open(Box::new(JsonStore::new(dir)))
}

#[test]
fn reopening_reproduces_identical_state() {
    let dir = common::data_dir();
    {
        let (mut store, _) = open(&dir);
        store
            .add_income(2000.0, "Salary", "Acme", "monthly payday")
            .unwrap();
        store.add_expense(150.0, "Food", "groceries").unwrap();
        store.add_expense(-20.0, "Food", "refund").unwrap();
        store.set_budget("Food", 300.0).unwrap();
        store.set_budget("Bills", 120.0).unwrap();
    }

    let (reloaded, warnings) = open(&dir);
    assert!(warnings.is_empty());

    let raw = fs::read_to_string(dir.join("transactions.json")).unwrap();
    let from_disk: Vec<fintrack_core::ledger::Transaction> = serde_json::from_str(&raw).unwrap();
    assert_eq!(reloaded.transactions(), &from_disk[..]);
    assert_eq!(reloaded.transactions().len(), 3);
    let ids: Vec<u64> = reloaded.transactions().iter().map(|t| t.id).collect();
    assert_eq!(ids, vec![1, 2, 3], "reload keeps insertion order and ids");
    assert_eq!(reloaded.budgets().get("Food"), Some(&300.0));
    assert_eq!(reloaded.budgets().get("Bills"), Some(&120.0));
}

#[test]
fn corrupt_transaction_store_recovers_empty_with_warning() {
    let dir = common::data_dir();
    fs::write(dir.join("transactions.json"), "[{\"id\": broken").unwrap();

    let (store, warnings) = open(&dir);
    assert!(store.transactions().is_empty());
    assert_eq!(warnings.len(), 1);
    assert!(warnings[0].contains("Starting fresh"));

    assert!(
        dir.join("transactions.json.corrupt").exists(),
        "the unreadable document must be preserved before any overwrite"
    );
}

#[test]
fn save_after_recovery_overwrites_only_the_live_file() {
    let dir = common::data_dir();
    fs::write(dir.join("transactions.json"), "not json at all").unwrap();

    let (mut store, _) = open(&dir);
    store.add_expense(10.0, "Food", "").unwrap();

    let live = fs::read_to_string(dir.join("transactions.json")).unwrap();
    assert!(live.contains("\"Food\""));
    let preserved = fs::read_to_string(dir.join("transactions.json.corrupt")).unwrap();
    assert_eq!(preserved, "not json at all");
}

#[test]
fn each_mutation_is_visible_on_disk_immediately() {
    let dir = common::data_dir();
    let probe = JsonStore::new(&dir);
    let (mut store, _) = open(&dir);

    store.add_expense(25.0, "Food", "").unwrap();
    assert_eq!(probe.load_transactions().value.len(), 1);

    store.add_income(100.0, "Gift", "Family", "").unwrap();
    assert_eq!(probe.load_transactions().value.len(), 2);

    store.delete_transaction(1).unwrap();
    let remaining = probe.load_transactions().value;
    assert_eq!(remaining.len(), 1);
    assert_eq!(remaining[0].id, 2);

    store.set_budget("Food", 50.0).unwrap();
    assert_eq!(probe.load_budgets().value.get("Food"), Some(&50.0));
    store.delete_budget("Food").unwrap();
    assert!(probe.load_budgets().value.is_empty());
}

use chrono::NaiveDate;
use quincena_core::errors::LedgerError;
use quincena_core::ledger::{
    Account, AccountKind, Category, Frequency, Ledger, RecurrenceException, RecurrenceRule,
    Transaction, TransactionKind,
};
use quincena_core::storage::{JsonStorage, StorageBackend};
use tempfile::tempdir;

fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).unwrap()
}

fn populated_ledger() -> Ledger {
    let mut ledger = Ledger::new("Household");
    let account_id = ledger.add_account(Account::new("Bank", AccountKind::Bank));
    let category_id = ledger.add_category(
        Category::new("Salary", TransactionKind::Income, "#00AA00").with_icon("briefcase"),
    );
    let rule = RecurrenceRule::new(
        Frequency::Monthly,
        date(2024, 1, 31),
        1500.0,
        TransactionKind::Income,
        category_id,
        account_id,
        Some("Payday".into()),
    );
    let rule_id = ledger.add_rule(rule);
    ledger
        .exceptions
        .push(RecurrenceException::new(rule_id, date(2024, 3, 31)));
    ledger.add_transaction(Transaction::new(
        55.0,
        TransactionKind::Expense,
        date(2024, 1, 10),
        category_id,
        account_id,
    ));
    ledger.materialize_month(2024, 1);
    ledger
}

#[test]
fn save_and_load_roundtrip_preserves_the_ledger() {
    let dir = tempdir().unwrap();
    let storage = JsonStorage::new(Some(dir.path().to_path_buf())).unwrap();
    let ledger = populated_ledger();

    storage.save(&ledger, "Household").unwrap();
    let loaded = storage.load("Household").unwrap();

    assert_eq!(loaded.id, ledger.id);
    assert_eq!(loaded.accounts, ledger.accounts);
    assert_eq!(loaded.categories, ledger.categories);
    assert_eq!(loaded.transactions, ledger.transactions);
    assert_eq!(loaded.rules, ledger.rules);
    assert_eq!(loaded.exceptions, ledger.exceptions);

    // Expansion state survives the roundtrip: January is already done.
    let mut loaded = loaded;
    assert_eq!(loaded.materialize_month(2024, 1), 0);
    assert_eq!(loaded.materialize_month(2024, 3), 0); // exception month
    assert_eq!(loaded.materialize_month(2024, 2), 1);
}

#[test]
fn ledger_names_are_canonicalized_and_listed() {
    let dir = tempdir().unwrap();
    let storage = JsonStorage::new(Some(dir.path().to_path_buf())).unwrap();
    let ledger = populated_ledger();

    storage.save(&ledger, "My Budget").unwrap();
    assert!(storage.ledger_path("My Budget").ends_with("my_budget.json"));
    assert_eq!(storage.list().unwrap(), vec!["my_budget".to_string()]);
}

#[test]
fn loading_a_missing_ledger_reports_storage_error() {
    let dir = tempdir().unwrap();
    let storage = JsonStorage::new(Some(dir.path().to_path_buf())).unwrap();
    let err = storage.load("nope").expect_err("missing ledger must fail");
    assert!(matches!(err, LedgerError::Storage(_)), "got {err:?}");
}

#[test]
fn no_staging_files_remain_after_save() {
    let dir = tempdir().unwrap();
    let storage = JsonStorage::new(Some(dir.path().to_path_buf())).unwrap();
    storage.save(&populated_ledger(), "atomic").unwrap();
    storage.save(&populated_ledger(), "atomic").unwrap();

    let leftovers: Vec<_> = std::fs::read_dir(dir.path())
        .unwrap()
        .filter_map(|entry| entry.ok())
        .filter(|entry| entry.path().extension().is_some_and(|ext| ext == "partial"))
        .collect();
    assert!(leftovers.is_empty());
    assert!(storage.ledger_path("atomic").exists());
}

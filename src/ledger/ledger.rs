use chrono::NaiveDateTime;
use std::collections::BTreeMap;

use super::transaction::{Transaction, TransactionDraft};

/// The complete in-memory state for one user: every transaction plus the
/// per-category monthly budget limits. Pure data; persistence and flushing
/// live in [`super::store::LedgerStore`].
///
/// Ids are assigned from a session high-water mark seeded with
/// `max(existing ids) + 1` at load, so deleting a transaction never causes a
/// later addition to reuse its id.
#[derive(Debug, Clone, Default)]
pub struct Ledger {
    pub transactions: Vec<Transaction>,
    pub budgets: BTreeMap<String, f64>,
    next_id: u64,
}

impl Ledger {
    pub fn new(transactions: Vec<Transaction>, budgets: BTreeMap<String, f64>) -> Self {
        let next_id = transactions.iter().map(|txn| txn.id).max().unwrap_or(0) + 1;
        Self {
            transactions,
            budgets,
            next_id,
        }
    }

    /// Appends a transaction built from `draft`, assigning a fresh id and the
    /// supplied timestamp. Returns the assigned id.
    pub fn add_transaction(&mut self, draft: TransactionDraft, timestamp: NaiveDateTime) -> u64 {
        let id = self.next_id.max(1);
        self.next_id = id + 1;
        self.transactions.push(Transaction {
            id,
            amount: draft.amount,
            kind: draft.kind,
            category: draft.category,
            source: draft.source,
            description: draft.description,
            timestamp,
        });
        id
    }

    /// Removes the transaction with the given id, returning it if present.
    /// Idempotent: removing an absent id is a no-op returning `None`.
    pub fn remove_transaction(&mut self, id: u64) -> Option<Transaction> {
        let index = self.transactions.iter().position(|txn| txn.id == id)?;
        Some(self.transactions.remove(index))
    }

    pub fn transaction(&self, id: u64) -> Option<&Transaction> {
        self.transactions.iter().find(|txn| txn.id == id)
    }

    /// Sets (or overwrites) the monthly budget for a category.
    pub fn set_budget(&mut self, category: impl Into<String>, amount: f64) {
        self.budgets.insert(category.into(), amount);
    }

    /// Removes the budget for a category, returning the old limit if any.
    pub fn remove_budget(&mut self, category: &str) -> Option<f64> {
        self.budgets.remove(category)
    }

    pub fn transaction_count(&self) -> usize {
        self.transactions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.transactions.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ledger::transaction::TransactionDraft;
    use chrono::NaiveDate;

    fn noon(day: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2025, 6, day)
            .unwrap()
            .and_hms_opt(12, 0, 0)
            .unwrap()
    }

    #[test]
    fn ids_are_monotonic_and_start_at_one() {
        let mut ledger = Ledger::default();
        let first = ledger.add_transaction(TransactionDraft::expense(10.0, "Food", ""), noon(1));
        let second = ledger.add_transaction(TransactionDraft::expense(20.0, "Food", ""), noon(2));
        assert_eq!(first, 1);
        assert_eq!(second, 2);
    }

    #[test]
    fn deleted_ids_are_never_reused() {
        let mut ledger = Ledger::default();
        for day in 1..=3 {
            ledger.add_transaction(TransactionDraft::expense(10.0, "Food", ""), noon(day));
        }
        assert!(ledger.remove_transaction(3).is_some());
        let next = ledger.add_transaction(TransactionDraft::expense(5.0, "Food", ""), noon(4));
        assert_eq!(
            next, 4,
            "deleting the newest transaction must not recycle its id"
        );
    }

    #[test]
    fn next_id_reseeds_from_loaded_maximum() {
        let mut seeded = Ledger::default();
        seeded.add_transaction(TransactionDraft::income(100.0, "Salary", "Acme", ""), noon(1));
        seeded.add_transaction(TransactionDraft::expense(10.0, "Food", ""), noon(2));
        let reloaded = Ledger::new(seeded.transactions.clone(), BTreeMap::new());
        let mut reloaded = reloaded;
        let id = reloaded.add_transaction(TransactionDraft::expense(1.0, "Food", ""), noon(3));
        assert_eq!(id, 3);
    }

    #[test]
    fn remove_transaction_is_idempotent() {
        let mut ledger = Ledger::default();
        ledger.add_transaction(TransactionDraft::expense(10.0, "Food", ""), noon(1));
        assert!(ledger.remove_transaction(1).is_some());
        assert!(ledger.remove_transaction(1).is_none());
        assert!(ledger.remove_transaction(99).is_none());
    }

    #[test]
    fn budgets_overwrite_per_category() {
        let mut ledger = Ledger::default();
        ledger.set_budget("Food", 100.0);
        ledger.set_budget("Food", 250.0);
        assert_eq!(ledger.budgets.get("Food"), Some(&250.0));
        assert_eq!(ledger.remove_budget("Food"), Some(250.0));
        assert_eq!(ledger.remove_budget("Food"), None);
    }
}

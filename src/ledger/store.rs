use chrono::{Local, NaiveDateTime};

use crate::errors::LedgerError;
use crate::storage::StorageBackend;

use super::ledger::Ledger;
use super::transaction::{Transaction, TransactionDraft};

/// Owns the session ledger and a persistence backend, flushing the mutated
/// document after every successful mutation.
///
/// A flush failure surfaces as an `Err`, but the in-memory mutation is kept:
/// memory stays the source of truth for the rest of the session and the next
/// mutation's flush retries the write implicitly.
pub struct LedgerStore {
    ledger: Ledger,
    storage: Box<dyn StorageBackend>,
}

impl LedgerStore {
    /// Loads both store documents, returning the store plus any recovery
    /// warnings for the shell to surface.
    pub fn open(storage: Box<dyn StorageBackend>) -> (Self, Vec<String>) {
        let mut warnings = Vec::new();
        let transactions = storage.load_transactions();
        if let Some(warning) = transactions.warning {
            warnings.push(warning);
        }
        let budgets = storage.load_budgets();
        if let Some(warning) = budgets.warning {
            warnings.push(warning);
        }
        let ledger = Ledger::new(transactions.value, budgets.value);
        (Self { ledger, storage }, warnings)
    }

    pub fn ledger(&self) -> &Ledger {
        &self.ledger
    }

    pub fn transactions(&self) -> &[Transaction] {
        &self.ledger.transactions
    }

    pub fn budgets(&self) -> &std::collections::BTreeMap<String, f64> {
        &self.ledger.budgets
    }

    /// Records an income transaction stamped with the current local time.
    pub fn add_income(
        &mut self,
        amount: f64,
        category: impl Into<String>,
        source: impl Into<String>,
        description: impl Into<String>,
    ) -> Result<Transaction, LedgerError> {
        self.add(TransactionDraft::income(
            amount,
            category,
            source,
            description,
        ))
    }

    /// Records an expense transaction stamped with the current local time.
    pub fn add_expense(
        &mut self,
        amount: f64,
        category: impl Into<String>,
        description: impl Into<String>,
    ) -> Result<Transaction, LedgerError> {
        self.add(TransactionDraft::expense(amount, category, description))
    }

    fn add(&mut self, draft: TransactionDraft) -> Result<Transaction, LedgerError> {
        self.add_at(draft, Local::now().naive_local())
    }

    /// Adds with an explicit timestamp. Callers must pre-validate amounts;
    /// a zero amount is rejected here as a guard against skipped validation.
    pub fn add_at(
        &mut self,
        draft: TransactionDraft,
        timestamp: NaiveDateTime,
    ) -> Result<Transaction, LedgerError> {
        if draft.amount == 0.0 {
            return Err(LedgerError::Invalid(
                "transaction amount must be nonzero".into(),
            ));
        }
        let id = self.ledger.add_transaction(draft, timestamp);
        let stored = self
            .ledger
            .transaction(id)
            .cloned()
            .ok_or_else(|| LedgerError::Invalid("freshly added transaction missing".into()))?;
        self.storage.save_transactions(&self.ledger.transactions)?;
        Ok(stored)
    }

    /// Deletes by id; `Ok(false)` when the id is absent (nothing flushed).
    pub fn delete_transaction(&mut self, id: u64) -> Result<bool, LedgerError> {
        if self.ledger.remove_transaction(id).is_none() {
            return Ok(false);
        }
        self.storage.save_transactions(&self.ledger.transactions)?;
        Ok(true)
    }

    /// Sets the monthly budget for a category; the limit must be strictly
    /// positive.
    pub fn set_budget(&mut self, category: impl Into<String>, amount: f64) -> Result<(), LedgerError> {
        if amount <= 0.0 {
            return Err(LedgerError::Invalid(
                "budget amount must be strictly positive".into(),
            ));
        }
        self.ledger.set_budget(category, amount);
        self.storage.save_budgets(&self.ledger.budgets)
    }

    /// Deletes a budget; `Ok(false)` when the category has none.
    pub fn delete_budget(&mut self, category: &str) -> Result<bool, LedgerError> {
        if self.ledger.remove_budget(category).is_none() {
            return Ok(false);
        }
        self.storage.save_budgets(&self.ledger.budgets)?;
        Ok(true)
    }
}

//! Predicate-based selection over the transaction list. Timestamps are
//! parsed once at the boundary; every predicate compares the normalized
//! `NaiveDateTime` representation, never re-parsed strings.

use chrono::{Datelike, Days, NaiveDateTime};

use super::transaction::{Transaction, TransactionKind};

/// Composable transaction predicates. An empty filter selects everything.
#[derive(Debug, Clone, Default)]
pub struct TransactionFilter {
    kind: Option<TransactionKind>,
    category: Option<String>,
    amount_range: Option<(f64, f64)>,
    date_range: Option<(NaiveDateTime, NaiveDateTime)>,
    month: Option<(i32, u32)>,
    keyword: Option<String>,
}

impl TransactionFilter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_kind(mut self, kind: TransactionKind) -> Self {
        self.kind = Some(kind);
        self
    }

    /// Exact category match, case-insensitively.
    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into().to_lowercase());
        self
    }

    /// Inclusive amount range; reversed endpoints are swapped rather than
    /// producing an empty result.
    pub fn with_amount_range(mut self, min: f64, max: f64) -> Self {
        self.amount_range = Some(if min > max { (max, min) } else { (min, max) });
        self
    }

    /// Inclusive timestamp range, compared at full precision.
    pub fn with_date_range(mut self, start: NaiveDateTime, end: NaiveDateTime) -> Self {
        self.date_range = Some((start, end));
        self
    }

    /// Case-insensitive substring match against the description.
    pub fn with_keyword(mut self, keyword: impl Into<String>) -> Self {
        self.keyword = Some(keyword.into().to_lowercase());
        self
    }

    /// Restricts to a calendar month.
    pub fn with_month(mut self, year: i32, month: u32) -> Self {
        self.month = Some((year, month));
        self
    }

    pub fn matches(&self, txn: &Transaction) -> bool {
        if let Some(kind) = self.kind {
            if txn.kind != kind {
                return false;
            }
        }
        if let Some(category) = &self.category {
            if txn.category.to_lowercase() != *category {
                return false;
            }
        }
        if let Some((min, max)) = self.amount_range {
            if txn.amount < min || txn.amount > max {
                return false;
            }
        }
        if let Some((start, end)) = self.date_range {
            if txn.timestamp < start || txn.timestamp > end {
                return false;
            }
        }
        if let Some((year, month)) = self.month {
            if txn.timestamp.year() != year || txn.timestamp.month() != month {
                return false;
            }
        }
        if let Some(keyword) = &self.keyword {
            if !txn.description.to_lowercase().contains(keyword) {
                return false;
            }
        }
        true
    }

    /// Selects matching transactions, preserving input order.
    pub fn apply<'a>(&self, transactions: &'a [Transaction]) -> Vec<&'a Transaction> {
        transactions.iter().filter(|txn| self.matches(txn)).collect()
    }
}

/// Sorts newest first; the ordering every history and search view uses.
pub fn sort_newest_first(transactions: &mut [&Transaction]) {
    transactions.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
}

/// The `limit` most recent transactions, newest first.
pub fn recent(transactions: &[Transaction], limit: usize) -> Vec<&Transaction> {
    let mut all: Vec<&Transaction> = transactions.iter().collect();
    sort_newest_first(&mut all);
    all.truncate(limit);
    all
}

/// Start of the "last 30 days" window: today at 00:00:00 minus 30 days.
/// Day-aligned on purpose, not a rolling window from the current instant.
pub fn last_30_days_start(today: NaiveDateTime) -> NaiveDateTime {
    let midnight = today.date().and_hms_opt(0, 0, 0).unwrap_or(today);
    midnight
        .checked_sub_days(Days::new(30))
        .unwrap_or(midnight)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ledger::transaction::TransactionDraft;
    use crate::ledger::Ledger;
    use chrono::NaiveDate;

    fn at(month: u32, day: u32, hour: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2025, month, day)
            .unwrap()
            .and_hms_opt(hour, 0, 0)
            .unwrap()
    }

    fn sample_ledger() -> Ledger {
        let mut ledger = Ledger::default();
        ledger.add_transaction(
            TransactionDraft::income(2000.0, "Salary", "Acme", "monthly payday"),
            at(5, 1, 9),
        );
        ledger.add_transaction(
            TransactionDraft::expense(150.0, "Food", "weekly groceries"),
            at(5, 3, 18),
        );
        ledger.add_transaction(
            TransactionDraft::expense(-20.0, "Food", "grocery refund"),
            at(5, 10, 12),
        );
        ledger.add_transaction(
            TransactionDraft::expense(60.0, "Bills", "electricity"),
            at(4, 28, 8),
        );
        ledger
    }

    #[test]
    fn empty_filter_selects_everything_in_order() {
        let ledger = sample_ledger();
        let all = TransactionFilter::new().apply(&ledger.transactions);
        assert_eq!(all.len(), 4);
        assert!(all
            .iter()
            .zip(&ledger.transactions)
            .all(|(selected, original)| selected.id == original.id));
    }

    #[test]
    fn filters_are_idempotent() {
        let ledger = sample_ledger();
        let filter = TransactionFilter::new()
            .with_kind(TransactionKind::Expense)
            .with_category("food");
        let once = filter.apply(&ledger.transactions);
        let ids: Vec<u64> = once.iter().map(|t| t.id).collect();

        let owned: Vec<Transaction> = once.into_iter().cloned().collect();
        let twice = filter.apply(&owned);
        let ids_again: Vec<u64> = twice.iter().map(|t| t.id).collect();
        assert_eq!(ids, ids_again);
    }

    #[test]
    fn category_match_is_case_insensitive_and_exact() {
        let ledger = sample_ledger();
        let hits = TransactionFilter::new()
            .with_category("FOOD")
            .apply(&ledger.transactions);
        assert_eq!(hits.len(), 2);
        let none = TransactionFilter::new()
            .with_category("Foo")
            .apply(&ledger.transactions);
        assert!(none.is_empty(), "substring categories must not match");
    }

    #[test]
    fn reversed_amount_range_is_swapped() {
        let ledger = sample_ledger();
        let hits = TransactionFilter::new()
            .with_amount_range(200.0, -30.0)
            .apply(&ledger.transactions);
        let ids: Vec<u64> = hits.iter().map(|t| t.id).collect();
        assert_eq!(ids, vec![2, 3, 4]);
    }

    #[test]
    fn date_range_is_inclusive_at_full_precision() {
        let ledger = sample_ledger();
        let hits = TransactionFilter::new()
            .with_date_range(at(5, 1, 9), at(5, 3, 18))
            .apply(&ledger.transactions);
        assert_eq!(hits.len(), 2, "both endpoint timestamps are included");
    }

    #[test]
    fn keyword_search_is_case_insensitive_substring() {
        let ledger = sample_ledger();
        let hits = TransactionFilter::new()
            .with_keyword("GROCER")
            .apply(&ledger.transactions);
        assert_eq!(hits.len(), 2);
    }

    #[test]
    fn month_filter_anchors_to_the_calendar_month() {
        let ledger = sample_ledger();
        let hits = TransactionFilter::new()
            .with_month(2025, 4)
            .apply(&ledger.transactions);
        let ids: Vec<u64> = hits.iter().map(|t| t.id).collect();
        assert_eq!(ids, vec![4]);
    }

    #[test]
    fn history_orders_newest_first_and_recent_caps_the_list() {
        let ledger = sample_ledger();
        let mut all: Vec<&Transaction> = ledger.transactions.iter().collect();
        sort_newest_first(&mut all);
        let stamps: Vec<NaiveDateTime> = all.iter().map(|t| t.timestamp).collect();
        assert!(stamps.windows(2).all(|w| w[0] >= w[1]));

        let top = recent(&ledger.transactions, 2);
        assert_eq!(top.len(), 2);
        assert_eq!(top[0].id, 3);
        assert_eq!(top[1].id, 2);
    }

    #[test]
    fn last_30_days_window_is_day_aligned() {
        let now = at(5, 31, 14);
        let start = last_30_days_start(now);
        assert_eq!(
            start,
            NaiveDate::from_ymd_opt(2025, 5, 1)
                .unwrap()
                .and_hms_opt(0, 0, 0)
                .unwrap(),
            "the boundary anchors to midnight, not the current instant"
        );
    }
}

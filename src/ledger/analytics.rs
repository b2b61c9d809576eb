//! Pure aggregation over the transaction list. Nothing here mutates state or
//! performs I/O; callers pass the reference date so every figure is
//! reproducible in tests.

use chrono::Datelike;

use super::transaction::{Transaction, TransactionKind};

/// Signed income and expense sums for some slice of the ledger.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Totals {
    pub income: f64,
    pub expenses: f64,
}

impl Totals {
    pub fn net(&self) -> f64 {
        self.income - self.expenses
    }
}

/// Per-group signed sums plus the overall total, for percentage rendering.
#[derive(Debug, Clone, Default)]
pub struct Breakdown {
    pub entries: Vec<(String, f64)>,
    pub total: f64,
}

/// Income and expense sums for one calendar month.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MonthlyFlow {
    pub year: i32,
    pub month: u32,
    pub income: f64,
    pub expenses: f64,
}

impl MonthlyFlow {
    pub fn balance(&self) -> f64 {
        self.income - self.expenses
    }
}

/// Budget consumption severity. `budget_status` is the single tiering policy
/// shared by the add-expense alert, the budget summary, and the
/// budget-vs-actual view.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BudgetTier {
    Good,
    Warning,
    Exceeded,
}

/// Budget-vs-spend comparison for one category in one calendar month.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BudgetStatus {
    pub budget: f64,
    pub spent: f64,
    pub remaining: f64,
    pub percentage: f64,
    pub tier: BudgetTier,
}

/// Signed sums across the whole ledger.
pub fn totals(transactions: &[Transaction]) -> Totals {
    sum_flows(transactions.iter())
}

/// Signed sums restricted to one calendar month (local wall clock).
pub fn period_totals(transactions: &[Transaction], year: i32, month: u32) -> Totals {
    sum_flows(
        transactions
            .iter()
            .filter(|txn| txn.timestamp.year() == year && txn.timestamp.month() == month),
    )
}

fn sum_flows<'a>(transactions: impl Iterator<Item = &'a Transaction>) -> Totals {
    let mut totals = Totals::default();
    for txn in transactions {
        match txn.kind {
            TransactionKind::Income => totals.income += txn.amount,
            TransactionKind::Expense => totals.expenses += txn.amount,
        }
    }
    totals
}

/// Sum of expenses in `category` (exact match) for the given month. Negative
/// entries (refunds) reduce the sum.
pub fn monthly_expenses_by_category(
    transactions: &[Transaction],
    category: &str,
    year: i32,
    month: u32,
) -> f64 {
    transactions
        .iter()
        .filter(|txn| {
            txn.kind == TransactionKind::Expense
                && txn.category == category
                && txn.timestamp.year() == year
                && txn.timestamp.month() == month
        })
        .map(|txn| txn.amount)
        .sum()
}

/// Groups transactions of `kind` by category, summing amounts per group.
/// Entries come back sorted by sum descending; ties keep first-occurrence
/// order (the sort is stable).
pub fn category_breakdown(transactions: &[Transaction], kind: TransactionKind) -> Breakdown {
    grouped_breakdown(
        transactions.iter().filter(|txn| txn.kind == kind),
        |txn| txn.category.clone(),
    )
}

/// Groups income transactions by source; an absent or empty source falls into
/// the `Unknown` bucket.
pub fn source_breakdown(transactions: &[Transaction]) -> Breakdown {
    grouped_breakdown(
        transactions
            .iter()
            .filter(|txn| txn.kind == TransactionKind::Income),
        |txn| txn.source_label().to_string(),
    )
}

fn grouped_breakdown<'a>(
    transactions: impl Iterator<Item = &'a Transaction>,
    key: impl Fn(&Transaction) -> String,
) -> Breakdown {
    let mut entries: Vec<(String, f64)> = Vec::new();
    let mut total = 0.0;
    for txn in transactions {
        total += txn.amount;
        let group = key(txn);
        match entries.iter_mut().find(|(name, _)| *name == group) {
            Some((_, sum)) => *sum += txn.amount,
            None => entries.push((group, txn.amount)),
        }
    }
    entries.sort_by(|a, b| b.1.total_cmp(&a.1));
    Breakdown { entries, total }
}

/// Income/expense sums grouped by `(year, month)`, ascending, keeping only
/// the most recent `limit` months present in the data. Months without
/// activity are absent rather than zero-filled.
pub fn monthly_trend(transactions: &[Transaction], limit: usize) -> Vec<MonthlyFlow> {
    use std::collections::BTreeMap;

    let mut months: BTreeMap<(i32, u32), Totals> = BTreeMap::new();
    for txn in transactions {
        let entry = months
            .entry((txn.timestamp.year(), txn.timestamp.month()))
            .or_default();
        match txn.kind {
            TransactionKind::Income => entry.income += txn.amount,
            TransactionKind::Expense => entry.expenses += txn.amount,
        }
    }

    let skip = months.len().saturating_sub(limit);
    months
        .into_iter()
        .skip(skip)
        .map(|((year, month), totals)| MonthlyFlow {
            year,
            month,
            income: totals.income,
            expenses: totals.expenses,
        })
        .collect()
}

/// Compares `budget` against the month's spend in `category`.
///
/// `percentage` is `spent / budget * 100`, defined as `0` when the budget is
/// zero. Tiers: `Exceeded` at or above 100%, `Warning` from 80% up to but not
/// including 100%, `Good` below 80%.
pub fn budget_status(
    transactions: &[Transaction],
    category: &str,
    budget: f64,
    year: i32,
    month: u32,
) -> BudgetStatus {
    let spent = monthly_expenses_by_category(transactions, category, year, month);
    let percentage = if budget == 0.0 {
        0.0
    } else {
        spent / budget * 100.0
    };
    let tier = if percentage >= 100.0 {
        BudgetTier::Exceeded
    } else if percentage >= 80.0 {
        BudgetTier::Warning
    } else {
        BudgetTier::Good
    };
    BudgetStatus {
        budget,
        spent,
        remaining: budget - spent,
        percentage,
        tier,
    }
}

/// Share of the month's income left over as balance, as a percentage.
/// Zero when the month had no positive income.
pub fn savings_rate(income: f64, balance: f64) -> f64 {
    if income > 0.0 {
        balance / income * 100.0
    } else {
        0.0
    }
}

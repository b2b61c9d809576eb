use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Suggested categories offered when recording an income transaction.
pub const INCOME_CATEGORIES: &[&str] =
    &["Salary", "Freelance", "Investment", "Gift", "Refund", "Other"];

/// Suggested categories offered when recording an expense transaction.
pub const EXPENSE_CATEGORIES: &[&str] = &[
    "Food",
    "Transportation",
    "Entertainment",
    "Shopping",
    "Bills",
    "Healthcare",
    "Education",
    "Refund",
    "Other",
];

/// A single recorded income or expense event.
///
/// `amount` is signed: a negative income is a correction/clawback, a negative
/// expense is a refund/adjustment. The sign flows straight into aggregation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    pub id: u64,
    pub amount: f64,
    #[serde(rename = "type")]
    pub kind: TransactionKind,
    pub category: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
    #[serde(default)]
    pub description: String,
    #[serde(rename = "date")]
    pub timestamp: NaiveDateTime,
}

impl Transaction {
    /// Source label used for grouping, substituting `Unknown` when absent.
    pub fn source_label(&self) -> &str {
        match self.source.as_deref() {
            Some(source) if !source.is_empty() => source,
            _ => "Unknown",
        }
    }
}

/// Discriminates the two transaction kinds; immutable once created.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionKind {
    Income,
    Expense,
}

impl TransactionKind {
    pub fn suggested_categories(self) -> &'static [&'static str] {
        match self {
            TransactionKind::Income => INCOME_CATEGORIES,
            TransactionKind::Expense => EXPENSE_CATEGORIES,
        }
    }
}

impl fmt::Display for TransactionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TransactionKind::Income => write!(f, "income"),
            TransactionKind::Expense => write!(f, "expense"),
        }
    }
}

/// Caller-supplied fields for a new transaction; the ledger assigns the rest.
#[derive(Debug, Clone)]
pub struct TransactionDraft {
    pub amount: f64,
    pub kind: TransactionKind,
    pub category: String,
    pub source: Option<String>,
    pub description: String,
}

impl TransactionDraft {
    pub fn income(
        amount: f64,
        category: impl Into<String>,
        source: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        Self {
            amount,
            kind: TransactionKind::Income,
            category: category.into(),
            source: Some(source.into()),
            description: description.into(),
        }
    }

    pub fn expense(
        amount: f64,
        category: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        Self {
            amount,
            kind: TransactionKind::Expense,
            category: category.into(),
            source: None,
            description: description.into(),
        }
    }
}

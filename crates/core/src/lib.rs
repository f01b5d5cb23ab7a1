//! Moneybook Core - Domain entities, services, and traits.
//!
//! This crate contains the balance-consistency engine of Moneybook: ledger
//! movements, the effects they have on account balances, and the coordinator
//! that keeps the cached balances in step with the ledger.
//! It is database-agnostic and defines traits that are implemented
//! by the `storage-sqlite` crate.

pub mod accounts;
pub mod balances;
pub mod constants;
pub mod errors;
pub mod ledger;
pub mod movements;
pub mod settings;
pub mod utils;

// Re-export error types
pub use errors::Error;
pub use errors::ErrorKind;
pub use errors::Result;

//! Ledger module - the transaction coordinator that keeps cached balances in
//! step with ledger movements.

mod ledger_model;
mod ledger_service;
mod ledger_traits;

#[cfg(test)]
mod ledger_service_tests;

pub use ledger_model::{LedgerOperationKind, OperationState};
pub use ledger_service::LedgerService;
pub use ledger_traits::{LedgerScope, LedgerServiceTrait, LedgerTransactionExecutor};

//! Balances module - the cached per-account, per-currency projection of the ledger.

mod balances_model;
mod balances_traits;

pub use balances_model::{AccountBalance, BalanceDelta, BalanceDiscrepancy};
pub use balances_traits::{BalanceRepositoryTrait, BalanceStore};

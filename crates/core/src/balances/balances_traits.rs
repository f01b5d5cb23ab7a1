//! Balance store and repository traits.

use super::balances_model::{AccountBalance, BalanceDelta};
use crate::errors::Result;

/// Mutable balance store, available only inside a ledger scope.
///
/// All calls made within one scope commit or roll back together.
pub trait BalanceStore {
    /// Adds `delta.amount` to the balance of (account, currency), creating a
    /// zero entry first if none exists.
    ///
    /// Fails with [`crate::Error::AccountNotFound`] if the account does not exist.
    fn apply_delta(&mut self, delta: &BalanceDelta) -> Result<()>;
}

/// Read-only access to committed balances.
pub trait BalanceRepositoryTrait: Send + Sync {
    /// Returns `None` when the account never held the currency.
    fn get_balance(&self, account_id: &str, currency: &str) -> Result<Option<AccountBalance>>;

    /// All currency balances of one account, ordered by currency.
    fn get_account_balances(&self, account_id: &str) -> Result<Vec<AccountBalance>>;

    /// Every stored balance, ordered by account and currency.
    fn get_all_balances(&self) -> Result<Vec<AccountBalance>>;
}

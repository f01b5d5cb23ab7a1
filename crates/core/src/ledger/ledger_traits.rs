//! Ledger coordinator traits.

use async_trait::async_trait;
use rust_decimal::Decimal;

use crate::accounts::AccountResolver;
use crate::balances::{AccountBalance, BalanceDiscrepancy, BalanceStore};
use crate::errors::Result;
use crate::movements::{Movement, MovementStore, NewMovement};

/// Everything a ledger operation may touch while its transaction is open.
pub trait LedgerScope: AccountResolver + BalanceStore + MovementStore {}

impl<T: AccountResolver + BalanceStore + MovementStore + ?Sized> LedgerScope for T {}

/// Runs a job inside one atomic persistence scope.
///
/// The scope commits when the job returns `Ok` and rolls back every change
/// made through it when the job returns `Err`. Jobs are serialized: no two
/// jobs observe each other's uncommitted state.
#[async_trait]
pub trait LedgerTransactionExecutor: Send + Sync {
    async fn execute<F, T>(&self, job: F) -> Result<T>
    where
        F: FnOnce(&mut dyn LedgerScope) -> Result<T> + Send + 'static,
        T: Send + 'static;
}

/// Operations exposed by the ledger.
#[async_trait]
pub trait LedgerServiceTrait: Send + Sync {
    /// Records a new movement and applies its effects.
    async fn insert_movement(&self, new_movement: NewMovement) -> Result<Movement>;

    /// Replaces a stored movement, reversing its old effects and applying the new ones.
    async fn update_movement(&self, movement_id: &str, new_movement: NewMovement)
        -> Result<Movement>;

    /// Removes a movement and reverses its effects.
    async fn delete_movement(&self, movement_id: &str) -> Result<()>;

    /// Balance of `currency` in the account; zero if it never held it.
    fn get_account_balance(&self, account_id: &str, currency: &str) -> Result<Decimal>;

    fn get_account_balances(&self, account_id: &str) -> Result<Vec<AccountBalance>>;

    fn get_movement(&self, movement_id: &str) -> Result<Movement>;

    fn list_movements(&self, account_id: Option<&str>) -> Result<Vec<Movement>>;

    /// Compares cached balances with the sum of all movement effects.
    fn reconcile_balances(&self) -> Result<Vec<BalanceDiscrepancy>>;

    fn base_currency(&self) -> &str;
}

//! Account repository and service traits.
//!
//! These traits define the contract for account operations without any
//! database-specific types, allowing for different storage implementations.

use async_trait::async_trait;

use super::accounts_model::{Account, NewAccount};
use crate::errors::Result;

/// Resolves account references from inside a ledger scope.
///
/// Implementations fail with [`crate::Error::AccountNotFound`] when the id does
/// not name an existing account.
pub trait AccountResolver {
    fn resolve_account(&mut self, account_id: &str) -> Result<Account>;
}

/// Trait defining the contract for Account repository operations.
///
/// Implementations of this trait handle the persistence of account data.
#[async_trait]
pub trait AccountRepositoryTrait: Send + Sync {
    /// Creates a new account.
    async fn create(&self, new_account: NewAccount) -> Result<Account>;

    /// Deletes an account by its ID.
    ///
    /// Returns the number of deleted records.
    async fn delete(&self, account_id: &str) -> Result<usize>;

    /// Retrieves an account by its ID.
    fn get_by_id(&self, account_id: &str) -> Result<Account>;

    /// Lists accounts with an optional active-status filter.
    fn list(&self, is_active_filter: Option<bool>) -> Result<Vec<Account>>;
}

/// Trait defining the contract for Account service operations.
#[async_trait]
pub trait AccountServiceTrait: Send + Sync {
    /// Creates a new account with business validation.
    async fn create_account(&self, new_account: NewAccount) -> Result<Account>;

    /// Deletes an account. Accounts still referenced by movements are kept.
    async fn delete_account(&self, account_id: &str) -> Result<()>;

    /// Retrieves an account by ID.
    fn get_account(&self, account_id: &str) -> Result<Account>;

    /// Lists accounts with an optional active-status filter.
    fn list_accounts(&self, is_active_filter: Option<bool>) -> Result<Vec<Account>>;
}

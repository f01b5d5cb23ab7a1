use log::debug;
use std::sync::Arc;

use super::accounts_model::{Account, NewAccount};
use super::accounts_traits::{AccountRepositoryTrait, AccountServiceTrait};
use crate::errors::Result;

/// Service for managing accounts
pub struct AccountService {
    repository: Arc<dyn AccountRepositoryTrait>,
}

impl AccountService {
    /// Creates a new AccountService instance
    pub fn new(repository: Arc<dyn AccountRepositoryTrait>) -> Self {
        Self { repository }
    }
}

#[async_trait::async_trait]
impl AccountServiceTrait for AccountService {
    async fn create_account(&self, new_account: NewAccount) -> Result<Account> {
        let new_account = new_account.normalized();
        new_account.validate()?;
        debug!(
            "Creating account '{}' ({}, {})",
            new_account.name, new_account.account_type, new_account.currency
        );
        self.repository.create(new_account).await
    }

    async fn delete_account(&self, account_id: &str) -> Result<()> {
        // Resolve first so a missing id is reported as such rather than as a no-op.
        self.repository.get_by_id(account_id)?;
        self.repository.delete(account_id).await?;
        Ok(())
    }

    fn get_account(&self, account_id: &str) -> Result<Account> {
        self.repository.get_by_id(account_id)
    }

    fn list_accounts(&self, is_active_filter: Option<bool>) -> Result<Vec<Account>> {
        self.repository.list(is_active_filter)
    }
}

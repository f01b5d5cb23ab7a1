use async_trait::async_trait;
use diesel::prelude::*;
use log::debug;
use std::sync::Arc;

use super::model::AccountDB;
use crate::db::{get_connection, DbPool, WriteHandle};
use crate::errors::IntoCore;
use crate::schema::accounts;
use crate::schema::accounts::dsl::*;
use moneybook_core::accounts::{Account, AccountRepositoryTrait, NewAccount};
use moneybook_core::errors::{Error, Result};

/// Loads an account on `conn`, mapping a missing row to `AccountNotFound`.
pub(crate) fn find_account(conn: &mut SqliteConnection, account_id: &str) -> Result<Account> {
    accounts
        .select(AccountDB::as_select())
        .find(account_id)
        .first::<AccountDB>(conn)
        .optional()
        .into_core()?
        .map(Account::from)
        .ok_or_else(|| Error::AccountNotFound(account_id.to_string()))
}

/// Repository for managing account data in the database
pub struct AccountRepository {
    pool: Arc<DbPool>,
    writer: WriteHandle,
}

impl AccountRepository {
    pub fn new(pool: Arc<DbPool>, writer: WriteHandle) -> Self {
        Self { pool, writer }
    }
}

#[async_trait]
impl AccountRepositoryTrait for AccountRepository {
    async fn create(&self, new_account: NewAccount) -> Result<Account> {
        let account_db: AccountDB = new_account.into();
        debug!("Inserting account {}", account_db.id);

        self.writer
            .exec(move |conn| {
                diesel::insert_into(accounts::table)
                    .values(&account_db)
                    .execute(conn)
                    .into_core()?;
                Ok(account_db.into())
            })
            .await
    }

    async fn delete(&self, account_id: &str) -> Result<usize> {
        let id_to_delete = account_id.to_string();
        self.writer
            .exec(move |conn| {
                diesel::delete(accounts.find(id_to_delete))
                    .execute(conn)
                    .into_core()
            })
            .await
    }

    fn get_by_id(&self, account_id: &str) -> Result<Account> {
        let mut conn = get_connection(&self.pool)?;
        find_account(&mut conn, account_id)
    }

    fn list(&self, is_active_filter: Option<bool>) -> Result<Vec<Account>> {
        let mut conn = get_connection(&self.pool)?;

        let mut query = accounts::table.into_boxed();
        if let Some(active) = is_active_filter {
            query = query.filter(is_active.eq(active));
        }

        let results = query
            .select(AccountDB::as_select())
            .order((is_active.desc(), name.asc()))
            .load::<AccountDB>(&mut conn)
            .into_core()?;

        Ok(results.into_iter().map(Account::from).collect())
    }
}

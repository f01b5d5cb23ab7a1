use diesel::prelude::*;
use diesel::upsert::excluded;
use log::debug;
use rust_decimal::Decimal;
use std::sync::Arc;

use super::model::AccountBalanceDB;
use crate::db::{get_connection, DbPool};
use crate::errors::IntoCore;
use crate::schema::account_balances;
use crate::schema::account_balances::dsl::*;
use moneybook_core::balances::{AccountBalance, BalanceDelta, BalanceRepositoryTrait};
use moneybook_core::errors::{Error, Result};
use moneybook_core::utils::decimal_utils::parse_decimal;

/// Current cached balance of (account, currency) on `conn`; zero when absent.
fn read_balance(
    conn: &mut SqliteConnection,
    for_account: &str,
    for_currency: &str,
) -> Result<Decimal> {
    let stored = account_balances
        .filter(account_id.eq(for_account))
        .filter(currency.eq(for_currency))
        .select(amount)
        .first::<String>(conn)
        .optional()
        .into_core()?;

    match stored {
        Some(value) => parse_decimal(&value, "balance"),
        None => Ok(Decimal::ZERO),
    }
}

/// Adds the delta to the stored balance, creating the row on first use.
///
/// The caller is responsible for the surrounding transaction.
pub(crate) fn apply_delta(conn: &mut SqliteConnection, delta: &BalanceDelta) -> Result<()> {
    let current = read_balance(conn, &delta.account_id, &delta.currency)?;
    let updated = current.checked_add(delta.amount).ok_or_else(|| {
        Error::ArithmeticOverflow(format!(
            "balance of {}/{} would overflow",
            delta.account_id, delta.currency
        ))
    })?;
    let row = AccountBalanceDB {
        account_id: delta.account_id.clone(),
        currency: delta.currency.clone(),
        amount: updated.normalize().to_string(),
        updated_at: chrono::Utc::now().naive_utc(),
    };

    diesel::insert_into(account_balances::table)
        .values(&row)
        .on_conflict((account_id, currency))
        .do_update()
        .set((amount.eq(excluded(amount)), updated_at.eq(excluded(updated_at))))
        .execute(conn)
        .into_core()?;

    debug!(
        "Balance {}/{}: {} -> {}",
        delta.account_id, delta.currency, current, updated
    );
    Ok(())
}

/// Read-only access to committed balances.
pub struct BalanceRepository {
    pool: Arc<DbPool>,
}

impl BalanceRepository {
    pub fn new(pool: Arc<DbPool>) -> Self {
        Self { pool }
    }

    fn load(rows: Vec<AccountBalanceDB>) -> Result<Vec<AccountBalance>> {
        rows.into_iter().map(AccountBalance::try_from).collect()
    }
}

impl BalanceRepositoryTrait for BalanceRepository {
    fn get_balance(&self, for_account: &str, for_currency: &str) -> Result<Option<AccountBalance>> {
        let mut conn = get_connection(&self.pool)?;
        account_balances
            .filter(account_id.eq(for_account))
            .filter(currency.eq(for_currency))
            .select(AccountBalanceDB::as_select())
            .first::<AccountBalanceDB>(&mut conn)
            .optional()
            .into_core()?
            .map(AccountBalance::try_from)
            .transpose()
    }

    fn get_account_balances(&self, for_account: &str) -> Result<Vec<AccountBalance>> {
        let mut conn = get_connection(&self.pool)?;
        let rows = account_balances
            .filter(account_id.eq(for_account))
            .select(AccountBalanceDB::as_select())
            .order(currency.asc())
            .load::<AccountBalanceDB>(&mut conn)
            .into_core()?;
        Self::load(rows)
    }

    fn get_all_balances(&self) -> Result<Vec<AccountBalance>> {
        let mut conn = get_connection(&self.pool)?;
        let rows = account_balances
            .select(AccountBalanceDB::as_select())
            .order((account_id.asc(), currency.asc()))
            .load::<AccountBalanceDB>(&mut conn)
            .into_core()?;
        Self::load(rows)
    }
}

//! Database model for account balances.

use chrono::NaiveDateTime;
use diesel::prelude::*;

use moneybook_core::balances::AccountBalance;
use moneybook_core::errors::Error;
use moneybook_core::utils::decimal_utils::parse_decimal;

/// One cached (account, currency) balance. The amount is a decimal string.
#[derive(Queryable, Insertable, Selectable, PartialEq, Debug, Clone)]
#[diesel(table_name = crate::schema::account_balances)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct AccountBalanceDB {
    pub account_id: String,
    pub currency: String,
    pub amount: String,
    pub updated_at: NaiveDateTime,
}

impl TryFrom<AccountBalanceDB> for AccountBalance {
    type Error = Error;

    fn try_from(db: AccountBalanceDB) -> Result<Self, Self::Error> {
        Ok(Self {
            amount: parse_decimal(&db.amount, "balance")?,
            account_id: db.account_id,
            currency: db.currency,
            updated_at: db.updated_at,
        })
    }
}

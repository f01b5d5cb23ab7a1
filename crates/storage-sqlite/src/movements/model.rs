//! Database model for movements.
//!
//! All three movement types share one table; the columns a type does not use
//! are NULL. Decimal values are stored as strings.

use chrono::{NaiveDate, NaiveDateTime};
use diesel::prelude::*;
use rust_decimal::Decimal;
use std::str::FromStr;

use moneybook_core::constants::MOVEMENT_DATE_FORMAT;
use moneybook_core::errors::{Error, Result};
use moneybook_core::movements::{
    CashKind, CashMovement, ExchangeMovement, Movement, MovementDetails, MovementError,
    MovementKind, NewMovement, TradeKind, TradeMovement,
};
use moneybook_core::utils::decimal_utils::{parse_decimal, parse_optional_decimal};

#[derive(
    Queryable, Identifiable, Insertable, AsChangeset, Selectable, PartialEq, Debug, Clone,
)]
#[diesel(table_name = crate::schema::movements)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
#[diesel(treat_none_as_null = true)]
pub struct MovementDB {
    pub id: String,
    pub movement_type: String,
    /// Owning account
    pub account_id: String,
    pub movement_date: String,
    pub note: Option<String>,
    pub kind: Option<String>,
    pub currency: Option<String>,
    pub amount: Option<String>,
    pub fee: String,
    pub sell_currency: Option<String>,
    pub sell_amount: Option<String>,
    pub buy_currency: Option<String>,
    pub buy_amount: Option<String>,
    pub instrument_id: Option<String>,
    pub quantity: Option<String>,
    pub price: Option<String>,
    pub tax: Option<String>,
    pub pay_account_id: Option<String>,
    pub receive_account_id: Option<String>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

fn decimal_text(value: Decimal) -> String {
    value.normalize().to_string()
}

impl MovementDB {
    /// Flattens `new_movement` into a row stored under `id`.
    pub fn from_new(
        id: String,
        new_movement: NewMovement,
        created_at: NaiveDateTime,
        updated_at: NaiveDateTime,
    ) -> Self {
        let owner = new_movement
            .details
            .owner_account_id()
            .unwrap_or_default()
            .to_string();
        let mut row = Self {
            id,
            movement_type: new_movement.details.kind().as_str().to_string(),
            account_id: owner,
            movement_date: new_movement
                .movement_date
                .format(MOVEMENT_DATE_FORMAT)
                .to_string(),
            note: new_movement.note,
            kind: None,
            currency: None,
            amount: None,
            fee: String::new(),
            sell_currency: None,
            sell_amount: None,
            buy_currency: None,
            buy_amount: None,
            instrument_id: None,
            quantity: None,
            price: None,
            tax: None,
            pay_account_id: None,
            receive_account_id: None,
            created_at,
            updated_at,
        };

        match new_movement.details {
            MovementDetails::Exchange(exchange) => {
                row.sell_currency = Some(exchange.sell_currency);
                row.sell_amount = Some(decimal_text(exchange.sell_amount));
                row.buy_currency = Some(exchange.buy_currency);
                row.buy_amount = Some(decimal_text(exchange.buy_amount));
                row.fee = decimal_text(exchange.fee);
            }
            MovementDetails::Trade(trade) => {
                row.kind = Some(trade.kind.as_str().to_string());
                row.instrument_id = Some(trade.instrument_id);
                row.quantity = Some(decimal_text(trade.quantity));
                row.price = Some(decimal_text(trade.price));
                row.tax = Some(decimal_text(trade.tax));
                row.currency = Some(trade.currency);
                row.fee = decimal_text(trade.fee);
            }
            MovementDetails::Cash(cash) => {
                row.kind = Some(cash.kind.as_str().to_string());
                row.currency = Some(cash.currency);
                row.amount = Some(decimal_text(cash.amount));
                row.pay_account_id = cash.pay_account_id;
                row.receive_account_id = cash.receive_account_id;
                row.fee = decimal_text(cash.fee);
            }
        }
        row
    }

    fn missing(&self, column: &str) -> Error {
        MovementError::InvalidData(format!(
            "movement {} ({}) has no {}",
            self.id, self.movement_type, column
        ))
        .into()
    }

    fn text(&self, value: &Option<String>, column: &str) -> Result<String> {
        value.clone().ok_or_else(|| self.missing(column))
    }

    fn decimal(&self, value: &Option<String>, column: &str) -> Result<Decimal> {
        parse_optional_decimal(value.as_deref(), column)?.ok_or_else(|| self.missing(column))
    }
}

impl TryFrom<MovementDB> for Movement {
    type Error = Error;

    fn try_from(db: MovementDB) -> std::result::Result<Self, Self::Error> {
        let movement_kind = MovementKind::from_str(&db.movement_type)?;
        let fee = parse_decimal(&db.fee, "fee")?;

        let details = match movement_kind {
            MovementKind::Exchange => MovementDetails::Exchange(ExchangeMovement {
                account_id: db.account_id.clone(),
                sell_currency: db.text(&db.sell_currency, "sell_currency")?,
                sell_amount: db.decimal(&db.sell_amount, "sell_amount")?,
                buy_currency: db.text(&db.buy_currency, "buy_currency")?,
                buy_amount: db.decimal(&db.buy_amount, "buy_amount")?,
                fee,
            }),
            MovementKind::Trade => MovementDetails::Trade(TradeMovement {
                account_id: db.account_id.clone(),
                kind: TradeKind::from_str(&db.text(&db.kind, "kind")?)?,
                instrument_id: db.text(&db.instrument_id, "instrument_id")?,
                quantity: db.decimal(&db.quantity, "quantity")?,
                price: db.decimal(&db.price, "price")?,
                tax: db.decimal(&db.tax, "tax")?,
                fee,
                currency: db.text(&db.currency, "currency")?,
            }),
            MovementKind::Cash => MovementDetails::Cash(CashMovement {
                kind: CashKind::from_str(&db.text(&db.kind, "kind")?)?,
                currency: db.text(&db.currency, "currency")?,
                amount: db.decimal(&db.amount, "amount")?,
                fee,
                pay_account_id: db.pay_account_id.clone(),
                receive_account_id: db.receive_account_id.clone(),
            }),
        };

        let movement_date = NaiveDate::parse_from_str(&db.movement_date, MOVEMENT_DATE_FORMAT)
            .map_err(|e| {
                MovementError::InvalidData(format!(
                    "movement {} has an invalid date '{}': {}",
                    db.id, db.movement_date, e
                ))
            })?;

        Ok(Movement {
            id: db.id,
            movement_date,
            note: db.note,
            details,
            created_at: db.created_at,
            updated_at: db.updated_at,
        })
    }
}

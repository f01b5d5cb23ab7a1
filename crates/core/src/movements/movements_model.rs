//! Ledger movement domain models.

use chrono::{NaiveDate, NaiveDateTime};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::movements_constants::{cash_kinds, movement_types, trade_kinds};
use super::movements_errors::MovementError;
use crate::errors::{Error, Result, ValidationError};
use crate::utils::currency_utils::{normalize_currency, validate_currency};

/// Variant tag of a movement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MovementKind {
    Exchange,
    Trade,
    Cash,
}

impl MovementKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            MovementKind::Exchange => movement_types::EXCHANGE,
            MovementKind::Trade => movement_types::TRADE,
            MovementKind::Cash => movement_types::CASH,
        }
    }
}

impl FromStr for MovementKind {
    type Err = MovementError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            movement_types::EXCHANGE => Ok(MovementKind::Exchange),
            movement_types::TRADE => Ok(MovementKind::Trade),
            movement_types::CASH => Ok(MovementKind::Cash),
            other => Err(MovementError::InvalidKind(other.to_string())),
        }
    }
}

impl fmt::Display for MovementKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TradeKind {
    Buy,
    Sell,
}

impl TradeKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            TradeKind::Buy => trade_kinds::BUY,
            TradeKind::Sell => trade_kinds::SELL,
        }
    }
}

impl FromStr for TradeKind {
    type Err = MovementError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            trade_kinds::BUY => Ok(TradeKind::Buy),
            trade_kinds::SELL => Ok(TradeKind::Sell),
            other => Err(MovementError::InvalidKind(format!("trade kind '{}'", other))),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CashKind {
    Income,
    Spending,
    Transfer,
}

impl CashKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            CashKind::Income => cash_kinds::INCOME,
            CashKind::Spending => cash_kinds::SPENDING,
            CashKind::Transfer => cash_kinds::TRANSFER,
        }
    }
}

impl FromStr for CashKind {
    type Err = MovementError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            cash_kinds::INCOME => Ok(CashKind::Income),
            cash_kinds::SPENDING => Ok(CashKind::Spending),
            cash_kinds::TRANSFER => Ok(CashKind::Transfer),
            other => Err(MovementError::InvalidKind(format!("cash kind '{}'", other))),
        }
    }
}

/// Direction of an exchange relative to the base currency.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ExchangeDirection {
    /// Base currency is sold to buy a foreign currency
    SellBase,
    /// A foreign currency is sold
    BuyBase,
}

/// Currency exchange inside one account.
///
/// The fee is always settled in the ledger's base currency.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExchangeMovement {
    pub account_id: String,
    pub sell_currency: String,
    pub sell_amount: Decimal,
    pub buy_currency: String,
    pub buy_amount: Decimal,
    #[serde(default)]
    pub fee: Decimal,
}

impl ExchangeMovement {
    pub fn direction(&self, base_currency: &str) -> ExchangeDirection {
        if self.sell_currency == base_currency {
            ExchangeDirection::SellBase
        } else {
            ExchangeDirection::BuyBase
        }
    }
}

/// Securities trade settled in the instrument's currency.
///
/// Only the cash leg is booked here; positions are tracked elsewhere.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TradeMovement {
    pub account_id: String,
    pub kind: TradeKind,
    pub instrument_id: String,
    pub quantity: Decimal,
    pub price: Decimal,
    #[serde(default)]
    pub tax: Decimal,
    #[serde(default)]
    pub fee: Decimal,
    pub currency: String,
}

impl TradeMovement {
    /// quantity x price, or `None` on overflow.
    pub fn gross_amount(&self) -> Option<Decimal> {
        self.quantity.checked_mul(self.price)
    }

    /// Signed cash impact on the settlement currency, or `None` on overflow.
    pub fn settlement_amount(&self) -> Option<Decimal> {
        let gross = self.gross_amount()?;
        let costs = self.tax.checked_add(self.fee)?;
        match self.kind {
            TradeKind::Buy => gross.checked_add(costs).map(|total| -total),
            TradeKind::Sell => gross.checked_sub(costs),
        }
    }
}

/// Income, spending or transfer of cash.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CashMovement {
    pub kind: CashKind,
    pub currency: String,
    pub amount: Decimal,
    #[serde(default)]
    pub fee: Decimal,
    #[serde(default)]
    pub pay_account_id: Option<String>,
    #[serde(default)]
    pub receive_account_id: Option<String>,
}

/// The closed set of movement variants.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MovementDetails {
    Exchange(ExchangeMovement),
    Trade(TradeMovement),
    Cash(CashMovement),
}

impl MovementDetails {
    pub fn kind(&self) -> MovementKind {
        match self {
            MovementDetails::Exchange(_) => MovementKind::Exchange,
            MovementDetails::Trade(_) => MovementKind::Trade,
            MovementDetails::Cash(_) => MovementKind::Cash,
        }
    }

    /// The account the movement is filed under.
    ///
    /// Cash movements are owned by their paying account, or by the receiving
    /// account for income.
    pub fn owner_account_id(&self) -> Option<&str> {
        match self {
            MovementDetails::Exchange(exchange) => Some(exchange.account_id.as_str()),
            MovementDetails::Trade(trade) => Some(trade.account_id.as_str()),
            MovementDetails::Cash(cash) => cash
                .pay_account_id
                .as_deref()
                .or(cash.receive_account_id.as_deref()),
        }
    }

    /// Every account referenced by the movement, without duplicates.
    pub fn account_ids(&self) -> Vec<&str> {
        let mut ids: Vec<&str> = match self {
            MovementDetails::Exchange(exchange) => vec![exchange.account_id.as_str()],
            MovementDetails::Trade(trade) => vec![trade.account_id.as_str()],
            MovementDetails::Cash(cash) => cash
                .pay_account_id
                .iter()
                .chain(cash.receive_account_id.iter())
                .map(String::as_str)
                .collect(),
        };
        ids.dedup();
        ids
    }

    /// Trims identifiers and upper-cases currency codes.
    pub fn normalized(self) -> Self {
        match self {
            MovementDetails::Exchange(mut exchange) => {
                exchange.account_id = exchange.account_id.trim().to_string();
                exchange.sell_currency = normalize_currency(&exchange.sell_currency);
                exchange.buy_currency = normalize_currency(&exchange.buy_currency);
                MovementDetails::Exchange(exchange)
            }
            MovementDetails::Trade(mut trade) => {
                trade.account_id = trade.account_id.trim().to_string();
                trade.instrument_id = trade.instrument_id.trim().to_string();
                trade.currency = normalize_currency(&trade.currency);
                MovementDetails::Trade(trade)
            }
            MovementDetails::Cash(mut cash) => {
                cash.currency = normalize_currency(&cash.currency);
                cash.pay_account_id = normalize_reference(cash.pay_account_id);
                cash.receive_account_id = normalize_reference(cash.receive_account_id);
                MovementDetails::Cash(cash)
            }
        }
    }

    /// Checks the domain rules of the variant. Runs before any mutation.
    pub fn validate(&self) -> Result<()> {
        match self {
            MovementDetails::Exchange(exchange) => validate_exchange(exchange),
            MovementDetails::Trade(trade) => validate_trade(trade),
            MovementDetails::Cash(cash) => validate_cash(cash),
        }
    }
}

fn normalize_reference(reference: Option<String>) -> Option<String> {
    reference
        .map(|id| id.trim().to_string())
        .filter(|id| !id.is_empty())
}

fn invalid(message: impl Into<String>) -> Error {
    Error::Validation(ValidationError::InvalidInput(message.into()))
}

fn require_id(value: &str, field: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(Error::Validation(ValidationError::MissingField(
            field.to_string(),
        )));
    }
    Ok(())
}

fn require_positive(value: Decimal, field: &str) -> Result<()> {
    if value <= Decimal::ZERO {
        return Err(invalid(format!("{} must be greater than zero", field)));
    }
    Ok(())
}

fn require_non_negative(value: Decimal, field: &str) -> Result<()> {
    if value < Decimal::ZERO {
        return Err(invalid(format!("{} cannot be negative", field)));
    }
    Ok(())
}

fn validate_exchange(exchange: &ExchangeMovement) -> Result<()> {
    require_id(&exchange.account_id, "accountId")?;
    validate_currency(&exchange.sell_currency, "sellCurrency")?;
    validate_currency(&exchange.buy_currency, "buyCurrency")?;
    if exchange.sell_currency == exchange.buy_currency {
        return Err(invalid(format!(
            "sell and buy currency must differ (both {})",
            exchange.sell_currency
        )));
    }
    require_positive(exchange.sell_amount, "sellAmount")?;
    require_positive(exchange.buy_amount, "buyAmount")?;
    require_non_negative(exchange.fee, "fee")
}

fn validate_trade(trade: &TradeMovement) -> Result<()> {
    require_id(&trade.account_id, "accountId")?;
    require_id(&trade.instrument_id, "instrumentId")?;
    validate_currency(&trade.currency, "currency")?;
    require_positive(trade.quantity, "quantity")?;
    require_positive(trade.price, "price")?;
    require_non_negative(trade.tax, "tax")?;
    require_non_negative(trade.fee, "fee")?;
    if trade.settlement_amount().is_none() {
        return Err(invalid("trade amount is out of range"));
    }
    Ok(())
}

fn validate_cash(cash: &CashMovement) -> Result<()> {
    validate_currency(&cash.currency, "currency")?;
    require_positive(cash.amount, "amount")?;
    require_non_negative(cash.fee, "fee")?;
    if cash.amount.checked_add(cash.fee).is_none() {
        return Err(invalid("cash amount is out of range"));
    }

    match (cash.kind, &cash.pay_account_id, &cash.receive_account_id) {
        (CashKind::Income, None, Some(_)) => Ok(()),
        (CashKind::Income, _, _) => Err(invalid(
            "income requires a receive account and no pay account",
        )),
        (CashKind::Spending, Some(_), None) => Ok(()),
        (CashKind::Spending, _, _) => Err(invalid(
            "spending requires a pay account and no receive account",
        )),
        (CashKind::Transfer, Some(pay), Some(receive)) if pay != receive => Ok(()),
        (CashKind::Transfer, Some(_), Some(_)) => Err(invalid(
            "transfer requires two different accounts",
        )),
        (CashKind::Transfer, _, _) => Err(invalid(
            "transfer requires both a pay and a receive account",
        )),
    }
}

/// Input model for creating or replacing a movement.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewMovement {
    pub movement_date: NaiveDate,
    #[serde(default)]
    pub note: Option<String>,
    pub details: MovementDetails,
}

impl NewMovement {
    pub fn new(movement_date: NaiveDate, details: MovementDetails) -> Self {
        Self {
            movement_date,
            note: None,
            details,
        }
    }

    pub fn with_note(mut self, note: impl Into<String>) -> Self {
        self.note = Some(note.into());
        self
    }

    pub fn normalized(self) -> Self {
        Self {
            movement_date: self.movement_date,
            note: self
                .note
                .map(|n| n.trim().to_string())
                .filter(|n| !n.is_empty()),
            details: self.details.normalized(),
        }
    }

    pub fn validate(&self) -> Result<()> {
        self.details.validate()
    }
}

/// A persisted movement.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Movement {
    pub id: String,
    pub movement_date: NaiveDate,
    pub note: Option<String>,
    pub details: MovementDetails,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

impl Movement {
    pub fn kind(&self) -> MovementKind {
        self.details.kind()
    }

    /// Direction of an exchange against `base_currency`; `None` for other kinds.
    pub fn exchange_direction(&self, base_currency: &str) -> Option<ExchangeDirection> {
        match &self.details {
            MovementDetails::Exchange(exchange) => Some(exchange.direction(base_currency)),
            MovementDetails::Trade(_) | MovementDetails::Cash(_) => None,
        }
    }

    /// Builds the persisted form of `new_movement` under `id`.
    pub fn from_new(
        id: impl Into<String>,
        new_movement: NewMovement,
        created_at: NaiveDateTime,
        updated_at: NaiveDateTime,
    ) -> Self {
        Self {
            id: id.into(),
            movement_date: new_movement.movement_date,
            note: new_movement.note,
            details: new_movement.details,
            created_at,
            updated_at,
        }
    }
}

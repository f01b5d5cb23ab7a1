//! Balance effects of ledger movements.
//!
//! This is the only place where movement arithmetic lives. Every function here
//! is pure: the same movement and base currency always produce the same
//! deltas, in the same order.

use rust_decimal::Decimal;
use std::collections::BTreeMap;

use super::movements_model::{
    CashKind, CashMovement, ExchangeMovement, MovementDetails, TradeKind, TradeMovement,
};
use crate::balances::BalanceDelta;
use crate::errors::{Error, Result};

/// Computes the signed balance deltas caused by a movement.
///
/// Exchange fees are booked against `base_currency`. Zero-valued deltas are
/// left out, as they do not change any balance.
pub fn compute_effects(details: &MovementDetails, base_currency: &str) -> Vec<BalanceDelta> {
    let effects = match details {
        MovementDetails::Exchange(exchange) => exchange_effects(exchange, base_currency),
        MovementDetails::Trade(trade) => trade_effects(trade),
        MovementDetails::Cash(cash) => cash_effects(cash),
    };
    effects
        .into_iter()
        .filter(|delta| !delta.amount.is_zero())
        .collect()
}

/// Negates every delta, producing the exact inverse of `effects`.
pub fn reverse_effects(effects: &[BalanceDelta]) -> Vec<BalanceDelta> {
    effects.iter().map(BalanceDelta::reversed).collect()
}

/// Net effect of many movements per (account, currency).
///
/// The result does not depend on the order of `movements`. Fails with
/// [`Error::ArithmeticOverflow`] only when a net total itself is out of range.
pub fn aggregate_effects<'a, I>(
    movements: I,
    base_currency: &str,
) -> Result<BTreeMap<(String, String), Decimal>>
where
    I: IntoIterator<Item = &'a MovementDetails>,
{
    let mut amounts: BTreeMap<(String, String), Vec<Decimal>> = BTreeMap::new();
    for details in movements {
        for delta in compute_effects(details, base_currency) {
            amounts
                .entry((delta.account_id, delta.currency))
                .or_default()
                .push(delta.amount);
        }
    }

    amounts
        .into_iter()
        .map(|((account_id, currency), values)| {
            let total = net_total(values).ok_or_else(|| {
                Error::ArithmeticOverflow(format!(
                    "net effect on {}/{} is out of range",
                    account_id, currency
                ))
            })?;
            Ok(((account_id, currency), total))
        })
        .collect()
}

/// Sums signed amounts, alternating credits and debits.
///
/// While both signs remain, the running total stays within the range of a
/// single amount, so it overflows only if the final sum does.
fn net_total(values: Vec<Decimal>) -> Option<Decimal> {
    let (mut credits, mut debits): (Vec<Decimal>, Vec<Decimal>) =
        values.into_iter().partition(|value| value.is_sign_positive());
    let mut total = Decimal::ZERO;
    loop {
        let next = if total.is_sign_negative() {
            credits.pop().or_else(|| debits.pop())
        } else {
            debits.pop().or_else(|| credits.pop())
        };
        match next {
            Some(value) => total = total.checked_add(value)?,
            None => return Some(total),
        }
    }
}

fn exchange_effects(exchange: &ExchangeMovement, base_currency: &str) -> Vec<BalanceDelta> {
    vec![
        BalanceDelta::new(
            &exchange.account_id,
            &exchange.sell_currency,
            -exchange.sell_amount,
        ),
        BalanceDelta::new(
            &exchange.account_id,
            &exchange.buy_currency,
            exchange.buy_amount,
        ),
        BalanceDelta::new(&exchange.account_id, base_currency, -exchange.fee),
    ]
}

fn trade_effects(trade: &TradeMovement) -> Vec<BalanceDelta> {
    let gross = trade.quantity * trade.price;
    let amount = match trade.kind {
        TradeKind::Buy => -(gross + trade.tax + trade.fee),
        TradeKind::Sell => gross - trade.tax - trade.fee,
    };
    vec![BalanceDelta::new(&trade.account_id, &trade.currency, amount)]
}

fn cash_effects(cash: &CashMovement) -> Vec<BalanceDelta> {
    let mut effects = Vec::with_capacity(2);
    match cash.kind {
        CashKind::Income => {
            if let Some(receive) = &cash.receive_account_id {
                effects.push(BalanceDelta::new(receive, &cash.currency, cash.amount));
                effects.push(BalanceDelta::new(receive, &cash.currency, -cash.fee));
            }
        }
        CashKind::Spending => {
            if let Some(pay) = &cash.pay_account_id {
                effects.push(BalanceDelta::new(
                    pay,
                    &cash.currency,
                    -(cash.amount + cash.fee),
                ));
            }
        }
        CashKind::Transfer => {
            if let Some(pay) = &cash.pay_account_id {
                effects.push(BalanceDelta::new(
                    pay,
                    &cash.currency,
                    -(cash.amount + cash.fee),
                ));
            }
            if let Some(receive) = &cash.receive_account_id {
                effects.push(BalanceDelta::new(receive, &cash.currency, cash.amount));
            }
        }
    }
    effects
}

//! Balance domain models.

use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Stored balance of one currency held in one account.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccountBalance {
    pub account_id: String,
    pub currency: String,
    #[serde(with = "rust_decimal::serde::str")]
    pub amount: Decimal,
    pub updated_at: NaiveDateTime,
}

/// A signed change to the balance of (account, currency).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BalanceDelta {
    pub account_id: String,
    pub currency: String,
    pub amount: Decimal,
}

impl BalanceDelta {
    pub fn new(account_id: impl Into<String>, currency: impl Into<String>, amount: Decimal) -> Self {
        Self {
            account_id: account_id.into(),
            currency: currency.into(),
            amount,
        }
    }

    /// The delta that exactly undoes this one.
    pub fn reversed(&self) -> Self {
        Self {
            account_id: self.account_id.clone(),
            currency: self.currency.clone(),
            amount: -self.amount,
        }
    }
}

/// A (account, currency) pair whose cached balance disagrees with the ledger.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BalanceDiscrepancy {
    pub account_id: String,
    pub currency: String,
    /// Value held in the balance store
    #[serde(with = "rust_decimal::serde::str")]
    pub cached: Decimal,
    /// Sum of the effects of all persisted movements
    #[serde(with = "rust_decimal::serde::str")]
    pub expected: Decimal,
}

impl BalanceDiscrepancy {
    pub fn difference(&self) -> Decimal {
        self.cached - self.expected
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_reversed_negates_amount_only() {
        let delta = BalanceDelta::new("acc-1", "KRW", dec!(-10005));
        let reversed = delta.reversed();
        assert_eq!(reversed.account_id, "acc-1");
        assert_eq!(reversed.currency, "KRW");
        assert_eq!(reversed.amount, dec!(10005));
        assert_eq!(reversed.reversed(), delta);
    }

    #[test]
    fn test_discrepancy_difference() {
        let discrepancy = BalanceDiscrepancy {
            account_id: "acc-1".to_string(),
            currency: "USD".to_string(),
            cached: dec!(10),
            expected: dec!(8.55),
        };
        assert_eq!(discrepancy.difference(), dec!(1.45));

        let json = serde_json::to_value(&discrepancy).unwrap();
        assert_eq!(json["cached"], "10");
        assert_eq!(json["expected"], "8.55");
    }

    #[test]
    fn test_balance_amount_serializes_as_exact_string() {
        let balance = AccountBalance {
            account_id: "acc-1".to_string(),
            currency: "KRW".to_string(),
            amount: dec!(12345678901234567890.123456789),
            updated_at: NaiveDateTime::default(),
        };
        let json = serde_json::to_value(&balance).unwrap();
        assert_eq!(json["amount"], "12345678901234567890.123456789");

        let parsed: AccountBalance = serde_json::from_value(json).unwrap();
        assert_eq!(parsed, balance);
    }
}

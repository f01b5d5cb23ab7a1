//! Account domain models.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use super::accounts_constants::{is_valid_account_type, DEFAULT_ACCOUNT_TYPE};
use crate::utils::currency_utils::{normalize_currency, validate_currency};
use crate::{errors::ValidationError, Error, Result};

/// Domain model representing an account in the system.
///
/// Balances are not part of the account record; they live in the balance
/// store keyed by (account id, currency).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct Account {
    pub id: String,
    pub name: String,
    pub account_type: String,
    /// Primary currency of the account
    pub currency: String,
    pub is_active: bool,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

/// Input model for creating a new account.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewAccount {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub name: String,
    #[serde(default = "default_account_type")]
    pub account_type: String,
    pub currency: String,
    #[serde(default = "default_is_active")]
    pub is_active: bool,
}

fn default_account_type() -> String {
    DEFAULT_ACCOUNT_TYPE.to_string()
}

fn default_is_active() -> bool {
    true
}

impl NewAccount {
    /// Returns a copy with the currency code trimmed and upper-cased.
    pub fn normalized(mut self) -> Self {
        self.name = self.name.trim().to_string();
        self.currency = normalize_currency(&self.currency);
        self
    }

    /// Validates the new account data.
    pub fn validate(&self) -> Result<()> {
        if self.name.trim().is_empty() {
            return Err(Error::Validation(ValidationError::InvalidInput(
                "Account name cannot be empty".to_string(),
            )));
        }
        if !is_valid_account_type(&self.account_type) {
            return Err(Error::Validation(ValidationError::InvalidInput(format!(
                "Unknown account type '{}'",
                self.account_type
            ))));
        }
        validate_currency(&self.currency, "currency")
    }
}

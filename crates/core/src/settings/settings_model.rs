use serde::{Deserialize, Serialize};

use crate::constants::DEFAULT_BASE_CURRENCY;

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Settings {
    /// Currency in which exchange fees are settled
    pub base_currency: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            base_currency: DEFAULT_BASE_CURRENCY.to_string(),
        }
    }
}

/// Currency in which exchange fees are settled when no other base currency is configured
pub const DEFAULT_BASE_CURRENCY: &str = "KRW";

/// Settings key holding the ledger's base currency
pub const BASE_CURRENCY_SETTING_KEY: &str = "base_currency";

/// Date format used for movement dates
pub const MOVEMENT_DATE_FORMAT: &str = "%Y-%m-%d";

/// Default account type for new accounts
pub const DEFAULT_ACCOUNT_TYPE: &str = "BANK";

/// Account type constants
pub mod account_types {
    pub const BANK: &str = "BANK";
    pub const SAVINGS: &str = "SAVINGS";
    pub const SECURITIES: &str = "SECURITIES";
    pub const CASH: &str = "CASH";
    pub const CREDIT_CARD: &str = "CREDIT_CARD";
    pub const OTHER: &str = "OTHER";
}

/// Returns true if the given account type is valid.
pub fn is_valid_account_type(account_type: &str) -> bool {
    matches!(
        account_type,
        account_types::BANK
            | account_types::SAVINGS
            | account_types::SECURITIES
            | account_types::CASH
            | account_types::CREDIT_CARD
            | account_types::OTHER
    )
}

/// Stored tag of each movement variant
pub mod movement_types {
    pub const EXCHANGE: &str = "EXCHANGE";
    pub const TRADE: &str = "TRADE";
    pub const CASH: &str = "CASH";
}

/// Trade sides
pub mod trade_kinds {
    pub const BUY: &str = "BUY";
    pub const SELL: &str = "SELL";
}

/// Cash movement kinds
pub mod cash_kinds {
    pub const INCOME: &str = "INCOME";
    pub const SPENDING: &str = "SPENDING";
    pub const TRANSFER: &str = "TRANSFER";
}

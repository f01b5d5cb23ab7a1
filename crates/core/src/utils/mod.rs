pub mod currency_utils;
pub mod decimal_utils;

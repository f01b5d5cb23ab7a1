//! SQLite storage implementation for cached account balances.

mod model;
mod repository;

pub use model::AccountBalanceDB;
pub use repository::BalanceRepository;
pub(crate) use repository::apply_delta;

//! SQLite storage implementation for accounts.

mod model;
mod repository;

pub use model::AccountDB;
pub use repository::AccountRepository;
pub(crate) use repository::find_account;

//! SQLite storage implementation for ledger movements.

mod model;
mod repository;

pub use model::MovementDB;
pub use repository::MovementRepository;
pub(crate) use repository::{create_movement, delete_movement, find_movement, replace_movement};

//! Movements module - ledger movements and the balance effects they cause.

mod movements_constants;
mod movements_effects;
mod movements_errors;
mod movements_model;
mod movements_traits;


pub use movements_constants::*;
pub use movements_effects::{aggregate_effects, compute_effects, reverse_effects};
pub use movements_errors::MovementError;
pub use movements_model::{
    CashKind, CashMovement, ExchangeDirection, ExchangeMovement, Movement, MovementDetails,
    MovementKind, NewMovement, TradeKind, TradeMovement,
};
pub use movements_traits::{MovementRepositoryTrait, MovementStore};

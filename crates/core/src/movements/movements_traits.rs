//! Movement store and repository traits.

use super::movements_model::{Movement, NewMovement};
use crate::errors::Result;

/// Mutable movement store, available only inside a ledger scope.
///
/// The ledger never calls these outside the atomic scope that also carries
/// the matching balance changes.
pub trait MovementStore {
    /// Fails with [`crate::movements::MovementError::NotFound`] if absent.
    fn find_movement(&mut self, movement_id: &str) -> Result<Movement>;

    /// Assigns a new identifier and persists the movement.
    fn create_movement(&mut self, new_movement: NewMovement) -> Result<Movement>;

    /// Overwrites the movement, keeping its identifier and creation time.
    fn replace_movement(&mut self, movement_id: &str, new_movement: NewMovement)
        -> Result<Movement>;

    fn delete_movement(&mut self, movement_id: &str) -> Result<()>;
}

/// Read-only access to committed movements.
pub trait MovementRepositoryTrait: Send + Sync {
    fn get_movement(&self, movement_id: &str) -> Result<Movement>;

    /// Movements newest first. An account filter matches the owning account as
    /// well as either side of a transfer.
    fn list_movements(&self, account_id: Option<&str>) -> Result<Vec<Movement>>;
}

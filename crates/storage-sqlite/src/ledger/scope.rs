use diesel::SqliteConnection;

use crate::accounts::find_account;
use crate::balances::apply_delta;
use crate::movements::{create_movement, delete_movement, find_movement, replace_movement};
use moneybook_core::accounts::{Account, AccountResolver};
use moneybook_core::balances::{BalanceDelta, BalanceStore};
use moneybook_core::errors::Result;
use moneybook_core::movements::{Movement, MovementStore, NewMovement};

/// Ledger scope over a connection with an open transaction.
///
/// Every call goes through the same connection, so all changes share the
/// fate of the surrounding transaction.
pub struct SqliteLedgerScope<'a> {
    conn: &'a mut SqliteConnection,
}

impl<'a> SqliteLedgerScope<'a> {
    pub fn new(conn: &'a mut SqliteConnection) -> Self {
        Self { conn }
    }
}

impl AccountResolver for SqliteLedgerScope<'_> {
    fn resolve_account(&mut self, account_id: &str) -> Result<Account> {
        find_account(self.conn, account_id)
    }
}

impl BalanceStore for SqliteLedgerScope<'_> {
    fn apply_delta(&mut self, delta: &BalanceDelta) -> Result<()> {
        find_account(self.conn, &delta.account_id)?;
        apply_delta(self.conn, delta)
    }
}

impl MovementStore for SqliteLedgerScope<'_> {
    fn find_movement(&mut self, movement_id: &str) -> Result<Movement> {
        find_movement(self.conn, movement_id)
    }

    fn create_movement(&mut self, new_movement: NewMovement) -> Result<Movement> {
        create_movement(self.conn, new_movement)
    }

    fn replace_movement(&mut self, movement_id: &str, new_movement: NewMovement) -> Result<Movement> {
        replace_movement(self.conn, movement_id, new_movement)
    }

    fn delete_movement(&mut self, movement_id: &str) -> Result<()> {
        delete_movement(self.conn, movement_id)
    }
}

use diesel::prelude::*;
use log::debug;
use std::sync::Arc;

use super::model::MovementDB;
use crate::db::{get_connection, DbPool};
use crate::errors::IntoCore;
use crate::schema::movements;
use crate::schema::movements::dsl::*;
use moneybook_core::errors::Result;
use moneybook_core::movements::{Movement, MovementError, MovementRepositoryTrait, NewMovement};

fn load_row(conn: &mut SqliteConnection, movement_id: &str) -> Result<MovementDB> {
    movements
        .select(MovementDB::as_select())
        .find(movement_id)
        .first::<MovementDB>(conn)
        .optional()
        .into_core()?
        .ok_or_else(|| MovementError::NotFound(movement_id.to_string()).into())
}

pub(crate) fn find_movement(conn: &mut SqliteConnection, movement_id: &str) -> Result<Movement> {
    Movement::try_from(load_row(conn, movement_id)?)
}

pub(crate) fn create_movement(
    conn: &mut SqliteConnection,
    new_movement: NewMovement,
) -> Result<Movement> {
    let now = chrono::Utc::now().naive_utc();
    let row = MovementDB::from_new(uuid::Uuid::new_v4().to_string(), new_movement, now, now);

    diesel::insert_into(movements::table)
        .values(&row)
        .execute(conn)
        .into_core()?;
    debug!("Inserted movement {} ({})", row.id, row.movement_type);

    Movement::try_from(row)
}

/// Overwrites every column of the movement except its id and creation time.
pub(crate) fn replace_movement(
    conn: &mut SqliteConnection,
    movement_id: &str,
    new_movement: NewMovement,
) -> Result<Movement> {
    let existing = load_row(conn, movement_id)?;
    let row = MovementDB::from_new(
        existing.id,
        new_movement,
        existing.created_at,
        chrono::Utc::now().naive_utc(),
    );

    diesel::update(movements.find(movement_id))
        .set(&row)
        .execute(conn)
        .into_core()?;
    debug!("Replaced movement {} ({})", row.id, row.movement_type);

    Movement::try_from(row)
}

pub(crate) fn delete_movement(conn: &mut SqliteConnection, movement_id: &str) -> Result<()> {
    let deleted = diesel::delete(movements.find(movement_id))
        .execute(conn)
        .into_core()?;
    if deleted == 0 {
        return Err(MovementError::NotFound(movement_id.to_string()).into());
    }
    debug!("Deleted movement {}", movement_id);
    Ok(())
}

/// Read-only access to committed movements.
pub struct MovementRepository {
    pool: Arc<DbPool>,
}

impl MovementRepository {
    pub fn new(pool: Arc<DbPool>) -> Self {
        Self { pool }
    }
}

impl MovementRepositoryTrait for MovementRepository {
    fn get_movement(&self, movement_id: &str) -> Result<Movement> {
        let mut conn = get_connection(&self.pool)?;
        find_movement(&mut conn, movement_id)
    }

    fn list_movements(&self, filter_account: Option<&str>) -> Result<Vec<Movement>> {
        let mut conn = get_connection(&self.pool)?;

        let mut query = movements::table.into_boxed();
        if let Some(account) = filter_account {
            query = query.filter(
                account_id
                    .eq(account)
                    .or(pay_account_id.eq(account))
                    .or(receive_account_id.eq(account)),
            );
        }

        let rows = query
            .select(MovementDB::as_select())
            .order((movement_date.desc(), created_at.desc()))
            .load::<MovementDB>(&mut conn)
            .into_core()?;

        rows.into_iter().map(Movement::try_from).collect()
    }
}

// Repository pattern - isolates all reservation database side effects
use std::sync::Arc;

use async_trait::async_trait;
use rusqlite::params;

use crate::db::models::{Reservation, ReservationType};
use crate::error::{AppError, AppResult};
use crate::reservations::domain::{NewReservation, ReservationPatch};
use crate::state::DbPool;

const RESERVATION_COLUMNS: &str =
    "id, user_id, type, reservation_date, reservation_time, num_people, sunbed_type";

/// Store trait - every operation is scoped to the owning user. A row that
/// exists but belongs to someone else is reported exactly like a missing
/// row, so callers cannot probe other users' reservations.
#[async_trait]
pub trait ReservationStore: Send + Sync {
    /// Insert a validated reservation for the owner and return the stored row.
    async fn create(&self, owner_id: i64, new: NewReservation) -> AppResult<Reservation>;

    /// List the owner's reservations, optionally restricted to one type.
    async fn list(
        &self,
        owner_id: i64,
        kind: Option<ReservationType>,
    ) -> AppResult<Vec<Reservation>>;

    /// Fetch one reservation by id, owner-scoped.
    async fn get(&self, id: i64, owner_id: i64) -> AppResult<Reservation>;

    /// Merge a partial payload over the stored row, re-validate against the
    /// final type, persist and return the result.
    async fn update(
        &self,
        id: i64,
        owner_id: i64,
        patch: ReservationPatch,
    ) -> AppResult<Reservation>;

    /// Delete one reservation by id, owner-scoped.
    async fn delete(&self, id: i64, owner_id: i64) -> AppResult<()>;
}

/// Type alias for Arc-wrapped store (for AppState)
pub type DynReservationStore = Arc<dyn ReservationStore>;

/// SQLite implementation
#[derive(Clone)]
pub struct SqliteReservationStore {
    pool: DbPool,
}

impl SqliteReservationStore {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ReservationStore for SqliteReservationStore {
    async fn create(&self, owner_id: i64, new: NewReservation) -> AppResult<Reservation> {
        let conn = self.pool.get()?;

        conn.execute(
            "INSERT INTO reservations (user_id, type, reservation_date, reservation_time, num_people, sunbed_type) \
             VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
            params![
                owner_id,
                new.kind.as_str(),
                new.reservation_date,
                new.reservation_time,
                new.num_people,
                new.sunbed_type
            ],
        )?;
        let id = conn.last_insert_rowid();
        tracing::info!(reservation_id = id, owner_id, kind = new.kind.as_str(), "created reservation");

        Ok(conn.query_row(
            &format!("SELECT {RESERVATION_COLUMNS} FROM reservations WHERE id = ?1"),
            params![id],
            Reservation::from_row,
        )?)
    }

    async fn list(
        &self,
        owner_id: i64,
        kind: Option<ReservationType>,
    ) -> AppResult<Vec<Reservation>> {
        let conn = self.pool.get()?;

        let mut reservations = Vec::new();
        match kind {
            Some(kind) => {
                let mut stmt = conn.prepare(&format!(
                    "SELECT {RESERVATION_COLUMNS} FROM reservations \
                     WHERE user_id = ?1 AND type = ?2"
                ))?;
                let rows = stmt.query_map(params![owner_id, kind.as_str()], Reservation::from_row)?;
                for row in rows {
                    reservations.push(row?);
                }
            }
            None => {
                let mut stmt = conn.prepare(&format!(
                    "SELECT {RESERVATION_COLUMNS} FROM reservations WHERE user_id = ?1"
                ))?;
                let rows = stmt.query_map(params![owner_id], Reservation::from_row)?;
                for row in rows {
                    reservations.push(row?);
                }
            }
        }
        Ok(reservations)
    }

    async fn get(&self, id: i64, owner_id: i64) -> AppResult<Reservation> {
        let conn = self.pool.get()?;

        conn.query_row(
            &format!(
                "SELECT {RESERVATION_COLUMNS} FROM reservations WHERE id = ?1 AND user_id = ?2"
            ),
            params![id, owner_id],
            Reservation::from_row,
        )
        .map_err(|e| match e {
            rusqlite::Error::QueryReturnedNoRows => {
                AppError::NotFound("Reservation not found.".into())
            }
            _ => AppError::from(e),
        })
    }

    async fn update(
        &self,
        id: i64,
        owner_id: i64,
        patch: ReservationPatch,
    ) -> AppResult<Reservation> {
        // The owner comes from the verified token only; any attempt to set
        // it through the body is rejected outright.
        if patch.user_id.is_some() {
            return Err(AppError::Validation("user_id cannot be changed.".into()));
        }
        if patch.is_empty() {
            return Err(AppError::Validation(
                "At least one field must be provided for update.".into(),
            ));
        }

        let conn = self.pool.get()?;

        let existing = conn
            .query_row(
                &format!(
                    "SELECT {RESERVATION_COLUMNS} FROM reservations WHERE id = ?1 AND user_id = ?2"
                ),
                params![id, owner_id],
                Reservation::from_row,
            )
            .map_err(|e| match e {
                rusqlite::Error::QueryReturnedNoRows => {
                    AppError::NotFound("Reservation not found to update.".into())
                }
                _ => AppError::from(e),
            })?;

        let new = patch.merge_over(&existing).finalize()?;

        conn.execute(
            "UPDATE reservations SET type = ?1, reservation_date = ?2, reservation_time = ?3, \
             num_people = ?4, sunbed_type = ?5 WHERE id = ?6 AND user_id = ?7",
            params![
                new.kind.as_str(),
                new.reservation_date,
                new.reservation_time,
                new.num_people,
                new.sunbed_type,
                id,
                owner_id
            ],
        )?;
        tracing::info!(reservation_id = id, owner_id, "updated reservation");

        Ok(conn.query_row(
            &format!("SELECT {RESERVATION_COLUMNS} FROM reservations WHERE id = ?1"),
            params![id],
            Reservation::from_row,
        )?)
    }

    async fn delete(&self, id: i64, owner_id: i64) -> AppResult<()> {
        let conn = self.pool.get()?;

        let affected = conn.execute(
            "DELETE FROM reservations WHERE id = ?1 AND user_id = ?2",
            params![id, owner_id],
        )?;
        if affected == 0 {
            return Err(AppError::NotFound("Reservation not found to delete.".into()));
        }
        tracing::info!(reservation_id = id, owner_id, "deleted reservation");
        Ok(())
    }
}

//! SQLite-backed room store.
//!
//! Every mutation and its sync counter bump commit in one transaction.

use sqlx::{Row, SqlitePool};

use crate::errors::AppError;
use crate::models::{NewRoom, Room, UpdateRoomRequest};
use crate::search::RoomFilter;

const ROOM_COLUMNS: &str =
    "id, block_name, floor_number, room_number, department_name, capacity, created_at";

/// Durable room store.
pub struct SqliteStore {
    pool: SqlitePool,
}

impl SqliteStore {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Insert `rooms` unless this database was seeded before.
    ///
    /// Returns whether the seed was applied.
    pub async fn seed_once(&self, rooms: &[Room]) -> Result<bool, AppError> {
        let mut tx = self.pool.begin().await?;

        let claimed = sqlx::query("UPDATE meta SET seeded = 1 WHERE id = 1 AND seeded = 0")
            .execute(&mut *tx)
            .await?;
        if claimed.rows_affected() == 0 {
            return Ok(false);
        }

        for room in rooms {
            insert_room(&mut tx, room).await?;
        }
        tx.commit().await?;
        Ok(true)
    }

    pub async fn list(&self) -> Result<Vec<Room>, AppError> {
        let rows = sqlx::query(&format!("SELECT {} FROM rooms ORDER BY seq", ROOM_COLUMNS))
            .fetch_all(&self.pool)
            .await?;

        Ok(rows.iter().map(room_from_row).collect())
    }

    pub async fn get(&self, id: &str) -> Result<Option<Room>, AppError> {
        let row = sqlx::query(&format!("SELECT {} FROM rooms WHERE id = ?", ROOM_COLUMNS))
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(row.as_ref().map(room_from_row))
    }

    pub async fn create(&self, fields: NewRoom) -> Result<Room, AppError> {
        let room = super::mint_room(fields);

        let mut tx = self.pool.begin().await?;
        insert_room(&mut tx, &room).await?;
        bump_sync_version(&mut tx).await?;
        tx.commit().await?;

        Ok(room)
    }

    pub async fn update(
        &self,
        id: &str,
        changes: &UpdateRoomRequest,
    ) -> Result<Option<Room>, AppError> {
        let mut tx = self.pool.begin().await?;

        // Write first so the transaction holds the write lock before it reads.
        let result = sqlx::query(
            "UPDATE rooms SET block_name = COALESCE(?, block_name), floor_number = COALESCE(?, floor_number), room_number = COALESCE(?, room_number), department_name = COALESCE(?, department_name), capacity = COALESCE(?, capacity) WHERE id = ?",
        )
        .bind(&changes.block_name)
        .bind(changes.floor_number)
        .bind(&changes.room_number)
        .bind(&changes.department_name)
        .bind(changes.capacity)
        .bind(id)
        .execute(&mut *tx)
        .await?;
        if result.rows_affected() == 0 {
            return Ok(None);
        }

        let row = sqlx::query(&format!("SELECT {} FROM rooms WHERE id = ?", ROOM_COLUMNS))
            .bind(id)
            .fetch_one(&mut *tx)
            .await?;
        let room = room_from_row(&row);

        bump_sync_version(&mut tx).await?;
        tx.commit().await?;

        Ok(Some(room))
    }

    pub async fn delete(&self, id: &str) -> Result<bool, AppError> {
        let mut tx = self.pool.begin().await?;

        let result = sqlx::query("DELETE FROM rooms WHERE id = ?")
            .bind(id)
            .execute(&mut *tx)
            .await?;
        if result.rows_affected() == 0 {
            return Ok(false);
        }

        bump_sync_version(&mut tx).await?;
        tx.commit().await?;
        Ok(true)
    }

    /// Linear filter over the full table, same semantics as the memory store.
    pub async fn search(&self, filter: &RoomFilter) -> Result<Vec<Room>, AppError> {
        Ok(filter.apply(self.list().await?))
    }

    pub async fn sync_version(&self) -> Result<i64, AppError> {
        let row = sqlx::query("SELECT sync_version FROM meta WHERE id = 1")
            .fetch_one(&self.pool)
            .await?;
        Ok(row.get("sync_version"))
    }
}

async fn insert_room(
    tx: &mut sqlx::Transaction<'_, sqlx::Sqlite>,
    room: &Room,
) -> Result<(), sqlx::Error> {
    sqlx::query(&format!(
        "INSERT INTO rooms ({}) VALUES (?, ?, ?, ?, ?, ?, ?)",
        ROOM_COLUMNS
    ))
    .bind(&room.id)
    .bind(&room.block_name)
    .bind(room.floor_number)
    .bind(&room.room_number)
    .bind(&room.department_name)
    .bind(room.capacity)
    .bind(room.created_at)
    .execute(&mut **tx)
    .await?;
    Ok(())
}

async fn bump_sync_version(tx: &mut sqlx::Transaction<'_, sqlx::Sqlite>) -> Result<(), sqlx::Error> {
    sqlx::query("UPDATE meta SET sync_version = sync_version + 1 WHERE id = 1")
        .execute(&mut **tx)
        .await?;
    Ok(())
}

fn room_from_row(row: &sqlx::sqlite::SqliteRow) -> Room {
    Room {
        id: row.get("id"),
        block_name: row.get("block_name"),
        floor_number: row.get("floor_number"),
        room_number: row.get("room_number"),
        department_name: row.get("department_name"),
        capacity: row.get("capacity"),
        created_at: row.get("created_at"),
    }
}

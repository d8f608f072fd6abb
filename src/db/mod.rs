//! Room store.
//!
//! The in-memory backend is the default and is reseeded on every start. Setting a
//! database path switches to SQLite, which keeps rooms and the sync counter across restarts.

mod memory;
mod repository;
mod seed;
mod sqlite;

pub use memory::MemoryStore;
pub use repository::*;
pub use sqlite::SqliteStore;

use chrono::Utc;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};
use std::path::Path;
use std::str::FromStr;

use crate::models::{NewRoom, Room};

/// Initialize the database connection pool and run migrations.
pub async fn init_database(db_path: &Path) -> Result<SqlitePool, sqlx::Error> {
    // Ensure the parent directory exists
    if let Some(parent) = db_path.parent() {
        tokio::fs::create_dir_all(parent).await.ok();
    }

    let db_url = format!("sqlite:{}?mode=rwc", db_path.display());

    let options = SqliteConnectOptions::from_str(&db_url)?
        .create_if_missing(true)
        .journal_mode(sqlx::sqlite::SqliteJournalMode::Wal)
        .synchronous(sqlx::sqlite::SqliteSynchronous::Normal)
        .busy_timeout(std::time::Duration::from_secs(30));

    let pool = SqlitePoolOptions::new()
        .max_connections(5)
        .connect_with(options)
        .await?;

    run_migrations(&pool).await?;

    Ok(pool)
}

/// Run database migrations.
async fn run_migrations(pool: &SqlitePool) -> Result<(), sqlx::Error> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS meta (
            id INTEGER PRIMARY KEY CHECK (id = 1),
            sync_version INTEGER NOT NULL DEFAULT 0,
            seeded INTEGER NOT NULL DEFAULT 0
        )
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query("INSERT OR IGNORE INTO meta (id, sync_version, seeded) VALUES (1, 0, 0)")
        .execute(pool)
        .await?;

    // `seq` keeps insertion order for listing.
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS rooms (
            seq INTEGER PRIMARY KEY AUTOINCREMENT,
            id TEXT NOT NULL UNIQUE,
            block_name TEXT NOT NULL,
            floor_number INTEGER NOT NULL,
            room_number TEXT NOT NULL,
            department_name TEXT NOT NULL,
            capacity INTEGER,
            created_at INTEGER NOT NULL
        )
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query("CREATE INDEX IF NOT EXISTS idx_rooms_department ON rooms(department_name)")
        .execute(pool)
        .await?;

    Ok(())
}

/// Current time in milliseconds since the Unix epoch.
pub fn now_millis() -> i64 {
    Utc::now().timestamp_millis()
}

/// Build a stored room from validated fields: `room_<millis>_<9 random hex chars>`.
pub(crate) fn mint_room(fields: NewRoom) -> Room {
    let created_at = now_millis();
    let suffix = uuid::Uuid::new_v4().simple().to_string();
    Room {
        id: format!("room_{}_{}", created_at, &suffix[..9]),
        block_name: fields.block_name,
        floor_number: fields.floor_number,
        room_number: fields.room_number,
        department_name: fields.department_name,
        capacity: fields.capacity,
        created_at,
    }
}

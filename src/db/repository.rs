//! Repository handle shared by all handlers.
//!
//! Rooms live in one of two backends. Students and admins are a fixed seed held in
//! memory for either backend.

use sqlx::SqlitePool;

use super::{now_millis, seed, MemoryStore, SqliteStore};
use crate::auth::constant_time_compare;
use crate::errors::AppError;
use crate::models::{Admin, NewRoom, Room, Student, UpdateRoomRequest};
use crate::search::RoomFilter;

enum Backend {
    Memory(MemoryStore),
    Sqlite(SqliteStore),
}

/// Owner of all rooms, students and admins.
pub struct Repository {
    backend: Backend,
    students: Vec<Student>,
    admins: Vec<Admin>,
}

impl Repository {
    /// In-memory repository loaded with the sample rooms.
    pub fn in_memory() -> Self {
        let now = now_millis();
        Self::with_backend(Backend::Memory(MemoryStore::with_rooms(seed::sample_rooms(now))))
    }

    /// In-memory repository with no rooms.
    pub fn empty() -> Self {
        Self::with_backend(Backend::Memory(MemoryStore::default()))
    }

    /// SQLite repository. With `load_samples`, sample rooms are inserted the first time a
    /// database is opened.
    pub async fn sqlite(pool: SqlitePool, load_samples: bool) -> Result<Self, AppError> {
        let store = SqliteStore::new(pool);
        if load_samples && store.seed_once(&seed::sample_rooms(now_millis())).await? {
            tracing::info!("Seeded new database with sample rooms");
        }
        Ok(Self::with_backend(Backend::Sqlite(store)))
    }

    fn with_backend(backend: Backend) -> Self {
        Self {
            backend,
            students: seed::students(now_millis()),
            admins: seed::admins(),
        }
    }

    /// Name of the active backend, for logs.
    pub fn backend_name(&self) -> &'static str {
        match self.backend {
            Backend::Memory(_) => "memory",
            Backend::Sqlite(_) => "sqlite",
        }
    }

    // ==================== ROOM OPERATIONS ====================

    /// List all rooms in insertion order.
    pub async fn list_rooms(&self) -> Result<Vec<Room>, AppError> {
        match &self.backend {
            Backend::Memory(store) => Ok(store.list().await),
            Backend::Sqlite(store) => store.list().await,
        }
    }

    /// Get a room by ID.
    pub async fn get_room(&self, id: &str) -> Result<Option<Room>, AppError> {
        match &self.backend {
            Backend::Memory(store) => Ok(store.get(id).await),
            Backend::Sqlite(store) => store.get(id).await,
        }
    }

    /// Create a room and bump the sync counter.
    pub async fn create_room(&self, fields: NewRoom) -> Result<Room, AppError> {
        let room = match &self.backend {
            Backend::Memory(store) => store.create(fields).await,
            Backend::Sqlite(store) => store.create(fields).await?,
        };
        tracing::info!(room_id = %room.id, "Created room");
        Ok(room)
    }

    /// Merge `changes` into a room. `None` when the room does not exist.
    pub async fn update_room(
        &self,
        id: &str,
        changes: &UpdateRoomRequest,
    ) -> Result<Option<Room>, AppError> {
        let room = match &self.backend {
            Backend::Memory(store) => store.update(id, changes).await,
            Backend::Sqlite(store) => store.update(id, changes).await?,
        };
        if room.is_some() {
            tracing::info!(room_id = %id, "Updated room");
        }
        Ok(room)
    }

    /// Delete a room. Returns whether it existed.
    pub async fn delete_room(&self, id: &str) -> Result<bool, AppError> {
        let found = match &self.backend {
            Backend::Memory(store) => store.delete(id).await,
            Backend::Sqlite(store) => store.delete(id).await?,
        };
        if found {
            tracing::info!(room_id = %id, "Deleted room");
        }
        Ok(found)
    }

    /// Rooms matching every supplied filter field.
    pub async fn search_rooms(&self, filter: &RoomFilter) -> Result<Vec<Room>, AppError> {
        match &self.backend {
            Backend::Memory(store) => Ok(store.search(filter).await),
            Backend::Sqlite(store) => store.search(filter).await,
        }
    }

    /// Current value of the room mutation counter.
    pub async fn sync_version(&self) -> Result<i64, AppError> {
        match &self.backend {
            Backend::Memory(store) => Ok(store.sync_version().await),
            Backend::Sqlite(store) => store.sync_version().await,
        }
    }

    // ==================== ACCOUNT OPERATIONS ====================

    /// The student with `registration_number`, if it is on the allow-list.
    pub fn authenticate_student(&self, registration_number: &str) -> Option<&Student> {
        self.students
            .iter()
            .find(|student| student.registration_number == registration_number)
    }

    /// Whether `admin_id` exists and its password equals `password`.
    pub fn authenticate_admin(&self, admin_id: &str, password: &str) -> bool {
        self.admins
            .iter()
            .find(|admin| admin.admin_id == admin_id)
            .is_some_and(|admin| constant_time_compare(&admin.password, password))
    }
}

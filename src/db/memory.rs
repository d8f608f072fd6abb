//! In-process room store. Nothing survives a restart.

use tokio::sync::RwLock;

use crate::models::{NewRoom, Room, UpdateRoomRequest};
use crate::search::RoomFilter;

#[derive(Debug, Default)]
struct MemoryState {
    /// Insertion order is listing order.
    rooms: Vec<Room>,
    sync_version: i64,
}

impl MemoryState {
    fn position(&self, id: &str) -> Option<usize> {
        self.rooms.iter().position(|room| room.id == id)
    }
}

/// Room store held entirely in memory.
#[derive(Debug, Default)]
pub struct MemoryStore {
    state: RwLock<MemoryState>,
}

impl MemoryStore {
    /// Create a store holding `rooms`. Seeding does not count as a mutation.
    pub fn with_rooms(rooms: Vec<Room>) -> Self {
        Self {
            state: RwLock::new(MemoryState {
                rooms,
                sync_version: 0,
            }),
        }
    }

    pub async fn list(&self) -> Vec<Room> {
        self.state.read().await.rooms.clone()
    }

    pub async fn get(&self, id: &str) -> Option<Room> {
        let state = self.state.read().await;
        state.position(id).map(|idx| state.rooms[idx].clone())
    }

    pub async fn create(&self, fields: NewRoom) -> Room {
        let room = super::mint_room(fields);
        let mut state = self.state.write().await;
        state.rooms.push(room.clone());
        state.sync_version += 1;
        room
    }

    pub async fn update(&self, id: &str, changes: &UpdateRoomRequest) -> Option<Room> {
        let mut state = self.state.write().await;
        let idx = state.position(id)?;
        let room = &mut state.rooms[idx];
        room.apply(changes);
        let updated = room.clone();
        state.sync_version += 1;
        Some(updated)
    }

    pub async fn delete(&self, id: &str) -> bool {
        let mut state = self.state.write().await;
        match state.position(id) {
            Some(idx) => {
                state.rooms.remove(idx);
                state.sync_version += 1;
                true
            }
            None => false,
        }
    }

    pub async fn search(&self, filter: &RoomFilter) -> Vec<Room> {
        let state = self.state.read().await;
        state
            .rooms
            .iter()
            .filter(|room| filter.matches(room))
            .cloned()
            .collect()
    }

    pub async fn sync_version(&self) -> i64 {
        self.state.read().await.sync_version
    }
}

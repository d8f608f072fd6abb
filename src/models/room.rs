//! Room model matching the frontend Room interface.

use serde::{Deserialize, Serialize};

/// A directory entry for a physical room.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Room {
    pub id: String,
    pub block_name: String,
    pub floor_number: i64,
    pub room_number: String,
    pub department_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub capacity: Option<i64>,
    /// Milliseconds since the Unix epoch
    pub created_at: i64,
}

/// Request body for creating a new room.
///
/// Every field is optional at the serde level so that a missing field surfaces
/// as a validation error instead of a deserialization failure.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateRoomRequest {
    #[serde(default)]
    pub block_name: Option<String>,
    #[serde(default)]
    pub floor_number: Option<i64>,
    #[serde(default)]
    pub room_number: Option<String>,
    #[serde(default)]
    pub department_name: Option<String>,
    #[serde(default)]
    pub capacity: Option<i64>,
}

/// A create request whose required fields have been checked.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewRoom {
    pub block_name: String,
    pub floor_number: i64,
    pub room_number: String,
    pub department_name: String,
    pub capacity: Option<i64>,
}

impl CreateRoomRequest {
    /// Check required fields. Empty strings count as missing.
    pub fn validate(self) -> Option<NewRoom> {
        Some(NewRoom {
            block_name: non_empty(self.block_name)?,
            floor_number: self.floor_number?,
            room_number: non_empty(self.room_number)?,
            department_name: non_empty(self.department_name)?,
            capacity: self.capacity,
        })
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}

/// Request body for a partial room update. `id` and `createdAt` are not updatable.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateRoomRequest {
    #[serde(default)]
    pub block_name: Option<String>,
    #[serde(default)]
    pub floor_number: Option<i64>,
    #[serde(default)]
    pub room_number: Option<String>,
    #[serde(default)]
    pub department_name: Option<String>,
    #[serde(default)]
    pub capacity: Option<i64>,
}

impl UpdateRoomRequest {
    /// Name of the first provided string field that is empty, if any.
    pub fn empty_field(&self) -> Option<&'static str> {
        [
            ("blockName", &self.block_name),
            ("roomNumber", &self.room_number),
            ("departmentName", &self.department_name),
        ]
        .into_iter()
        .find(|(_, value)| value.as_deref() == Some(""))
        .map(|(name, _)| name)
    }
}

impl Room {
    /// Merge the provided fields over this room.
    pub fn apply(&mut self, changes: &UpdateRoomRequest) {
        if let Some(block_name) = &changes.block_name {
            self.block_name = block_name.clone();
        }
        if let Some(floor_number) = changes.floor_number {
            self.floor_number = floor_number;
        }
        if let Some(room_number) = &changes.room_number {
            self.room_number = room_number.clone();
        }
        if let Some(department_name) = &changes.department_name {
            self.department_name = department_name.clone();
        }
        if changes.capacity.is_some() {
            self.capacity = changes.capacity;
        }
    }
}

/// Response body carrying a list of rooms.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoomsResponse {
    pub rooms: Vec<Room>,
}

/// Response body carrying a single room.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoomResponse {
    pub room: Room,
}

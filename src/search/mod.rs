//! Room filtering.
//!
//! A filter is a conjunction over the fields that were supplied. String fields match by
//! case-insensitive substring containment, the floor by exact equality.

use serde::Deserialize;

use crate::errors::AppError;
use crate::models::Room;

/// Raw search query parameters as they arrive on the URL.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchQuery {
    pub department_name: Option<String>,
    pub block_name: Option<String>,
    pub floor_number: Option<String>,
    pub room_number: Option<String>,
}

/// A parsed room filter. `None` fields are not constraints.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RoomFilter {
    department_name: Option<String>,
    block_name: Option<String>,
    floor_number: Option<i64>,
    room_number: Option<String>,
}

impl TryFrom<SearchQuery> for RoomFilter {
    type Error = AppError;

    fn try_from(query: SearchQuery) -> Result<Self, Self::Error> {
        let mut filter = Self::default();

        if let Some(raw) = supplied(query.floor_number) {
            let floor = raw.trim().parse::<i64>().map_err(|_| {
                AppError::Validation(format!("floorNumber must be an integer, got '{}'", raw))
            })?;
            filter = filter.floor(floor);
        }
        if let Some(name) = query.department_name {
            filter = filter.department(&name);
        }
        if let Some(name) = query.block_name {
            filter = filter.block(&name);
        }
        if let Some(number) = query.room_number {
            filter = filter.room_number(&number);
        }

        Ok(filter)
    }
}

/// Empty query values count as absent.
fn supplied(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}

impl RoomFilter {
    pub fn department(mut self, name: &str) -> Self {
        self.department_name = supplied(Some(name.to_lowercase()));
        self
    }

    pub fn block(mut self, name: &str) -> Self {
        self.block_name = supplied(Some(name.to_lowercase()));
        self
    }

    pub fn floor(mut self, floor: i64) -> Self {
        self.floor_number = Some(floor);
        self
    }

    pub fn room_number(mut self, number: &str) -> Self {
        self.room_number = supplied(Some(number.to_lowercase()));
        self
    }

    /// Whether no field constrains the result.
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    /// Check a room against every supplied field.
    pub fn matches(&self, room: &Room) -> bool {
        contains(&room.department_name, self.department_name.as_deref())
            && contains(&room.block_name, self.block_name.as_deref())
            && self.floor_number.map_or(true, |floor| room.floor_number == floor)
            && contains(&room.room_number, self.room_number.as_deref())
    }

    /// Keep the rooms that match, preserving order.
    pub fn apply(&self, rooms: Vec<Room>) -> Vec<Room> {
        if self.is_empty() {
            return rooms;
        }
        rooms.into_iter().filter(|room| self.matches(room)).collect()
    }
}

/// `needle` is already lowercased.
fn contains(haystack: &str, needle: Option<&str>) -> bool {
    match needle {
        Some(needle) => haystack.to_lowercase().contains(needle),
        None => true,
    }
}

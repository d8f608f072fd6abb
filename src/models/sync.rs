//! Sync counter and small status bodies.

use serde::{Deserialize, Serialize};

/// Current value of the room mutation counter.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct SyncVersion {
    pub version: i64,
}

/// Body of the ping endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PingResponse {
    pub message: String,
}

/// Body of a successful delete.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeleteResponse {
    pub success: bool,
}

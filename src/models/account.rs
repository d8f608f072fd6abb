//! Student and admin accounts plus the login request/response bodies.

use serde::{Deserialize, Serialize};

/// A student allowed to use the directory.
#[derive(Debug, Clone)]
pub struct Student {
    pub registration_number: String,
    pub created_at: i64,
}

/// An admin account. Passwords are stored in plaintext.
#[derive(Debug, Clone)]
pub struct Admin {
    pub admin_id: String,
    pub password: String,
}

/// Request body for student login.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StudentLoginRequest {
    #[serde(default)]
    pub registration_number: Option<String>,
}

/// Request body for admin login.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdminLoginRequest {
    #[serde(default)]
    pub admin_id: Option<String>,
    #[serde(default)]
    pub password: Option<String>,
}

/// Response body for both login endpoints and auth failures.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthResponse {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl AuthResponse {
    pub fn token(token: String) -> Self {
        Self {
            success: true,
            token: Some(token),
            message: None,
        }
    }

    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            success: false,
            token: None,
            message: Some(message.into()),
        }
    }
}

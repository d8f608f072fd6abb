//! Stub authentication.
//!
//! Tokens are `<role>_<identifier>_<issued millis>` strings with no signature. Admin
//! routes only check the `admin_` prefix of the bearer token.

use axum::{
    extract::Request,
    http::{header, HeaderMap},
    middleware::Next,
    response::{IntoResponse, Response},
};
use subtle::ConstantTimeEq;

use crate::db::now_millis;
use crate::errors::{AppError, AuthRejection};

/// Prefix that marks a token as belonging to an admin.
pub const ADMIN_TOKEN_PREFIX: &str = "admin_";

/// Role a token is issued for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    Student,
    Admin,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Student => "student",
            Role::Admin => "admin",
        }
    }
}

/// Issue a token for `identifier`.
pub fn issue_token(role: Role, identifier: &str) -> String {
    format!("{}_{}_{}", role.as_str(), identifier, now_millis())
}

/// The token part of an `Authorization: Bearer <token>` header.
fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    headers
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|s| s.split(' ').nth(1))
        .filter(|token| !token.is_empty())
}

/// Whether the request carries an admin-prefixed token.
pub fn has_admin_token(headers: &HeaderMap) -> bool {
    bearer_token(headers).is_some_and(|token| token.starts_with(ADMIN_TOKEN_PREFIX))
}

/// Middleware guarding admin mutation routes.
pub async fn require_admin(request: Request, next: Next) -> Response {
    if has_admin_token(request.headers()) {
        return next.run(request).await;
    }

    tracing::warn!(
        method = %request.method(),
        path = %request.uri().path(),
        "Rejected request without admin token"
    );
    AuthRejection(AppError::Forbidden("Admin access required".to_string())).into_response()
}

/// Perform constant-time string comparison.
pub fn constant_time_compare(a: &str, b: &str) -> bool {
    a.as_bytes().ct_eq(b.as_bytes()).into()
}

//! REST API module.
//!
//! Contains all API routes and handlers following the frontend contract.

mod auth;
mod rooms;
mod sync;

pub use auth::*;
pub use rooms::*;
pub use sync::*;

use axum::Json;

use crate::errors::{AppError, AuthRejection};

/// Result of a room or sync handler.
pub type ApiResult<T> = Result<Json<T>, AppError>;

/// Result of a login handler.
pub type AuthResult<T> = Result<Json<T>, AuthRejection>;

//! Login endpoints.

use axum::{
    extract::{rejection::JsonRejection, State},
    Json,
};

use super::AuthResult;
use crate::auth::{issue_token, Role};
use crate::errors::AppError;
use crate::models::{AdminLoginRequest, AuthResponse, StudentLoginRequest};
use crate::AppState;

fn required(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}

/// POST /api/auth/student-login - Log in with a registration number.
pub async fn student_login(
    State(state): State<AppState>,
    payload: Result<Json<StudentLoginRequest>, JsonRejection>,
) -> AuthResult<AuthResponse> {
    let Json(request) = payload?;

    let registration_number = required(request.registration_number)
        .ok_or_else(|| AppError::Validation("Registration number is required".to_string()))?;

    let Some(student) = state.repo.authenticate_student(&registration_number) else {
        tracing::info!(%registration_number, "Student login rejected");
        return Err(AppError::Unauthorized("Invalid registration number".to_string()).into());
    };

    tracing::info!(
        %registration_number,
        registered_at = student.created_at,
        "Student logged in"
    );
    Ok(Json(AuthResponse::token(issue_token(
        Role::Student,
        &registration_number,
    ))))
}

/// POST /api/auth/admin-login - Log in with an admin id and password.
pub async fn admin_login(
    State(state): State<AppState>,
    payload: Result<Json<AdminLoginRequest>, JsonRejection>,
) -> AuthResult<AuthResponse> {
    let Json(request) = payload?;

    let (Some(admin_id), Some(password)) = (required(request.admin_id), required(request.password))
    else {
        return Err(
            AppError::Validation("Admin ID and password are required".to_string()).into(),
        );
    };

    if !state.repo.authenticate_admin(&admin_id, &password) {
        tracing::info!(%admin_id, "Admin login rejected");
        return Err(AppError::Unauthorized("Invalid admin credentials".to_string()).into());
    }

    tracing::info!(%admin_id, "Admin logged in");
    Ok(Json(AuthResponse::token(issue_token(Role::Admin, &admin_id))))
}

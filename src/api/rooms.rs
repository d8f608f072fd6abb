//! Room API endpoints.

use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection, QueryRejection},
        Path, Query, State,
    },
    http::StatusCode,
    Json,
};

use super::ApiResult;
use crate::errors::AppError;
use crate::models::{
    CreateRoomRequest, DeleteResponse, RoomResponse, RoomsResponse, UpdateRoomRequest,
};
use crate::search::{RoomFilter, SearchQuery};
use crate::AppState;

fn room_not_found() -> AppError {
    AppError::NotFound("Room not found".to_string())
}

/// GET /api/rooms - List all rooms.
pub async fn list_rooms(State(state): State<AppState>) -> ApiResult<RoomsResponse> {
    let rooms = state.repo.list_rooms().await?;
    Ok(Json(RoomsResponse { rooms }))
}

/// GET /api/rooms/search - Filter rooms by department, block, floor and number.
pub async fn search_rooms(
    State(state): State<AppState>,
    query: Result<Query<SearchQuery>, QueryRejection>,
) -> ApiResult<RoomsResponse> {
    let Query(params) = query?;
    let filter = RoomFilter::try_from(params)?;
    let rooms = state.repo.search_rooms(&filter).await?;
    Ok(Json(RoomsResponse { rooms }))
}

/// GET /api/rooms/:id - Get a single room.
pub async fn get_room(
    State(state): State<AppState>,
    path: Result<Path<String>, PathRejection>,
) -> ApiResult<RoomResponse> {
    let Path(id) = path?;
    let room = state.repo.get_room(&id).await?.ok_or_else(room_not_found)?;
    Ok(Json(RoomResponse { room }))
}

/// POST /api/rooms - Create a new room.
pub async fn create_room(
    State(state): State<AppState>,
    payload: Result<Json<CreateRoomRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<RoomResponse>), AppError> {
    let Json(request) = payload?;

    let fields = request
        .validate()
        .ok_or_else(|| AppError::Validation("Missing required fields".to_string()))?;

    let room = state.repo.create_room(fields).await?;
    Ok((StatusCode::CREATED, Json(RoomResponse { room })))
}

/// PATCH /api/rooms/:id - Update some fields of a room.
pub async fn update_room(
    State(state): State<AppState>,
    path: Result<Path<String>, PathRejection>,
    payload: Result<Json<UpdateRoomRequest>, JsonRejection>,
) -> ApiResult<RoomResponse> {
    let Path(id) = path?;
    let Json(changes) = payload?;

    if let Some(field) = changes.empty_field() {
        return Err(AppError::Validation(format!("{} cannot be empty", field)));
    }

    let room = state
        .repo
        .update_room(&id, &changes)
        .await?
        .ok_or_else(room_not_found)?;
    Ok(Json(RoomResponse { room }))
}

/// DELETE /api/rooms/:id - Delete a room.
pub async fn delete_room(
    State(state): State<AppState>,
    path: Result<Path<String>, PathRejection>,
) -> ApiResult<DeleteResponse> {
    let Path(id) = path?;
    if !state.repo.delete_room(&id).await? {
        return Err(room_not_found());
    }
    Ok(Json(DeleteResponse { success: true }))
}

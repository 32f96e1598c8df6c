//! Settings endpoints
//!
//! Small persisted preferences as a flat key-value store.

use axum::extract::{Path, State};
use axum::response::Json;

use crate::AppState;
use crate::api::{SetSettingRequest, SettingResponse};
use crate::error::AppError;

/// GET /api/settings/:key
pub async fn get_setting(
    State(state): State<AppState>,
    Path(key): Path<String>,
) -> Result<Json<SettingResponse>, AppError> {
    let value = state
        .db
        .get_setting(&key)
        .await?
        .ok_or(AppError::NotFound)?;

    Ok(Json(SettingResponse { key, value }))
}

/// PUT /api/settings/:key
pub async fn put_setting(
    State(state): State<AppState>,
    Path(key): Path<String>,
    Json(request): Json<SetSettingRequest>,
) -> Result<Json<SettingResponse>, AppError> {
    state.db.set_setting(&key, &request.value).await?;

    Ok(Json(SettingResponse {
        key,
        value: request.value,
    }))
}

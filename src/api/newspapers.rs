//! Saved newspaper endpoints

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::Json;
use chrono::Utc;

use crate::AppState;
use crate::api::{ListNewspapersQuery, NewspaperSummary, SaveNewspaperRequest};
use crate::content;
use crate::data::{EntityId, NewspaperData, SavedNewspaper};
use crate::error::AppError;
use crate::media::ImageCompressor;

/// GET /api/sample
///
/// The built-in fallback newspaper, available without any credential.
pub async fn sample_newspaper() -> Json<NewspaperData> {
    Json(content::sample_newspaper())
}

/// POST /api/newspapers
///
/// Persists a whole newspaper snapshot, optionally compressing its
/// images first.
pub async fn save_newspaper(
    State(state): State<AppState>,
    Json(request): Json<SaveNewspaperRequest>,
) -> Result<(StatusCode, Json<SavedNewspaper>), AppError> {
    if request.grade_level.is_empty() {
        return Err(AppError::Validation("gradeLevel is required".to_string()));
    }

    let mut data = request.data;
    if request.compress {
        let compressor = ImageCompressor::new(state.http_client.clone(), &state.config.media);
        compressor.compress_newspaper(&mut data).await;
    }

    let saved = SavedNewspaper {
        id: EntityId::new().0,
        created_at: Utc::now(),
        grade_level: request.grade_level,
        data,
    };
    state.db.save_newspaper(&saved).await?;

    tracing::info!(id = %saved.id, grade_level = %saved.grade_level, "Newspaper saved");

    Ok((StatusCode::CREATED, Json(saved)))
}

/// GET /api/newspapers
pub async fn list_newspapers(
    State(state): State<AppState>,
    Query(query): Query<ListNewspapersQuery>,
) -> Result<Json<Vec<NewspaperSummary>>, AppError> {
    let newspapers = match query.grade_level.as_deref() {
        Some(grade_level) => state.db.list_newspapers_by_grade(grade_level).await?,
        None => state.db.list_newspapers().await?,
    };

    let summaries = newspapers.iter().map(NewspaperSummary::from).collect();
    Ok(Json(summaries))
}

/// GET /api/newspapers/:id
pub async fn get_newspaper(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<SavedNewspaper>, AppError> {
    let newspaper = state
        .db
        .get_newspaper(&id)
        .await?
        .ok_or(AppError::NotFound)?;

    Ok(Json(newspaper))
}

/// DELETE /api/newspapers/:id
pub async fn delete_newspaper(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<StatusCode, AppError> {
    if !state.db.delete_newspaper(&id).await? {
        return Err(AppError::NotFound);
    }

    tracing::info!(id = %id, "Newspaper deleted");
    Ok(StatusCode::NO_CONTENT)
}

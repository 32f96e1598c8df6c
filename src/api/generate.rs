//! Newspaper generation endpoint

use axum::extract::State;
use axum::response::Json;

use crate::AppState;
use crate::api::GenerateRequest;
use crate::data::NewspaperData;
use crate::error::AppError;
use crate::genai::GenAiClient;
use crate::metrics::{HTTP_REQUEST_DURATION_SECONDS, HTTP_REQUESTS_TOTAL};
use crate::service::NewspaperService;

/// POST /api/generate
///
/// Validates inputs before any upstream call, then runs the full
/// orchestration with a client built from the caller's credential.
pub async fn generate_newspaper(
    State(state): State<AppState>,
    Json(request): Json<GenerateRequest>,
) -> Result<Json<NewspaperData>, AppError> {
    // Start timing the request
    let _timer = HTTP_REQUEST_DURATION_SECONDS
        .with_label_values(&["POST", "/api/generate"])
        .start_timer();

    tracing::info!("Newspaper generation requested");

    let api_key = request
        .api_key
        .filter(|key| !key.is_empty())
        .ok_or_else(|| AppError::Validation("apiKey is required".to_string()))?;
    let grade_level = request
        .grade_level
        .filter(|grade| !grade.is_empty())
        .ok_or_else(|| AppError::Validation("gradeLevel is required".to_string()))?;

    let client = GenAiClient::new(
        state.http_client.clone(),
        state.config.generation.api_base_url.clone(),
        api_key,
    );
    let service = NewspaperService::new(&client, &state.config.generation);

    let newspaper = service.generate(&grade_level).await?;

    tracing::info!(
        grade_level = %grade_level,
        articles = newspaper.articles.len(),
        "Newspaper generation complete"
    );

    // Record successful request
    HTTP_REQUESTS_TOTAL
        .with_label_values(&["POST", "/api/generate", "200"])
        .inc();

    Ok(Json(newspaper))
}

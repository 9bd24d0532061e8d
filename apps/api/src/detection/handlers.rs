use axum::{
    extract::{Multipart, State},
    Json,
};

use crate::detection::detector::DetectionResponse;
use crate::errors::AppError;
use crate::models::records::CropHealthCheck;
use crate::state::AppState;
use crate::uploads::take_file_field;

/// POST /api/disease-detect/
/// Multipart form with an `image` file field.
pub async fn handle_detect(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<DetectionResponse>, AppError> {
    let image = take_file_field(&mut multipart, "image").await?;
    let response = state.detector.detect(image).await?;
    Ok(Json(response))
}

/// GET /api/disease-detect/
/// All stored crop health checks, newest first.
pub async fn handle_list_checks(
    State(state): State<AppState>,
) -> Result<Json<Vec<CropHealthCheck>>, AppError> {
    let checks = state
        .store
        .list_crop_health_checks()
        .await
        .map_err(AppError::Internal)?;
    Ok(Json(checks))
}

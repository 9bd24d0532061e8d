use axum::{
    extract::{Multipart, State},
    Json,
};

use crate::errors::AppError;
use crate::models::records::VoiceQuery;
use crate::state::AppState;
use crate::uploads::take_file_field;
use crate::voice::advisor::VoiceQueryResponse;

/// POST /api/voice-query/
/// Multipart form with an `audio` file field.
pub async fn handle_voice_query(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<VoiceQueryResponse>, AppError> {
    let audio = take_file_field(&mut multipart, "audio").await?;
    let response = state.advisor.ask(audio).await?;
    Ok(Json(response))
}

/// GET /api/voice-query/
/// All stored voice queries, newest first.
pub async fn handle_list_queries(
    State(state): State<AppState>,
) -> Result<Json<Vec<VoiceQuery>>, AppError> {
    let queries = state
        .store
        .list_voice_queries()
        .await
        .map_err(AppError::Internal)?;
    Ok(Json(queries))
}

use axum::{
    extract::multipart::MultipartError,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum PreprocessError {
    #[error("No file part")]
    MissingFile,

    #[error("No selected file")]
    EmptyFileName,

    #[error("Invalid upload: {0}")]
    Upload(String),
}

impl From<MultipartError> for PreprocessError {
    fn from(e: MultipartError) -> Self {
        PreprocessError::Upload(e.body_text())
    }
}

impl IntoResponse for PreprocessError {
    fn into_response(self) -> Response {
        let code = match &self {
            PreprocessError::MissingFile | PreprocessError::EmptyFileName => "VALIDATION_ERROR",
            PreprocessError::Upload(_) => "INVALID_UPLOAD",
        };
        let body = Json(json!({
            "error": {
                "code": code,
                "message": self.to_string()
            }
        }));
        (StatusCode::BAD_REQUEST, body).into_response()
    }
}

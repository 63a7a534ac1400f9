use crate::models::{UploadResponse, UPLOAD_SUCCESS};
use crate::storage::NO_FILE_MESSAGE;
use crate::{AppError, AppState, Result};
use axum::{
    extract::{multipart::MultipartRejection, Multipart, State},
    Json,
};
use futures_util::TryStreamExt;
use std::io;
use std::sync::Arc;
use tokio_util::io::StreamReader;

/// Multipart field carrying the video.
pub const VIDEO_FIELD: &str = "video";

pub async fn upload_video(
    State(state): State<Arc<AppState>>,
    multipart: std::result::Result<Multipart, MultipartRejection>,
) -> Result<Json<UploadResponse>> {
    let mut multipart = multipart?;

    while let Some(field) = multipart.next_field().await? {
        if field.name() != Some(VIDEO_FIELD) {
            tracing::debug!("Skipping field: {:?}", field.name());
            continue;
        }

        // An empty name is rejected by the store before anything is opened.
        let filename = field.file_name().unwrap_or("").to_string();
        let content_type = field
            .content_type()
            .unwrap_or("application/octet-stream")
            .to_string();

        tracing::info!("Receiving upload {} ({})", filename, content_type);

        let reader = StreamReader::new(field.map_err(io::Error::other));
        tokio::pin!(reader);

        let stored = state
            .store
            .store(&filename, reader)
            .await
            .map_err(AppError::reattribute_body_error)?;

        tracing::info!(
            "Stored upload {} ({} bytes) at {:?}",
            stored.filename,
            stored.bytes_written,
            stored.path
        );

        return Ok(Json(UploadResponse {
            filename: stored.filename,
            detail: UPLOAD_SUCCESS.to_string(),
        }));
    }

    Err(AppError::BadRequest(NO_FILE_MESSAGE.to_string()))
}

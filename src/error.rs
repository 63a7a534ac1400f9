use axum::{
    extract::multipart::{MultipartError, MultipartRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, AppError>;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Not a multipart form: {0}")]
    NotMultipart(#[from] MultipartRejection),

    #[error("Multipart error: {0}")]
    Multipart(#[from] MultipartError),

    #[error("Storage error: {0}")]
    Storage(#[from] std::io::Error),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            AppError::BadRequest(msg) => {
                tracing::warn!("Bad request: {}", msg);
                (StatusCode::BAD_REQUEST, msg.clone())
            }
            AppError::NotMultipart(e) => {
                tracing::warn!("Not a multipart form: {}", e);
                (e.status(), e.body_text())
            }
            AppError::Multipart(e) => {
                tracing::warn!("Multipart error: {}", e);
                // A body stream that breaks off is the client's doing, even
                // though axum reports it as a server error.
                let status = if e.status().is_server_error() {
                    StatusCode::BAD_REQUEST
                } else {
                    e.status()
                };
                (status, e.body_text())
            }
            AppError::Storage(e) => {
                tracing::error!("Storage error: {}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Failed to store upload".to_string(),
                )
            }
        };

        (status, Json(json!({ "detail": message }))).into_response()
    }
}

impl AppError {
    /// Reattribute a failed copy to the request body when the I/O error
    /// came from reading the multipart stream rather than the disk.
    pub fn reattribute_body_error(self) -> Self {
        let AppError::Storage(err) = self else {
            return self;
        };

        if !err
            .get_ref()
            .is_some_and(|inner| inner.is::<MultipartError>())
        {
            return AppError::Storage(err);
        }

        match err.into_inner().map(|inner| inner.downcast::<MultipartError>()) {
            Some(Ok(multipart)) => AppError::Multipart(*multipart),
            _ => AppError::Storage(std::io::Error::other("multipart stream failed")),
        }
    }
}

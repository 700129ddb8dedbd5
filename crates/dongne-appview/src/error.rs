use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;

/// Application error type that converts to HTTP responses
#[derive(Debug)]
pub enum AppError {
    BadRequest(String),
    NotFound(String),
    Unauthorized,
    Internal(String),
    /// A core flow failure, answered with its user-facing message
    Core(dongne_core::Error),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
            AppError::Unauthorized => (StatusCode::UNAUTHORIZED, "Authentication required".into()),
            AppError::Internal(msg) => {
                tracing::error!(error = %msg, "Internal server error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal server error".into(),
                )
            }
            AppError::Core(e) => {
                use dongne_core::Error;
                let status = match &e {
                    Error::Unauthenticated => StatusCode::UNAUTHORIZED,
                    Error::IncompleteDraft => StatusCode::UNPROCESSABLE_ENTITY,
                    Error::RoomNotFound(_) => StatusCode::NOT_FOUND,
                    Error::Upload(_) => StatusCode::BAD_GATEWAY,
                    Error::Store(_) => {
                        tracing::error!(error = %e, "Store error");
                        StatusCode::INTERNAL_SERVER_ERROR
                    }
                };
                if matches!(e, Error::Upload(_)) {
                    tracing::error!(error = %e, "Upload error");
                }
                (status, e.user_message().to_string())
            }
        };

        (status, axum::Json(json!({ "error": message }))).into_response()
    }
}

impl From<dongne_core::Error> for AppError {
    fn from(e: dongne_core::Error) -> Self {
        AppError::Core(e)
    }
}

impl From<file_blob_store::BlobStoreError> for AppError {
    fn from(e: file_blob_store::BlobStoreError) -> Self {
        match e {
            file_blob_store::BlobStoreError::InvalidPath(path) => {
                AppError::BadRequest(format!("Invalid media path: {path}"))
            }
            other => AppError::Internal(other.to_string()),
        }
    }
}

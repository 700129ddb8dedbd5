use axum::body::Body;
use axum::extract::{Path, State};
use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};
use tracing::warn;

use crate::error::AppError;
use crate::state::AppState;

const DEFAULT_CACHE_CONTROL: &str = "public, max-age=86400";

/// GET /media/{bucket}/{*path}
/// Serves a stored blob with its recorded Content-Type and Cache-Control.
pub async fn serve(
    State(state): State<AppState>,
    Path((bucket, path)): Path<(String, String)>,
) -> Result<Response, AppError> {
    let (data, metadata) = match state.media.blobs().get(&bucket, &path).await? {
        Some(found) => found,
        None => {
            warn!(bucket = %bucket, path = %path, "Media not found");
            return Err(AppError::NotFound("Media not found".into()));
        }
    };

    let cache_control = metadata
        .cache_control
        .as_deref()
        .unwrap_or(DEFAULT_CACHE_CONTROL)
        .to_string();

    Ok(Response::builder()
        .status(StatusCode::OK)
        .header(header::CONTENT_TYPE, metadata.content_type)
        .header(header::CACHE_CONTROL, cache_control)
        .header(header::ETAG, format!("\"{}\"", metadata.sha256))
        .header(header::X_CONTENT_TYPE_OPTIONS, "nosniff")
        .body(Body::from(data))
        .unwrap_or_else(|_| StatusCode::INTERNAL_SERVER_ERROR.into_response()))
}

use axum::extract::{Path, State};
use axum::Json;
use dongne_core::constants::POST_FEED_LIMIT;
use dongne_core::post_feed::PostFeed;
use dongne_db::PostRow;

use crate::auth::AuthUser;
use crate::error::AppError;
use crate::state::AppState;

/// GET /api/posts
pub async fn list(State(state): State<AppState>) -> Result<Json<Vec<PostRow>>, AppError> {
    let feed = PostFeed::load(state.store.as_ref(), POST_FEED_LIMIT).await?;
    Ok(Json(feed.into_posts()))
}

/// DELETE /api/posts/{id}
/// Returns the reloaded feed.
pub async fn delete(
    State(state): State<AppState>,
    _user: AuthUser,
    Path(id): Path<String>,
) -> Result<Json<Vec<PostRow>>, AppError> {
    let mut feed = PostFeed::load(state.store.as_ref(), POST_FEED_LIMIT).await?;
    if !feed.delete(&id).await? {
        return Err(AppError::NotFound(format!("Post not found: {id}")));
    }
    Ok(Json(feed.into_posts()))
}

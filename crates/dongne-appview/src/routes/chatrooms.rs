use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use dongne_core::chat_rooms::{create_room, ChatRoomList};
use dongne_db::ChatRoomRow;
use serde::Deserialize;
use ts_rs::TS;

use super::ImagePayload;
use crate::auth::AuthUser;
use crate::error::AppError;
use crate::state::AppState;

#[derive(Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export, export_to = "bindings/")]
pub struct CreateRoomRequest {
    title: String,
    #[ts(optional)]
    image: Option<ImagePayload>,
}

/// GET /api/chatrooms
pub async fn list(State(state): State<AppState>) -> Result<Json<Vec<ChatRoomRow>>, AppError> {
    let rooms = ChatRoomList::load(state.store.as_ref()).await?;
    Ok(Json(rooms.into_rooms()))
}

/// POST /api/chatrooms
/// 201 with the new room, or 204 when the title is blank.
pub async fn create(
    State(state): State<AppState>,
    user: AuthUser,
    Json(body): Json<CreateRoomRequest>,
) -> Result<Response, AppError> {
    if body.title.trim().is_empty() {
        return Ok(StatusCode::NO_CONTENT.into_response());
    }
    let image = body.image.map(ImagePayload::decode).transpose()?;

    let created = create_room(
        state.store.as_ref(),
        state.media.as_ref(),
        &user.id,
        &body.title,
        image.as_ref(),
    )
    .await?;

    Ok(match created {
        Some(room) => (StatusCode::CREATED, Json(room)).into_response(),
        None => StatusCode::NO_CONTENT.into_response(),
    })
}

/// DELETE /api/chatrooms/{id}
/// Returns the remaining rooms.
pub async fn delete(
    State(state): State<AppState>,
    _user: AuthUser,
    Path(id): Path<String>,
) -> Result<Json<Vec<ChatRoomRow>>, AppError> {
    let mut rooms = ChatRoomList::load(state.store.as_ref()).await?;
    if !rooms.delete(&id).await? {
        return Err(AppError::NotFound(format!("Chat room not found: {id}")));
    }
    Ok(Json(rooms.into_rooms()))
}

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use dongne_core::chat_feed::{send_message, ChatFeed, OutgoingMessage};
use dongne_core::store::ChatRoomStore;
use dongne_db::{ChatRoomRow, MessageRow};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use super::ImagePayload;
use crate::auth::AuthUser;
use crate::error::AppError;
use crate::state::AppState;

#[derive(Serialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct ChatFeedResponse {
    room: ChatRoomRow,
    messages: Vec<MessageRow>,
}

#[derive(Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export, export_to = "bindings/")]
pub struct SendMessageRequest {
    #[ts(optional)]
    content: Option<String>,
    #[ts(optional)]
    image: Option<ImagePayload>,
}

/// GET /api/chatrooms/{id}/messages
pub async fn list(
    State(state): State<AppState>,
    Path(room_id): Path<String>,
) -> Result<Json<ChatFeedResponse>, AppError> {
    let feed = ChatFeed::load(state.store.as_ref(), state.media.as_ref(), &room_id).await?;
    let room = feed.room().clone();
    Ok(Json(ChatFeedResponse {
        room,
        messages: feed.into_messages(),
    }))
}

/// POST /api/chatrooms/{id}/messages
/// 201 with the inserted message, or 204 for an empty one.
pub async fn send(
    State(state): State<AppState>,
    user: AuthUser,
    Path(room_id): Path<String>,
    Json(body): Json<SendMessageRequest>,
) -> Result<Response, AppError> {
    let outgoing = OutgoingMessage {
        content: body.content.unwrap_or_default(),
        image: body.image.map(ImagePayload::decode).transpose()?,
    };
    if outgoing.is_empty() {
        return Ok(StatusCode::NO_CONTENT.into_response());
    }

    state
        .store
        .get_room(&room_id)
        .await
        .map_err(dongne_core::Error::from)?
        .ok_or_else(|| dongne_core::Error::RoomNotFound(room_id.clone()))?;

    let sent = send_message(
        state.store.as_ref(),
        state.media.as_ref(),
        &room_id,
        &user.id,
        outgoing,
    )
    .await?;

    Ok(match sent {
        Some(message) => (StatusCode::CREATED, Json(message)).into_response(),
        None => StatusCode::NO_CONTENT.into_response(),
    })
}

//! One chat room's message history

use chrono::Utc;
use dongne_db::{ChatRoomRow, MessageRow, NewMessage};
use serde::Deserialize;
use tracing::{debug, info, warn};

use crate::constants::{CHAT_IMAGES_BUCKET, MESSAGE_IMAGE_PREFIX};
use crate::error::{Error, Result};
use crate::store::{timestamped_path, ChatRoomStore, ImageUpload, MediaStore, MessageStore};

/// A message about to be sent
#[derive(Debug, Clone, Default, Deserialize)]
pub struct OutgoingMessage {
    pub content: String,
    pub image: Option<ImageUpload>,
}

impl OutgoingMessage {
    pub fn is_empty(&self) -> bool {
        self.content.trim().is_empty() && self.image.is_none()
    }
}

/// Upload the attachment (if any), then insert the message row.
///
/// Returns `Ok(None)` for an empty message. If the upload fails nothing is
/// inserted.
pub async fn send_message<S, M>(
    store: &S,
    media: &M,
    room_id: &str,
    user_id: &str,
    outgoing: OutgoingMessage,
) -> Result<Option<MessageRow>>
where
    S: MessageStore + ?Sized,
    M: MediaStore + ?Sized,
{
    if outgoing.is_empty() {
        return Ok(None);
    }

    let chat_img_url = match &outgoing.image {
        Some(image) => {
            let path = timestamped_path(MESSAGE_IMAGE_PREFIX, image, "bin", Utc::now());
            let url = media
                .upload(CHAT_IMAGES_BUCKET, &path, &image.data, &image.content_type, None)
                .await
                .map_err(|e| {
                    warn!(room_id, path = %path, error = %e, "Message image upload failed");
                    Error::Upload(e)
                })?;
            Some(url)
        }
        None => None,
    };

    let row = store
        .insert_message(&NewMessage {
            room_id: room_id.to_string(),
            user_id: user_id.to_string(),
            content: outgoing.content,
            chat_img_url,
            created_at: Utc::now(),
        })
        .await?;

    info!(room_id, id = %row.id, "Sent message");
    Ok(Some(row))
}

/// A room plus its messages, loaded once and appended to on send
pub struct ChatFeed<'a, S: ?Sized, M: ?Sized> {
    store: &'a S,
    media: &'a M,
    room: ChatRoomRow,
    messages: Vec<MessageRow>,
}

impl<'a, S, M> ChatFeed<'a, S, M>
where
    S: ChatRoomStore + MessageStore + ?Sized,
    M: MediaStore + ?Sized,
{
    /// Load the room and its history, oldest first
    pub async fn load(store: &'a S, media: &'a M, room_id: &str) -> Result<Self> {
        let room = store
            .get_room(room_id)
            .await?
            .ok_or_else(|| Error::RoomNotFound(room_id.to_string()))?;
        let messages = store.list_messages(room_id).await?;

        debug!(room_id, count = messages.len(), "Loaded chat feed");

        Ok(Self {
            store,
            media,
            room,
            messages,
        })
    }

    pub fn room(&self) -> &ChatRoomRow {
        &self.room
    }

    pub fn messages(&self) -> &[MessageRow] {
        &self.messages
    }

    pub fn into_messages(self) -> Vec<MessageRow> {
        self.messages
    }

    /// Send and append the inserted row without re-fetching
    pub async fn send(
        &mut self,
        user_id: &str,
        outgoing: OutgoingMessage,
    ) -> Result<Option<&MessageRow>> {
        let sent = send_message(self.store, self.media, &self.room.id, user_id, outgoing).await?;
        match sent {
            Some(row) => {
                self.messages.push(row);
                Ok(self.messages.last())
            }
            None => Ok(None),
        }
    }
}

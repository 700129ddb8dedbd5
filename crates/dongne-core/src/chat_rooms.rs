//! Chat room list

use chrono::Utc;
use dongne_db::{ChatRoomRow, NewChatRoom};
use tracing::{info, warn};

use crate::constants::{CHAT_IMAGES_BUCKET, DEFAULT_ROOM_IMAGE, ROOM_IMAGE_PREFIX};
use crate::error::{Error, Result};
use crate::store::{timestamped_path, ChatRoomStore, ImageUpload, MediaStore};

/// Create a room led by `leader_id`.
///
/// A blank title creates nothing. The cover image is uploaded before the row
/// is written; rooms without one get the default cover.
pub async fn create_room<S, M>(
    store: &S,
    media: &M,
    leader_id: &str,
    title: &str,
    image: Option<&ImageUpload>,
) -> Result<Option<ChatRoomRow>>
where
    S: ChatRoomStore + ?Sized,
    M: MediaStore + ?Sized,
{
    let title = title.trim();
    if title.is_empty() {
        return Ok(None);
    }

    let image_url = match image {
        Some(image) => {
            let path = timestamped_path(ROOM_IMAGE_PREFIX, image, "bin", Utc::now());
            media
                .upload(CHAT_IMAGES_BUCKET, &path, &image.data, &image.content_type, None)
                .await
                .map_err(|e| {
                    warn!(path = %path, error = %e, "Room image upload failed");
                    Error::Upload(e)
                })?
        }
        None => DEFAULT_ROOM_IMAGE.to_string(),
    };

    let row = store
        .insert_room(&NewChatRoom {
            title: title.to_string(),
            image_url,
            leader_id: leader_id.to_string(),
            created_at: Utc::now(),
        })
        .await?;

    info!(id = %row.id, leader_id, "Created chat room");
    Ok(Some(row))
}

pub struct ChatRoomList<'a, S: ?Sized> {
    store: &'a S,
    rooms: Vec<ChatRoomRow>,
}

impl<'a, S: ChatRoomStore + ?Sized> ChatRoomList<'a, S> {
    /// Newest room first
    pub async fn load(store: &'a S) -> Result<Self> {
        let rooms = store.list_rooms().await?;
        Ok(Self { store, rooms })
    }

    pub fn rooms(&self) -> &[ChatRoomRow] {
        &self.rooms
    }

    pub fn into_rooms(self) -> Vec<ChatRoomRow> {
        self.rooms
    }

    pub async fn create<M: MediaStore + ?Sized>(
        &mut self,
        media: &M,
        leader_id: &str,
        title: &str,
        image: Option<&ImageUpload>,
    ) -> Result<Option<&ChatRoomRow>> {
        let created = create_room(self.store, media, leader_id, title, image).await?;
        match created {
            Some(row) => {
                self.rooms.insert(0, row);
                Ok(self.rooms.first())
            }
            None => Ok(None),
        }
    }

    /// Returns false when the room was already gone
    pub async fn delete(&mut self, id: &str) -> Result<bool> {
        let deleted = self.store.delete_room(id).await?;
        self.rooms.retain(|r| r.id != id);
        if deleted {
            info!(id, "Deleted chat room");
        }
        Ok(deleted)
    }
}

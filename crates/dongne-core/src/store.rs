//! Row and media storage seams

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use dongne_db::{ChatRoomRow, MessageRow, NewChatRoom, NewMessage, NewPost, PostRow};
use serde::Deserialize;

use crate::error::StoreError;

#[async_trait]
pub trait PostStore: Send + Sync {
    async fn insert_post(&self, post: &NewPost) -> Result<PostRow, StoreError>;
    /// Newest first
    async fn list_posts(&self, limit: i64) -> Result<Vec<PostRow>, StoreError>;
    async fn delete_post(&self, id: &str) -> Result<bool, StoreError>;
}

#[async_trait]
pub trait ChatRoomStore: Send + Sync {
    async fn insert_room(&self, room: &NewChatRoom) -> Result<ChatRoomRow, StoreError>;
    async fn get_room(&self, id: &str) -> Result<Option<ChatRoomRow>, StoreError>;
    /// Newest first
    async fn list_rooms(&self) -> Result<Vec<ChatRoomRow>, StoreError>;
    async fn delete_room(&self, id: &str) -> Result<bool, StoreError>;
}

#[async_trait]
pub trait MessageStore: Send + Sync {
    async fn insert_message(&self, message: &NewMessage) -> Result<MessageRow, StoreError>;
    /// Oldest first
    async fn list_messages(&self, room_id: &str) -> Result<Vec<MessageRow>, StoreError>;
}

/// Object storage returning publicly resolvable URLs
#[async_trait]
pub trait MediaStore: Send + Sync {
    async fn upload(
        &self,
        bucket: &str,
        path: &str,
        data: &[u8],
        content_type: &str,
        cache_control: Option<&str>,
    ) -> Result<String, StoreError>;
}

/// An image picked by the user, not yet stored
#[derive(Debug, Clone, Deserialize)]
pub struct ImageUpload {
    pub file_name: String,
    pub content_type: String,
    pub data: Vec<u8>,
}

impl ImageUpload {
    /// Extension of the original file name, if it has one
    pub fn extension(&self) -> Option<&str> {
        self.file_name
            .rsplit_once('.')
            .map(|(_, ext)| ext)
            .filter(|ext| !ext.is_empty() && !ext.contains('/'))
    }
}

/// Storage path `<prefix>/<millis>.<ext>` for a new upload
pub fn timestamped_path(
    prefix: &str,
    image: &ImageUpload,
    fallback_ext: &str,
    now: DateTime<Utc>,
) -> String {
    let ext = image.extension().unwrap_or(fallback_ext);
    format!("{}/{}.{}", prefix, now.timestamp_millis(), ext)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn image(name: &str) -> ImageUpload {
        ImageUpload {
            file_name: name.into(),
            content_type: "image/jpeg".into(),
            data: vec![1, 2, 3],
        }
    }

    #[test]
    fn test_timestamped_path_keeps_extension() {
        let now = Utc.timestamp_millis_opt(1_700_000_000_123).unwrap();
        assert_eq!(
            timestamped_path("messages", &image("cat.photo.jpeg"), "png", now),
            "messages/1700000000123.jpeg"
        );
    }

    #[test]
    fn test_timestamped_path_falls_back() {
        let now = Utc.timestamp_millis_opt(1_700_000_000_000).unwrap();
        assert_eq!(
            timestamped_path("thumbnail", &image("IMG_0001"), "png", now),
            "thumbnail/1700000000000.png"
        );
        assert_eq!(
            timestamped_path("thumbnail", &image("trailing."), "png", now),
            "thumbnail/1700000000000.png"
        );
    }
}

//! PostgreSQL and file-backed implementations of the core storage traits

use async_trait::async_trait;
use dongne_core::error::StoreError;
use dongne_core::store::{ChatRoomStore, MediaStore, MessageStore, PostStore};
use dongne_db::{ChatRoomRow, MessageRow, NewChatRoom, NewMessage, NewPost, PostRow};
use file_blob_store::{BlobStore, BlobStoreError};
use sqlx::postgres::PgPool;
use std::sync::Arc;

/// Row storage over the dongne-db queries
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl PostStore for PgStore {
    async fn insert_post(&self, post: &NewPost) -> Result<PostRow, StoreError> {
        dongne_db::posts::insert(&self.pool, post)
            .await
            .map_err(StoreError::backend)
    }

    async fn list_posts(&self, limit: i64) -> Result<Vec<PostRow>, StoreError> {
        dongne_db::posts::list_recent(&self.pool, limit)
            .await
            .map_err(StoreError::backend)
    }

    async fn delete_post(&self, id: &str) -> Result<bool, StoreError> {
        dongne_db::posts::delete(&self.pool, id)
            .await
            .map_err(StoreError::backend)
    }
}

#[async_trait]
impl ChatRoomStore for PgStore {
    async fn insert_room(&self, room: &NewChatRoom) -> Result<ChatRoomRow, StoreError> {
        dongne_db::chatrooms::insert(&self.pool, room)
            .await
            .map_err(StoreError::backend)
    }

    async fn get_room(&self, id: &str) -> Result<Option<ChatRoomRow>, StoreError> {
        dongne_db::chatrooms::get(&self.pool, id)
            .await
            .map_err(StoreError::backend)
    }

    async fn list_rooms(&self) -> Result<Vec<ChatRoomRow>, StoreError> {
        dongne_db::chatrooms::list_recent(&self.pool)
            .await
            .map_err(StoreError::backend)
    }

    async fn delete_room(&self, id: &str) -> Result<bool, StoreError> {
        dongne_db::chatrooms::delete(&self.pool, id)
            .await
            .map_err(StoreError::backend)
    }
}

#[async_trait]
impl MessageStore for PgStore {
    async fn insert_message(&self, message: &NewMessage) -> Result<MessageRow, StoreError> {
        dongne_db::messages::insert(&self.pool, message)
            .await
            .map_err(StoreError::backend)
    }

    async fn list_messages(&self, room_id: &str) -> Result<Vec<MessageRow>, StoreError> {
        dongne_db::messages::list_for_room(&self.pool, room_id)
            .await
            .map_err(StoreError::backend)
    }
}

/// Media storage on the local blob store
pub struct FileMedia {
    blobs: Arc<BlobStore>,
}

impl FileMedia {
    pub fn new(blobs: Arc<BlobStore>) -> Self {
        Self { blobs }
    }

    pub fn blobs(&self) -> &BlobStore {
        &self.blobs
    }
}

#[async_trait]
impl MediaStore for FileMedia {
    async fn upload(
        &self,
        bucket: &str,
        path: &str,
        data: &[u8],
        content_type: &str,
        cache_control: Option<&str>,
    ) -> Result<String, StoreError> {
        match self
            .blobs
            .upload(bucket, path, data, content_type, cache_control)
            .await
        {
            Ok(stored) => Ok(stored.public_url),
            Err(BlobStoreError::AlreadyExists(path)) => Err(StoreError::Conflict(path)),
            Err(e) => Err(StoreError::backend(e)),
        }
    }
}

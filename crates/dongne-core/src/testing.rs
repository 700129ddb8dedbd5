//! In-memory doubles for the storage and geocoding seams

use async_trait::async_trait;
use chrono::Duration as ChronoDuration;
use dongne_db::{ChatRoomRow, MessageRow, NewChatRoom, NewMessage, NewPost, PostRow};
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use crate::error::StoreError;
use crate::geo::{Coordinates, GeocodeError, Geocoder, RegionAddress};
use crate::store::{ChatRoomStore, MediaStore, MessageStore, PostStore};

#[derive(Default)]
pub(crate) struct StubGeocoder {
    results: HashMap<String, Vec<String>>,
    delays: HashMap<String, Duration>,
    region: Option<RegionAddress>,
    fail: bool,
    calls: Arc<AtomicUsize>,
}

impl StubGeocoder {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn failing() -> Self {
        Self {
            fail: true,
            ..Self::default()
        }
    }

    pub(crate) fn with_results<S: AsRef<str>>(mut self, query: &str, results: &[S]) -> Self {
        self.results.insert(
            query.to_string(),
            results.iter().map(|s| s.as_ref().to_string()).collect(),
        );
        self
    }

    pub(crate) fn with_delay(mut self, query: &str, delay: Duration) -> Self {
        self.delays.insert(query.to_string(), delay);
        self
    }

    pub(crate) fn with_region(mut self, r1: &str, r2: &str, r3: &str) -> Self {
        self.region = Some(RegionAddress {
            region_1depth_name: r1.into(),
            region_2depth_name: r2.into(),
            region_3depth_name: r3.into(),
        });
        self
    }

    pub(crate) fn calls(&self) -> Arc<AtomicUsize> {
        self.calls.clone()
    }
}

#[async_trait]
impl Geocoder for StubGeocoder {
    async fn search_by_keyword(&self, query: &str) -> Result<Vec<String>, GeocodeError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if let Some(delay) = self.delays.get(query) {
            tokio::time::sleep(*delay).await;
        }
        if self.fail {
            return Err(GeocodeError);
        }
        Ok(self.results.get(query).cloned().unwrap_or_default())
    }

    async fn reverse_geocode(
        &self,
        _coords: Coordinates,
    ) -> Result<Option<RegionAddress>, GeocodeError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.fail {
            return Err(GeocodeError);
        }
        Ok(self.region.clone())
    }
}

/// Row store keeping everything in vectors. Ids are sequential.
#[derive(Default)]
pub(crate) struct MemoryStore {
    pub(crate) posts: Mutex<Vec<PostRow>>,
    pub(crate) rooms: Mutex<Vec<ChatRoomRow>>,
    pub(crate) messages: Mutex<Vec<MessageRow>>,
    next_id: AtomicUsize,
    pub(crate) fail_writes: bool,
}

impl MemoryStore {
    pub(crate) fn failing_writes() -> Self {
        Self {
            fail_writes: true,
            ..Self::default()
        }
    }

    fn id(&self, prefix: &str) -> String {
        format!("{}-{}", prefix, self.next_id.fetch_add(1, Ordering::SeqCst) + 1)
    }

    fn check_write(&self) -> Result<(), StoreError> {
        if self.fail_writes {
            return Err(StoreError::backend(std::io::Error::other("write refused")));
        }
        Ok(())
    }

    pub(crate) fn seed_room(&self, id: &str, title: &str, minutes_ago: i64) -> ChatRoomRow {
        let row = ChatRoomRow {
            id: id.to_string(),
            title: title.to_string(),
            image_url: crate::constants::DEFAULT_ROOM_IMAGE.to_string(),
            leader_id: "leader".to_string(),
            created_at: chrono::Utc::now() - ChronoDuration::minutes(minutes_ago),
        };
        self.rooms.lock().unwrap().push(row.clone());
        row
    }

    pub(crate) fn seed_message(&self, room_id: &str, content: &str, minutes_ago: i64) {
        let row = MessageRow {
            id: self.id("m"),
            room_id: room_id.to_string(),
            user_id: "someone".to_string(),
            content: content.to_string(),
            chat_img_url: None,
            created_at: chrono::Utc::now() - ChronoDuration::minutes(minutes_ago),
        };
        self.messages.lock().unwrap().push(row);
    }
}

#[async_trait]
impl PostStore for MemoryStore {
    async fn insert_post(&self, post: &NewPost) -> Result<PostRow, StoreError> {
        self.check_write()?;
        let row = PostRow {
            id: self.id("p"),
            user_id: post.user_id.clone(),
            title: post.title.clone(),
            content: post.content.clone(),
            upload_place: post.upload_place.clone(),
            latitude: post.latitude,
            longitude: post.longitude,
            body_size: post.body_size.to_vec(),
            thumbnail: post.thumbnail.clone(),
            tags: post.tags.clone(),
            comments: 0,
            likes: 0,
            view: 0,
            created_at: post.created_at,
        };
        self.posts.lock().unwrap().push(row.clone());
        Ok(row)
    }

    async fn list_posts(&self, limit: i64) -> Result<Vec<PostRow>, StoreError> {
        let mut posts = self.posts.lock().unwrap().clone();
        posts.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        posts.truncate(limit.max(0) as usize);
        Ok(posts)
    }

    async fn delete_post(&self, id: &str) -> Result<bool, StoreError> {
        self.check_write()?;
        let mut posts = self.posts.lock().unwrap();
        let before = posts.len();
        posts.retain(|p| p.id != id);
        Ok(posts.len() != before)
    }
}

#[async_trait]
impl ChatRoomStore for MemoryStore {
    async fn insert_room(&self, room: &NewChatRoom) -> Result<ChatRoomRow, StoreError> {
        self.check_write()?;
        let row = ChatRoomRow {
            id: self.id("r"),
            title: room.title.clone(),
            image_url: room.image_url.clone(),
            leader_id: room.leader_id.clone(),
            created_at: room.created_at,
        };
        self.rooms.lock().unwrap().push(row.clone());
        Ok(row)
    }

    async fn get_room(&self, id: &str) -> Result<Option<ChatRoomRow>, StoreError> {
        Ok(self.rooms.lock().unwrap().iter().find(|r| r.id == id).cloned())
    }

    async fn list_rooms(&self) -> Result<Vec<ChatRoomRow>, StoreError> {
        let mut rooms = self.rooms.lock().unwrap().clone();
        rooms.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(rooms)
    }

    async fn delete_room(&self, id: &str) -> Result<bool, StoreError> {
        self.check_write()?;
        let mut rooms = self.rooms.lock().unwrap();
        let before = rooms.len();
        rooms.retain(|r| r.id != id);
        Ok(rooms.len() != before)
    }
}

#[async_trait]
impl MessageStore for MemoryStore {
    async fn insert_message(&self, message: &NewMessage) -> Result<MessageRow, StoreError> {
        self.check_write()?;
        let row = MessageRow {
            id: self.id("m"),
            room_id: message.room_id.clone(),
            user_id: message.user_id.clone(),
            content: message.content.clone(),
            chat_img_url: message.chat_img_url.clone(),
            created_at: message.created_at,
        };
        self.messages.lock().unwrap().push(row.clone());
        Ok(row)
    }

    async fn list_messages(&self, room_id: &str) -> Result<Vec<MessageRow>, StoreError> {
        let mut messages: Vec<MessageRow> = self
            .messages
            .lock()
            .unwrap()
            .iter()
            .filter(|m| m.room_id == room_id)
            .cloned()
            .collect();
        messages.sort_by(|a, b| a.created_at.cmp(&b.created_at));
        Ok(messages)
    }
}

/// Media store recording uploads, optionally refusing all of them
#[derive(Default)]
pub(crate) struct MemoryMedia {
    pub(crate) uploads: Mutex<Vec<(String, String, Option<String>)>>,
    pub(crate) fail: bool,
}

impl MemoryMedia {
    pub(crate) fn failing() -> Self {
        Self {
            fail: true,
            ..Self::default()
        }
    }

    pub(crate) fn upload_count(&self) -> usize {
        self.uploads.lock().unwrap().len()
    }
}

#[async_trait]
impl MediaStore for MemoryMedia {
    async fn upload(
        &self,
        bucket: &str,
        path: &str,
        _data: &[u8],
        _content_type: &str,
        cache_control: Option<&str>,
    ) -> Result<String, StoreError> {
        if self.fail {
            return Err(StoreError::backend(std::io::Error::other("bucket unavailable")));
        }
        self.uploads.lock().unwrap().push((
            bucket.to_string(),
            path.to_string(),
            cache_control.map(str::to_string),
        ));
        Ok(format!("http://media.test/media/{bucket}/{path}"))
    }
}

pub(crate) fn image(name: &str) -> crate::store::ImageUpload {
    crate::store::ImageUpload {
        file_name: name.to_string(),
        content_type: "image/png".to_string(),
        data: vec![0x89, 0x50, 0x4e, 0x47],
    }
}

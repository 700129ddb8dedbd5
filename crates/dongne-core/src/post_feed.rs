//! Post feed and submission

use chrono::Utc;
use dongne_db::PostRow;
use tracing::{info, warn};

use crate::constants::{
    DEFAULT_THUMBNAIL_EXTENSION, POST_IMAGES_BUCKET, THUMBNAIL_CACHE_CONTROL, THUMBNAIL_PREFIX,
};
use crate::error::{Error, Result};
use crate::post_draft::PostDraft;
use crate::store::{timestamped_path, ImageUpload, MediaStore, PostStore};

/// Store a draft thumbnail and return its public URL. Existing paths are
/// never overwritten.
pub async fn upload_thumbnail<M: MediaStore + ?Sized>(
    media: &M,
    image: &ImageUpload,
) -> Result<String> {
    let path = timestamped_path(
        THUMBNAIL_PREFIX,
        image,
        DEFAULT_THUMBNAIL_EXTENSION,
        Utc::now(),
    );
    let url = media
        .upload(
            POST_IMAGES_BUCKET,
            &path,
            &image.data,
            &image.content_type,
            Some(THUMBNAIL_CACHE_CONTROL),
        )
        .await
        .map_err(|e| {
            warn!(path = %path, error = %e, "Thumbnail upload failed");
            Error::Upload(e)
        })?;

    info!(url = %url, "Uploaded thumbnail");
    Ok(url)
}

/// Insert the draft as a new post by `user`. Nothing is written unless a
/// user is signed in and the draft is complete.
pub async fn submit_post<S: PostStore + ?Sized>(
    store: &S,
    draft: &PostDraft,
    user: Option<&str>,
) -> Result<PostRow> {
    let user_id = user.ok_or(Error::Unauthenticated)?;
    let post = draft.to_new_post(user_id, Utc::now())?;
    let row = store.insert_post(&post).await?;
    info!(id = %row.id, user_id, "Submitted post");
    Ok(row)
}

pub struct PostFeed<'a, S: ?Sized> {
    store: &'a S,
    limit: i64,
    posts: Vec<PostRow>,
}

impl<'a, S: PostStore + ?Sized> PostFeed<'a, S> {
    /// Most recent `limit` posts, newest first
    pub async fn load(store: &'a S, limit: i64) -> Result<Self> {
        let posts = store.list_posts(limit).await?;
        Ok(Self {
            store,
            limit,
            posts,
        })
    }

    pub fn posts(&self) -> &[PostRow] {
        &self.posts
    }

    pub fn into_posts(self) -> Vec<PostRow> {
        self.posts
    }

    async fn reload(&mut self) -> Result<()> {
        self.posts = self.store.list_posts(self.limit).await?;
        Ok(())
    }

    pub async fn submit(&mut self, draft: &PostDraft, user: Option<&str>) -> Result<PostRow> {
        let row = submit_post(self.store, draft, user).await?;
        self.reload().await?;
        Ok(row)
    }

    pub async fn delete(&mut self, id: &str) -> Result<bool> {
        let deleted = self.store.delete_post(id).await?;
        if deleted {
            info!(id, "Deleted post");
        }
        self.reload().await?;
        Ok(deleted)
    }
}

use chrono::{DateTime, Utc};
use dongne_core::geo::Geocoder;
use dongne_core::post_draft::PostDraft;
use file_blob_store::BlobStore;
use moka::future::Cache;
use moka::ops::compute::{CompResult, Op};
use sqlx::postgres::PgPool;
use std::sync::Arc;
use std::time::Duration;

use crate::stores::{FileMedia, PgStore};

/// Shared application state passed to all route handlers
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<PgStore>,
    pub media: Arc<FileMedia>,
    pub geocoder: Arc<dyn Geocoder>,
    /// In-progress drafts keyed by user id
    pub drafts: Cache<String, PostDraft>,
    pub started_at: DateTime<Utc>,
}

impl AppState {
    pub fn new(
        pool: PgPool,
        blobs: Arc<BlobStore>,
        geocoder: Arc<dyn Geocoder>,
        draft_ttl: Duration,
    ) -> Self {
        Self {
            store: Arc::new(PgStore::new(pool)),
            media: Arc::new(FileMedia::new(blobs)),
            geocoder,
            drafts: Cache::builder()
                .max_capacity(10_000)
                .time_to_live(draft_ttl)
                .build(),
            started_at: Utc::now(),
        }
    }

    /// Current draft for `user_id`, empty if none is cached
    pub async fn draft(&self, user_id: &str) -> PostDraft {
        self.drafts.get(user_id).await.unwrap_or_default()
    }

    /// Apply `update` to the latest draft for `user_id` and store the result.
    /// Updates for one user run one at a time; an empty result drops the entry.
    pub async fn update_draft<F>(&self, user_id: &str, update: F) -> PostDraft
    where
        F: FnOnce(PostDraft) -> PostDraft,
    {
        let outcome = self
            .drafts
            .entry_by_ref(user_id)
            .and_compute_with(|current| {
                let draft = update(current.map(|e| e.into_value()).unwrap_or_default());
                let op = if draft == PostDraft::default() {
                    Op::Remove
                } else {
                    Op::Put(draft)
                };
                std::future::ready(op)
            })
            .await;

        match outcome {
            CompResult::Inserted(entry)
            | CompResult::ReplacedWith(entry)
            | CompResult::Unchanged(entry) => entry.into_value(),
            CompResult::Removed(_) | CompResult::StillNone(_) => PostDraft::default(),
        }
    }
}

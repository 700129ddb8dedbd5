//! Blob store types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Metadata sidecar written next to every blob
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BlobMetadata {
    pub content_type: String,
    pub cache_control: Option<String>,
    pub size: u64,
    pub sha256: String,
    pub created_at: DateTime<Utc>,
}

/// Result of a successful upload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoredBlob {
    pub bucket: String,
    pub path: String,
    pub public_url: String,
    pub metadata: BlobMetadata,
}

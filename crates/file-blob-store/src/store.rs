//! Bucketed blob storage on the local filesystem

use crate::error::{BlobStoreError, Result};
use crate::types::{BlobMetadata, StoredBlob};
use chrono::Utc;
use sha2::{Digest, Sha256};
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tokio::fs;
use tokio::io::{AsyncWrite, AsyncWriteExt};
use tracing::{debug, info, warn};

const METADATA_SUFFIX: &str = ".meta.json";

/// File-based blob store
pub struct BlobStore {
    root: PathBuf,
    public_base_url: String,
}

impl BlobStore {
    /// Create a store rooted at `root`, publishing URLs under `public_base_url`
    pub fn new(root: PathBuf, public_base_url: &str) -> Self {
        Self {
            root,
            public_base_url: public_base_url.trim_end_matches('/').to_string(),
        }
    }

    /// Ensure the root directory exists
    pub async fn init(&self) -> Result<()> {
        fs::create_dir_all(&self.root).await?;
        info!(root = ?self.root, "Blob store ready");
        Ok(())
    }

    /// Public URL a stored blob is served from
    pub fn public_url(&self, bucket: &str, path: &str) -> String {
        format!("{}/media/{}/{}", self.public_base_url, bucket, path)
    }

    /// Upload a blob. Existing paths are never overwritten.
    pub async fn upload(
        &self,
        bucket: &str,
        path: &str,
        data: &[u8],
        content_type: &str,
        cache_control: Option<&str>,
    ) -> Result<StoredBlob> {
        let file_path = self.resolve(bucket, path)?;

        if let Some(parent) = file_path.parent() {
            fs::create_dir_all(parent).await?;
        }

        let mut file = match fs::OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(&file_path)
            .await
        {
            Ok(f) => f,
            Err(e) if e.kind() == ErrorKind::AlreadyExists => {
                return Err(BlobStoreError::AlreadyExists(format!("{bucket}/{path}")));
            }
            Err(e) => return Err(e.into()),
        };
        write_or_discard(&mut file, &file_path, data).await?;

        let metadata = BlobMetadata {
            content_type: content_type.to_string(),
            cache_control: cache_control.map(str::to_string),
            size: data.len() as u64,
            sha256: hex::encode(Sha256::digest(data)),
            created_at: Utc::now(),
        };
        let sidecar = serde_json::to_vec(&metadata)?;
        if let Err(e) = fs::write(metadata_path(&file_path), sidecar).await {
            // Without metadata the blob can't be served; drop it
            let _ = fs::remove_file(&file_path).await;
            return Err(e.into());
        }

        debug!(bucket, path, size = metadata.size, "Stored blob");

        Ok(StoredBlob {
            bucket: bucket.to_string(),
            path: path.to_string(),
            public_url: self.public_url(bucket, path),
            metadata,
        })
    }

    /// Read a blob and its metadata
    pub async fn get(&self, bucket: &str, path: &str) -> Result<Option<(Vec<u8>, BlobMetadata)>> {
        let file_path = self.resolve(bucket, path)?;

        let data = match fs::read(&file_path).await {
            Ok(d) => d,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };

        let metadata = match fs::read(metadata_path(&file_path)).await {
            Ok(raw) => serde_json::from_slice(&raw)?,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                warn!(bucket, path, "Blob has no metadata sidecar");
                return Ok(None);
            }
            Err(e) => return Err(e.into()),
        };

        Ok(Some((data, metadata)))
    }

    /// Delete a blob. Returns whether anything was removed.
    pub async fn delete(&self, bucket: &str, path: &str) -> Result<bool> {
        let file_path = self.resolve(bucket, path)?;

        match fs::remove_file(&file_path).await {
            Ok(()) => {}
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(false),
            Err(e) => return Err(e.into()),
        }
        if let Err(e) = fs::remove_file(metadata_path(&file_path)).await {
            if e.kind() != ErrorKind::NotFound {
                return Err(e.into());
            }
        }

        debug!(bucket, path, "Deleted blob");
        Ok(true)
    }

    /// Map `bucket` + `path` onto the filesystem, rejecting anything that
    /// could escape the bucket directory.
    fn resolve(&self, bucket: &str, path: &str) -> Result<PathBuf> {
        if !is_safe_segment(bucket) {
            return Err(BlobStoreError::InvalidPath(bucket.to_string()));
        }
        if path.is_empty()
            || path.ends_with('/')
            || path.ends_with(METADATA_SUFFIX)
            || !path.split('/').all(is_safe_segment)
        {
            return Err(BlobStoreError::InvalidPath(path.to_string()));
        }

        let mut full = self.root.join(bucket);
        for segment in path.split('/') {
            full.push(segment);
        }
        Ok(full)
    }
}

fn is_safe_segment(segment: &str) -> bool {
    !segment.is_empty()
        && segment != "."
        && segment != ".."
        && !segment.contains('\\')
        && !segment.contains('\0')
}

/// Write a freshly created blob file. A failed write removes the file so the
/// path is free again.
async fn write_or_discard<W: AsyncWrite + Unpin>(
    file: &mut W,
    file_path: &Path,
    data: &[u8],
) -> Result<()> {
    let written = async {
        file.write_all(data).await?;
        file.flush().await
    }
    .await;
    if let Err(e) = written {
        warn!(path = ?file_path, error = %e, "Blob write failed, removing partial file");
        let _ = fs::remove_file(file_path).await;
        return Err(e.into());
    }
    Ok(())
}

fn metadata_path(file_path: &Path) -> PathBuf {
    let mut name = file_path.as_os_str().to_owned();
    name.push(METADATA_SUFFIX);
    PathBuf::from(name)
}

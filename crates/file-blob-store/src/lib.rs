//! File-based blob storage
//!
//! Stores uploaded blobs on disk under `<root>/<bucket>/<path>` with a JSON
//! metadata sidecar, and hands back a publicly resolvable URL for each upload.
//! Paths are write-once: uploading to an existing path is refused.

mod error;
mod store;
mod types;

pub use error::{BlobStoreError, Result};
pub use store::BlobStore;
pub use types::{BlobMetadata, StoredBlob};

//! Error types for the blob store

use std::fmt;

#[derive(Debug)]
pub enum BlobStoreError {
    InvalidPath(String),
    AlreadyExists(String),
    Io(Box<std::io::Error>),
    Metadata(String),
}

impl fmt::Display for BlobStoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BlobStoreError::InvalidPath(path) => write!(f, "Invalid blob path: {}", path),
            BlobStoreError::AlreadyExists(path) => write!(f, "Blob already exists: {}", path),
            BlobStoreError::Io(err) => write!(f, "IO error: {}", err),
            BlobStoreError::Metadata(msg) => write!(f, "Metadata error: {}", msg),
        }
    }
}

impl std::error::Error for BlobStoreError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            BlobStoreError::Io(err) => Some(err.as_ref()),
            _ => None,
        }
    }
}

impl From<std::io::Error> for BlobStoreError {
    fn from(err: std::io::Error) -> Self {
        BlobStoreError::Io(Box::new(err))
    }
}

impl From<serde_json::Error> for BlobStoreError {
    fn from(err: serde_json::Error) -> Self {
        BlobStoreError::Metadata(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, BlobStoreError>;

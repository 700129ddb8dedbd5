//! Error types for the core flows

use std::fmt;

use crate::constants::{
    MSG_INCOMPLETE_DRAFT, MSG_LOGIN_REQUIRED, MSG_ROOM_NOT_FOUND, MSG_SAVE_FAILED,
    MSG_UPLOAD_FAILED,
};

/// Failure reported by a row or media store
#[derive(Debug)]
pub enum StoreError {
    /// The backend refused or failed the operation
    Backend(Box<dyn std::error::Error + Send + Sync>),
    /// A write-once path or unique key was already taken
    Conflict(String),
}

impl StoreError {
    pub fn backend(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        StoreError::Backend(Box::new(err))
    }
}

impl fmt::Display for StoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StoreError::Backend(err) => write!(f, "Store backend error: {}", err),
            StoreError::Conflict(what) => write!(f, "Store conflict: {}", what),
        }
    }
}

impl std::error::Error for StoreError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            StoreError::Backend(err) => Some(err.as_ref()),
            StoreError::Conflict(_) => None,
        }
    }
}

/// Errors from the post and chat flows
#[derive(Debug)]
pub enum Error {
    /// No signed-in user
    Unauthenticated,
    /// Title, content or address missing
    IncompleteDraft,
    RoomNotFound(String),
    /// Attachment upload failed; nothing was written
    Upload(StoreError),
    Store(StoreError),
}

impl Error {
    /// Message shown to the user for this failure
    pub fn user_message(&self) -> &'static str {
        match self {
            Error::Unauthenticated => MSG_LOGIN_REQUIRED,
            Error::IncompleteDraft => MSG_INCOMPLETE_DRAFT,
            Error::RoomNotFound(_) => MSG_ROOM_NOT_FOUND,
            Error::Upload(_) => MSG_UPLOAD_FAILED,
            Error::Store(_) => MSG_SAVE_FAILED,
        }
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Unauthenticated => write!(f, "Authentication required"),
            Error::IncompleteDraft => write!(f, "Draft is missing title, content or address"),
            Error::RoomNotFound(id) => write!(f, "Chat room not found: {}", id),
            Error::Upload(err) => write!(f, "Upload failed: {}", err),
            Error::Store(err) => write!(f, "{}", err),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Upload(err) | Error::Store(err) => Some(err),
            _ => None,
        }
    }
}

impl From<StoreError> for Error {
    fn from(err: StoreError) -> Self {
        Error::Store(err)
    }
}

pub type Result<T> = std::result::Result<T, Error>;

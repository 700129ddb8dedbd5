//! Core flows of the dongne posting and chat app
//!
//! - [`address_search`]: keyword search over the geocoder, region truncation,
//!   de-duplication, pagination and "use my current location"
//! - [`post_draft`]: the in-progress post and its reducer
//! - [`post_feed`], [`chat_rooms`], [`chat_feed`]: load-once lists backed by
//!   the row and media stores, appended to from write responses
//!
//! Storage and geocoding are reached through the traits in [`store`] and
//! [`geo`], so every flow runs the same against PostgreSQL, the file blob
//! store, or in-memory doubles.

pub mod address_search;
pub mod chat_feed;
pub mod chat_rooms;
pub mod constants;
pub mod error;
pub mod geo;
pub mod post_draft;
pub mod post_feed;
pub mod store;

#[cfg(test)]
pub(crate) mod testing;

pub use error::{Error, Result};

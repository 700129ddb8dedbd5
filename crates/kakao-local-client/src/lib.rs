//! Kakao Local API Client
//!
//! A small client for the two [Kakao Local](https://developers.kakao.com/docs/latest/ko/local/dev-guide)
//! endpoints used for picking a neighbourhood:
//!
//! - `GET /search/keyword.json` - free-text search, returning full address strings
//! - `GET /geo/coord2address.json` - coordinates to a three-level region breakdown
//!
//! Both calls are single round-trips authenticated with a static REST API key.
//! There is no retry and no cache.

mod client;
mod error;
mod types;

pub use client::KakaoLocalClient;
pub use error::{KakaoError, Result};
pub use types::RegionAddress;

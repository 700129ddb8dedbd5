//! Geocoding and geolocation seams

use async_trait::async_trait;
use kakao_local_client::KakaoLocalClient;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;
use tracing::warn;
use ts_rs::TS;

pub use kakao_local_client::RegionAddress;

/// A point in decimal degrees
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
}

/// Any geocoder failure. Transport errors and bad statuses are not told apart.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GeocodeError;

impl fmt::Display for GeocodeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Geocoding request failed")
    }
}

impl std::error::Error for GeocodeError {}

/// Forward and reverse geocoding
#[async_trait]
pub trait Geocoder: Send + Sync {
    /// Full address strings matching a free-text query
    async fn search_by_keyword(&self, query: &str) -> Result<Vec<String>, GeocodeError>;

    /// Region containing a point, or `None` if the point has no address
    async fn reverse_geocode(
        &self,
        coords: Coordinates,
    ) -> Result<Option<RegionAddress>, GeocodeError>;
}

#[async_trait]
impl Geocoder for KakaoLocalClient {
    async fn search_by_keyword(&self, query: &str) -> Result<Vec<String>, GeocodeError> {
        KakaoLocalClient::search_by_keyword(self, query)
            .await
            .map_err(|e| {
                warn!(query, error = %e, "Address search failed");
                GeocodeError
            })
    }

    async fn reverse_geocode(
        &self,
        coords: Coordinates,
    ) -> Result<Option<RegionAddress>, GeocodeError> {
        KakaoLocalClient::reverse_geocode(self, coords.latitude, coords.longitude)
            .await
            .map_err(|e| {
                warn!(
                    lat = coords.latitude,
                    lon = coords.longitude,
                    error = %e,
                    "Address lookup failed"
                );
                GeocodeError
            })
    }
}

#[async_trait]
impl<T: Geocoder + ?Sized> Geocoder for Arc<T> {
    async fn search_by_keyword(&self, query: &str) -> Result<Vec<String>, GeocodeError> {
        (**self).search_by_keyword(query).await
    }

    async fn reverse_geocode(
        &self,
        coords: Coordinates,
    ) -> Result<Option<RegionAddress>, GeocodeError> {
        (**self).reverse_geocode(coords).await
    }
}

/// Why a current position could not be obtained
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export, export_to = "bindings/")]
pub enum GeolocationError {
    PermissionDenied,
    Unavailable,
}

impl fmt::Display for GeolocationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GeolocationError::PermissionDenied => write!(f, "Location permission denied"),
            GeolocationError::Unavailable => write!(f, "Location unavailable"),
        }
    }
}

impl std::error::Error for GeolocationError {}

/// One-shot current-position query
#[async_trait]
pub trait Geolocator: Send + Sync {
    async fn current_position(&self) -> Result<Coordinates, GeolocationError>;
}

/// A position the client already obtained (or failed to) and reported to us
#[derive(Debug, Clone, Copy)]
pub struct ReportedPosition(pub Result<Coordinates, GeolocationError>);

#[async_trait]
impl Geolocator for ReportedPosition {
    async fn current_position(&self) -> Result<Coordinates, GeolocationError> {
        self.0
    }
}

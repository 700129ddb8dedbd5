use axum::extract::{Query, State};
use axum::Json;
use dongne_core::address_search::{AddressSearchController, LocatedAddress, Notice, SearchState};
use dongne_core::geo::{Coordinates, GeolocationError, ReportedPosition};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::error::AppError;
use crate::state::AppState;

#[derive(Deserialize)]
pub struct SearchParams {
    #[serde(default)]
    query: String,
    page: Option<usize>,
}

/// One page of refined address candidates
#[derive(Serialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export, export_to = "bindings/")]
pub struct AddressSearchResponse {
    query: String,
    items: Vec<String>,
    total: usize,
    page: usize,
    last_page: usize,
    notice: Option<Notice>,
    message: Option<String>,
}

impl From<SearchState> for AddressSearchResponse {
    fn from(state: SearchState) -> Self {
        Self {
            items: state.results.current_page().to_vec(),
            total: state.results.len(),
            page: state.results.page(),
            last_page: state.results.last_page(),
            message: state.notice.map(|n| n.message().to_string()),
            notice: state.notice,
            query: state.query,
        }
    }
}

/// Position reported by the browser, or why it could not get one
#[derive(Debug, Default, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct LocateParams {
    #[ts(optional)]
    pub lat: Option<f64>,
    #[ts(optional)]
    pub lng: Option<f64>,
    #[ts(optional)]
    pub error: Option<GeolocationError>,
}

impl LocateParams {
    fn reported(&self) -> Result<ReportedPosition, AppError> {
        if let Some(error) = self.error {
            return Ok(ReportedPosition(Err(error)));
        }
        match (self.lat, self.lng) {
            (Some(latitude), Some(longitude)) => {
                if !(-90.0..=90.0).contains(&latitude) || !(-180.0..=180.0).contains(&longitude) {
                    return Err(AppError::BadRequest("Invalid coordinates".into()));
                }
                Ok(ReportedPosition(Ok(Coordinates {
                    latitude,
                    longitude,
                })))
            }
            _ => Ok(ReportedPosition(Err(GeolocationError::Unavailable))),
        }
    }
}

#[derive(Serialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export, export_to = "bindings/")]
pub struct LocateResponse {
    address: Option<String>,
    latitude: Option<f64>,
    longitude: Option<f64>,
    notice: Option<Notice>,
    message: Option<String>,
}

impl From<Result<LocatedAddress, Notice>> for LocateResponse {
    fn from(outcome: Result<LocatedAddress, Notice>) -> Self {
        match outcome {
            Ok(located) => Self {
                address: Some(located.address),
                latitude: Some(located.coordinates.latitude),
                longitude: Some(located.coordinates.longitude),
                notice: None,
                message: None,
            },
            Err(notice) => Self {
                address: None,
                latitude: None,
                longitude: None,
                notice: Some(notice),
                message: Some(notice.message().to_string()),
            },
        }
    }
}

/// Resolve a reported position to a region string
pub(crate) async fn locate(
    state: &AppState,
    params: &LocateParams,
) -> Result<Result<LocatedAddress, Notice>, AppError> {
    let controller = AddressSearchController::new(state.geocoder.clone(), params.reported()?);
    Ok(controller.locate_current().await)
}

/// GET /api/address/search?query=&page=
pub async fn search(
    State(state): State<AppState>,
    Query(params): Query<SearchParams>,
) -> Json<AddressSearchResponse> {
    let controller = AddressSearchController::new(
        state.geocoder.clone(),
        ReportedPosition(Err(GeolocationError::Unavailable)),
    );
    controller.search(&params.query).await;
    if let Some(page) = params.page {
        controller.go_to_page(page).await;
    }
    Json(controller.snapshot().await.into())
}

/// GET /api/address/current?lat=&lng=&error=
pub async fn current(
    State(state): State<AppState>,
    Query(params): Query<LocateParams>,
) -> Result<Json<LocateResponse>, AppError> {
    let outcome = locate(&state, &params).await?;
    Ok(Json(outcome.into()))
}

//! Address search: keyword lookup, region truncation, pagination and
//! current-location lookup.
//!
//! The controller owns the search state behind a lock so overlapping calls
//! can run concurrently. Nothing is cancelled: each search writes its results
//! once its geocoder call returns, so the last one to resolve wins.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use tokio::sync::RwLock;
use tracing::{debug, warn};
use ts_rs::TS;

use crate::constants::{
    MSG_ADDRESS_NOT_FOUND, MSG_LOCATION_DENIED, MSG_LOCATION_UNAVAILABLE, MSG_LOOKUP_FAILED,
    MSG_NO_RESULTS, MSG_SEARCH_FAILED, NEIGHBORHOOD_MARKER, PAGE_SIZE, REGION_TOKEN_COUNT,
};
use crate::geo::{Coordinates, GeolocationError, Geocoder, Geolocator};

/// Keep the first [`REGION_TOKEN_COUNT`] whitespace-delimited tokens
pub fn truncate_region(address: &str) -> String {
    address
        .split_whitespace()
        .take(REGION_TOKEN_COUNT)
        .collect::<Vec<_>>()
        .join(" ")
}

fn has_neighborhood_token(region: &str) -> bool {
    region
        .split_whitespace()
        .any(|token| token.ends_with(NEIGHBORHOOD_MARKER))
}

/// Truncate raw addresses to region strings, keep neighbourhood-level ones,
/// and drop duplicates (first occurrence wins). Idempotent.
pub fn refine_addresses<S: AsRef<str>>(raw: &[S]) -> Vec<String> {
    let mut seen = HashSet::new();
    raw.iter()
        .map(|address| truncate_region(address.as_ref()))
        .filter(|region| has_neighborhood_token(region))
        .filter(|region| seen.insert(region.clone()))
        .collect()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PageDirection {
    Previous,
    Next,
}

/// Unique region candidates, paged [`PAGE_SIZE`] at a time
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AddressResultSet {
    items: Vec<String>,
    page: usize,
}

impl Default for AddressResultSet {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            page: 1,
        }
    }
}

impl AddressResultSet {
    /// Build from already-refined candidates, starting on page 1
    pub fn new(items: Vec<String>) -> Self {
        Self { items, page: 1 }
    }

    pub fn items(&self) -> &[String] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn page(&self) -> usize {
        self.page
    }

    /// `ceil(len / PAGE_SIZE)`, and 1 for an empty set
    pub fn last_page(&self) -> usize {
        self.items.len().div_ceil(PAGE_SIZE).max(1)
    }

    /// Candidates on the current page
    pub fn current_page(&self) -> &[String] {
        let start = (self.page - 1) * PAGE_SIZE;
        let end = (start + PAGE_SIZE).min(self.items.len());
        self.items.get(start..end).unwrap_or(&[])
    }

    /// Move one page, clamped to `[1, last_page]`
    pub fn paginate(&mut self, direction: PageDirection) -> usize {
        let target = match direction {
            PageDirection::Previous => self.page.saturating_sub(1),
            PageDirection::Next => self.page.saturating_add(1),
        };
        self.go_to(target)
    }

    /// Jump to a page, clamped to `[1, last_page]`
    pub fn go_to(&mut self, page: usize) -> usize {
        self.page = page.clamp(1, self.last_page());
        self.page
    }
}

/// User-facing outcome of the last operation that needs one
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export, export_to = "bindings/")]
pub enum Notice {
    NoResults,
    SearchFailed,
    LocationDenied,
    LocationUnavailable,
    AddressNotFound,
    LookupFailed,
}

impl Notice {
    pub fn message(&self) -> &'static str {
        match self {
            Notice::NoResults => MSG_NO_RESULTS,
            Notice::SearchFailed => MSG_SEARCH_FAILED,
            Notice::LocationDenied => MSG_LOCATION_DENIED,
            Notice::LocationUnavailable => MSG_LOCATION_UNAVAILABLE,
            Notice::AddressNotFound => MSG_ADDRESS_NOT_FOUND,
            Notice::LookupFailed => MSG_LOOKUP_FAILED,
        }
    }
}

impl From<GeolocationError> for Notice {
    fn from(err: GeolocationError) -> Self {
        match err {
            GeolocationError::PermissionDenied => Notice::LocationDenied,
            GeolocationError::Unavailable => Notice::LocationUnavailable,
        }
    }
}

/// Observable state of a search flow
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchState {
    pub query: String,
    pub results: AddressResultSet,
    pub notice: Option<Notice>,
    /// The finalized address, once one was selected or located
    pub selection: Option<String>,
    /// Whether the flow is still open for searching
    pub open: bool,
}

impl Default for SearchState {
    fn default() -> Self {
        Self {
            query: String::new(),
            results: AddressResultSet::default(),
            notice: None,
            selection: None,
            open: true,
        }
    }
}

/// Address resolved from the current position
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LocatedAddress {
    pub coordinates: Coordinates,
    pub address: String,
}

pub struct AddressSearchController<G, L> {
    geocoder: G,
    geolocator: L,
    state: RwLock<SearchState>,
}

impl<G: Geocoder, L: Geolocator> AddressSearchController<G, L> {
    pub fn new(geocoder: G, geolocator: L) -> Self {
        Self {
            geocoder,
            geolocator,
            state: RwLock::new(SearchState::default()),
        }
    }

    /// Run a keyword search and reset to page 1.
    ///
    /// Returns `None` without touching anything when the query is blank.
    /// A failed lookup leaves an empty result set and [`Notice::SearchFailed`].
    pub async fn search(&self, query: &str) -> Option<AddressResultSet> {
        let query = query.trim();
        if query.is_empty() {
            return None;
        }

        let outcome = self.geocoder.search_by_keyword(query).await;

        let mut state = self.state.write().await;
        state.query = query.to_string();
        match outcome {
            Ok(raw) => {
                let refined = refine_addresses(&raw);
                debug!(query, raw = raw.len(), refined = refined.len(), "Address search");
                state.notice = refined.is_empty().then_some(Notice::NoResults);
                state.results = AddressResultSet::new(refined);
            }
            Err(e) => {
                warn!(query, error = %e, "Address search failed");
                state.notice = Some(Notice::SearchFailed);
                state.results = AddressResultSet::default();
            }
        }
        Some(state.results.clone())
    }

    /// Move one page, clamped. Returns the new page.
    pub async fn paginate(&self, direction: PageDirection) -> usize {
        self.state.write().await.results.paginate(direction)
    }

    /// Jump to a page, clamped. Returns the new page.
    pub async fn go_to_page(&self, page: usize) -> usize {
        self.state.write().await.results.go_to(page)
    }

    /// Finalize a candidate and close the flow
    pub async fn select(&self, candidate: &str) -> String {
        let mut state = self.state.write().await;
        state.selection = Some(candidate.to_string());
        state.open = false;
        candidate.to_string()
    }

    /// Resolve the current position to a region string and finalize it.
    ///
    /// On failure only the notice changes.
    pub async fn locate_current(&self) -> Result<LocatedAddress, Notice> {
        let coordinates = match self.geolocator.current_position().await {
            Ok(c) => c,
            Err(e) => {
                warn!(error = %e, "Current position unavailable");
                return Err(self.fail(e.into()).await);
            }
        };

        let address = match self.geocoder.reverse_geocode(coordinates).await {
            Ok(Some(region)) => region.compose(),
            Ok(None) => return Err(self.fail(Notice::AddressNotFound).await),
            Err(_) => return Err(self.fail(Notice::LookupFailed).await),
        };

        let mut state = self.state.write().await;
        state.selection = Some(address.clone());
        state.notice = None;
        state.open = false;

        Ok(LocatedAddress {
            coordinates,
            address,
        })
    }

    pub async fn snapshot(&self) -> SearchState {
        self.state.read().await.clone()
    }

    async fn fail(&self, notice: Notice) -> Notice {
        self.state.write().await.notice = Some(notice);
        notice
    }
}

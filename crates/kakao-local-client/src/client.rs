use tracing::{debug, warn};

use crate::error::KakaoError;
use crate::types::{CoordToAddressResponse, KeywordSearchResponse, RegionAddress};

const DEFAULT_BASE_URL: &str = "https://dapi.kakao.com/v2/local";
const USER_AGENT: &str = "dongne/0.1 (kakao-local-client)";

/// Kakao Local API client for keyword search and coordinate-to-region lookup
pub struct KakaoLocalClient {
    client: reqwest::Client,
    base_url: String,
    api_key: String,
}

impl KakaoLocalClient {
    /// Create a new client against the public Kakao endpoint
    pub fn new(api_key: &str) -> Self {
        Self::with_base_url(DEFAULT_BASE_URL, api_key)
    }

    /// Create a new client with a custom base URL (everything up to `/search`)
    pub fn with_base_url(base_url: &str, api_key: &str) -> Self {
        let client = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .build()
            .expect("Failed to create HTTP client");

        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key: api_key.to_string(),
        }
    }

    /// Search by free text, returning each match's full `address_name`
    pub async fn search_by_keyword(&self, query: &str) -> crate::Result<Vec<String>> {
        let url = format!(
            "{}/search/keyword.json?query={}",
            self.base_url,
            urlencoding::encode(query)
        );

        let data: KeywordSearchResponse = self.get_json(&url).await?;

        let addresses: Vec<String> = data
            .documents
            .into_iter()
            .map(|doc| doc.address_name)
            .filter(|name| !name.is_empty())
            .collect();

        debug!(query, count = addresses.len(), "Keyword search completed");
        Ok(addresses)
    }

    /// Look up the administrative region containing a coordinate.
    ///
    /// Returns `Ok(None)` when Kakao has no address for the point.
    pub async fn reverse_geocode(
        &self,
        latitude: f64,
        longitude: f64,
    ) -> crate::Result<Option<RegionAddress>> {
        if !(-90.0..=90.0).contains(&latitude) || !(-180.0..=180.0).contains(&longitude) {
            return Err(KakaoError::InvalidCoordinates {
                latitude,
                longitude,
            });
        }

        // Kakao takes x = longitude, y = latitude
        let url = format!(
            "{}/geo/coord2address.json?x={}&y={}",
            self.base_url, longitude, latitude
        );

        let data: CoordToAddressResponse = self.get_json(&url).await?;

        let region = data.documents.into_iter().next().and_then(|doc| doc.address);

        match region {
            Some(ref r) => debug!(
                lat = latitude,
                lon = longitude,
                region = %r.compose(),
                "Resolved coordinates"
            ),
            None => debug!(lat = latitude, lon = longitude, "No address for coordinates"),
        }

        Ok(region)
    }

    async fn get_json<T: serde::de::DeserializeOwned>(&self, url: &str) -> crate::Result<T> {
        let response = self
            .client
            .get(url)
            .header("Authorization", format!("KakaoAK {}", self.api_key))
            .header("Accept", "application/json")
            .send()
            .await
            .map_err(KakaoError::Transport)?;

        let status = response.status();
        if !status.is_success() {
            warn!(status = %status, "Kakao request failed");
            return Err(KakaoError::Status(status.as_u16()));
        }

        response.json().await.map_err(|e| {
            warn!(error = %e, "Undecodable Kakao response");
            KakaoError::Decode(e)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::extract::Query;
    use axum::http::{HeaderMap, StatusCode};
    use axum::response::IntoResponse;
    use axum::routing::get;
    use axum::{Json, Router};
    use serde_json::json;
    use std::collections::HashMap;

    const TEST_KEY: &str = "test-key";

    fn authorized(headers: &HeaderMap) -> bool {
        headers
            .get("authorization")
            .and_then(|v| v.to_str().ok())
            .map(|v| v == format!("KakaoAK {TEST_KEY}"))
            .unwrap_or(false)
    }

    async fn keyword(
        headers: HeaderMap,
        Query(params): Query<HashMap<String, String>>,
    ) -> axum::response::Response {
        if !authorized(&headers) {
            return StatusCode::UNAUTHORIZED.into_response();
        }
        let query = params.get("query").cloned().unwrap_or_default();
        if query == "서초동" {
            Json(json!({
                "documents": [
                    { "address_name": "서울 서초구 서초동 1303-22" },
                    { "address_name": "서울 서초구 서초동 1337" },
                    { "address_name": "" }
                ]
            }))
            .into_response()
        } else {
            Json(json!({ "documents": [] })).into_response()
        }
    }

    async fn coord2address(Query(params): Query<HashMap<String, String>>) -> Json<serde_json::Value> {
        // Only the x/y order of the Seocho point resolves
        if params.get("x").map(String::as_str) == Some("127.0276")
            && params.get("y").map(String::as_str) == Some("37.4979")
        {
            Json(json!({
                "documents": [{
                    "address": {
                        "region_1depth_name": "서울",
                        "region_2depth_name": "서초구",
                        "region_3depth_name": "서초동"
                    }
                }]
            }))
        } else {
            Json(json!({ "documents": [] }))
        }
    }

    async fn spawn_mock() -> String {
        let app = Router::new()
            .route("/search/keyword.json", get(keyword))
            .route("/geo/coord2address.json", get(coord2address));
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });
        format!("http://{addr}")
    }

    #[tokio::test]
    async fn test_search_by_keyword_returns_address_names() {
        let base = spawn_mock().await;
        let client = KakaoLocalClient::with_base_url(&base, TEST_KEY);

        let results = client.search_by_keyword("서초동").await.unwrap();
        assert_eq!(
            results,
            vec!["서울 서초구 서초동 1303-22", "서울 서초구 서초동 1337"]
        );
    }

    #[tokio::test]
    async fn test_search_by_keyword_empty() {
        let base = spawn_mock().await;
        let client = KakaoLocalClient::with_base_url(&base, TEST_KEY);

        let results = client.search_by_keyword("없는동네").await.unwrap();
        assert!(results.is_empty());
    }

    #[tokio::test]
    async fn test_bad_key_is_status_error() {
        let base = spawn_mock().await;
        let client = KakaoLocalClient::with_base_url(&base, "wrong");

        let err = client.search_by_keyword("서초동").await.unwrap_err();
        assert!(matches!(err, KakaoError::Status(401)));
    }

    #[tokio::test]
    async fn test_reverse_geocode_found() {
        let base = spawn_mock().await;
        let client = KakaoLocalClient::with_base_url(&base, TEST_KEY);

        let region = client.reverse_geocode(37.4979, 127.0276).await.unwrap();
        assert_eq!(region.unwrap().compose(), "서울 서초구 서초동");
    }

    #[tokio::test]
    async fn test_reverse_geocode_not_found() {
        let base = spawn_mock().await;
        let client = KakaoLocalClient::with_base_url(&base, TEST_KEY);

        let region = client.reverse_geocode(0.0, 0.0).await.unwrap();
        assert!(region.is_none());
    }

    #[tokio::test]
    async fn test_reverse_geocode_rejects_out_of_range() {
        let client = KakaoLocalClient::with_base_url("http://127.0.0.1:9", TEST_KEY);

        let err = client.reverse_geocode(120.0, 0.0).await.unwrap_err();
        assert!(matches!(err, KakaoError::InvalidCoordinates { .. }));
    }

    #[tokio::test]
    async fn test_unreachable_host_is_transport_error() {
        let client = KakaoLocalClient::with_base_url("http://127.0.0.1:9", TEST_KEY);

        let err = client.search_by_keyword("서초동").await.unwrap_err();
        assert!(matches!(err, KakaoError::Transport(_)));
    }

    #[tokio::test]
    async fn test_html_body_is_decode_error() {
        let app = Router::new().route(
            "/search/keyword.json",
            get(|| async { "<html>not json</html>" }),
        );
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });
        let client = KakaoLocalClient::with_base_url(&format!("http://{addr}"), TEST_KEY);

        let err = client.search_by_keyword("x").await.unwrap_err();
        assert!(matches!(err, KakaoError::Decode(_)));
        assert!(err.to_string().starts_with("Invalid response body"));
    }
}

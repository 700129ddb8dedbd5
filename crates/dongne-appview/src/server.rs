//! HTTP router
//!
//! Address lookups, the draft editor, the post feed, chat rooms and
//! messages, plus `/media` for stored uploads.

use axum::extract::DefaultBodyLimit;
use axum::http::{header, Method};
use axum::routing::{delete, get, post};
use axum::Router;
use tower_http::cors::{Any, CorsLayer};
use tracing::info;

use crate::routes;
use crate::state::AppState;

/// Base64 inflates images by a third; leave room for a few megabytes.
const MAX_BODY_BYTES: usize = 20 * 1024 * 1024;

/// CORS for the configured origins, or anything when `*` is listed
pub fn cors_layer(origins: &[String]) -> CorsLayer {
    if origins.iter().any(|o| o == "*") {
        CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any)
    } else {
        let origins: Vec<_> = origins.iter().filter_map(|o| o.parse().ok()).collect();
        CorsLayer::new()
            .allow_origin(origins)
            .allow_methods([Method::GET, Method::POST, Method::DELETE])
            .allow_headers([header::CONTENT_TYPE, header::COOKIE])
            .allow_credentials(true)
    }
}

pub fn create_router(state: AppState, cors: CorsLayer) -> Router {
    Router::new()
        .route("/health", get(routes::health::health))
        // Address lookup
        .route("/api/address/search", get(routes::address::search))
        .route("/api/address/current", get(routes::address::current))
        // Posts
        .route("/api/posts", get(routes::posts::list))
        .route("/api/posts/{id}", delete(routes::posts::delete))
        // Draft editor
        .route(
            "/api/drafts",
            get(routes::drafts::get).delete(routes::drafts::reset),
        )
        .route("/api/drafts/actions", post(routes::drafts::dispatch))
        .route(
            "/api/drafts/thumbnail",
            post(routes::drafts::upload_thumbnail),
        )
        .route("/api/drafts/locate", post(routes::drafts::locate_current))
        .route("/api/drafts/submit", post(routes::drafts::submit))
        // Chat
        .route(
            "/api/chatrooms",
            get(routes::chatrooms::list).post(routes::chatrooms::create),
        )
        .route("/api/chatrooms/{id}", delete(routes::chatrooms::delete))
        .route(
            "/api/chatrooms/{id}/messages",
            get(routes::messages::list).post(routes::messages::send),
        )
        // Stored uploads
        .route("/media/{bucket}/{*path}", get(routes::media::serve))
        .layer(DefaultBodyLimit::max(MAX_BODY_BYTES))
        .layer(cors)
        .with_state(state)
}

pub async fn start_server(router: Router, port: u16) -> std::io::Result<()> {
    let addr = std::net::SocketAddr::from(([0, 0, 0, 0], port));
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!(port, "Listening");
    axum::serve(listener, router).await
}

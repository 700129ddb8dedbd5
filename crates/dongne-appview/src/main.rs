mod auth;
mod config;
mod error;
mod routes;
mod server;
mod state;
mod stores;

use std::sync::Arc;
use std::time::Duration;

use file_blob_store::BlobStore;
use kakao_local_client::KakaoLocalClient;
use sqlx::postgres::PgPoolOptions;
use tracing::{info, warn};
use tracing_subscriber::{prelude::*, EnvFilter};

use config::Config;
use state::AppState;

#[tokio::main]
async fn main() {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("dongne_appview=info"));

    // Use JSON format for GCP Cloud Logging when LOG_FORMAT=json
    if std::env::var("LOG_FORMAT")
        .map(|v| v == "json")
        .unwrap_or(false)
    {
        tracing_subscriber::registry()
            .with(env_filter)
            .with(tracing_stackdriver::layer())
            .init();
    } else {
        tracing_subscriber::fmt().with_env_filter(env_filter).init();
    }

    let config = Config::from_env();
    info!(port = config.port, "Starting dongne-appview");

    let pool = PgPoolOptions::new()
        .max_connections(20)
        .connect(&config.database_url)
        .await
        .expect("Failed to connect to database");

    dongne_db::migrate::migrate(&pool)
        .await
        .expect("Failed to run migrations");

    let blobs = BlobStore::new(config.media_dir.clone(), &config.public_url);
    blobs.init().await.expect("Failed to prepare media directory");

    if config.kakao_api_key.is_empty() {
        warn!("KAKAO_REST_API_KEY is not set; address search will fail");
    }
    let geocoder = match &config.kakao_api_base_url {
        Some(base) => KakaoLocalClient::with_base_url(base, &config.kakao_api_key),
        None => KakaoLocalClient::new(&config.kakao_api_key),
    };

    info!(
        media_dir = ?config.media_dir,
        public_url = %config.public_url,
        draft_ttl_secs = config.draft_ttl_secs,
        "Storage configured"
    );

    let state = AppState::new(
        pool,
        Arc::new(blobs),
        Arc::new(geocoder),
        Duration::from_secs(config.draft_ttl_secs),
    );

    let router = server::create_router(state, server::cors_layer(&config.cors_origins));

    server::start_server(router, config.port)
        .await
        .expect("Server failed");
}

use std::env;
use std::path::PathBuf;

/// Application configuration parsed from environment variables
#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub database_url: String,
    pub cors_origins: Vec<String>,
    pub kakao_api_key: String,
    /// Overrides the Kakao Local API base, mainly for tests
    pub kakao_api_base_url: Option<String>,
    pub media_dir: PathBuf,
    pub public_url: String,
    pub draft_ttl_secs: u64,
}

impl Config {
    /// Parse configuration from environment variables
    pub fn from_env() -> Self {
        let port = env::var("PORT")
            .ok()
            .and_then(|p| p.parse().ok())
            .unwrap_or(3004);

        let database_url = env::var("DATABASE_URL")
            .unwrap_or_else(|_| "postgres://localhost/dongne".to_string());

        let cors_origins = env::var("CORS_ORIGINS")
            .map(|s| s.split(',').map(|o| o.trim().to_string()).collect())
            .unwrap_or_else(|_| {
                vec![
                    "http://localhost:3000".to_string(),
                    "http://localhost:5173".to_string(),
                ]
            });

        // Empty key: every search fails and reports "search failed"
        let kakao_api_key = env::var("KAKAO_REST_API_KEY").unwrap_or_default();
        let kakao_api_base_url = env::var("KAKAO_API_BASE_URL").ok();

        let media_dir = env::var("MEDIA_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("./data/media"));

        let public_url = env::var("PUBLIC_URL")
            .map(|u| u.trim_end_matches('/').to_string())
            .unwrap_or_else(|_| format!("http://localhost:{}", port));

        let draft_ttl_secs = env::var("DRAFT_TTL_SECS")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(24 * 60 * 60);

        Self {
            port,
            database_url,
            cors_origins,
            kakao_api_key,
            kakao_api_base_url,
            media_dir,
            public_url,
            draft_ttl_secs,
        }
    }
}

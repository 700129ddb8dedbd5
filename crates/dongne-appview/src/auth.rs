use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use axum_extra::extract::CookieJar;

use crate::error::AppError;
use crate::state::AppState;

/// Name of the cookie carrying the signed-in user's id
pub const SESSION_COOKIE: &str = "session_user";

/// The signed-in user
#[derive(Debug, Clone)]
pub struct AuthUser {
    pub id: String,
}

/// Rejects the request with 401 when no session cookie is present.
impl FromRequestParts<AppState> for AuthUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let cookies = CookieJar::from_request_parts(parts, state)
            .await
            .map_err(|_| AppError::Unauthorized)?;
        session_user(&cookies)
            .map(|id| AuthUser { id })
            .ok_or(AppError::Unauthorized)
    }
}

/// User id from the session cookie, if signed in
pub fn session_user(cookies: &CookieJar) -> Option<String> {
    cookies
        .get(SESSION_COOKIE)
        .map(|c| c.value().trim().to_string())
        .filter(|id| !id.is_empty())
}

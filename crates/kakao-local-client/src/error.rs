use std::fmt;

/// Why a Kakao Local request produced no usable answer
#[derive(Debug)]
pub enum KakaoError {
    /// Rejected before any request was sent
    InvalidCoordinates { latitude: f64, longitude: f64 },
    /// Connection, TLS or timeout failure
    Transport(reqwest::Error),
    /// Kakao answered with a non-success status
    Status(u16),
    /// Success status, but the body was not the expected JSON
    Decode(reqwest::Error),
}

impl fmt::Display for KakaoError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            KakaoError::InvalidCoordinates {
                latitude,
                longitude,
            } => write!(f, "Invalid coordinates: {latitude}, {longitude}"),
            KakaoError::Transport(e) => write!(f, "Request to Kakao failed: {e}"),
            KakaoError::Status(code) => write!(f, "Kakao returned status {code}"),
            KakaoError::Decode(e) => write!(f, "Invalid response body: {e}"),
        }
    }
}

impl std::error::Error for KakaoError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            KakaoError::Transport(e) | KakaoError::Decode(e) => Some(e),
            KakaoError::InvalidCoordinates { .. } | KakaoError::Status(_) => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, KakaoError>;

//! Error taxonomy of the HTTP routes.
//!
//! Every upstream failure is converted into an [`ApiError`] at the boundary
//! where it happens. Handlers return `Result<_, ApiError>` and axum renders the
//! error as `{"error": "<message>"}` with the status of its category.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ApiError {
    /// The callback state is missing or does not match the one stored at login.
    #[error("Invalid state parameter")]
    StateMismatch,

    #[error("Authorization code missing")]
    MissingCode,

    /// The authorization-code grant failed upstream.
    #[error("Token exchange failed: {0}")]
    TokenExchange(String),

    #[error("No refresh token available")]
    NoRefreshToken,

    /// The refresh-token grant failed upstream.
    #[error("Refresh failed: {0}")]
    Refresh(String),

    /// No access token in the session.
    #[error("Unauthorized")]
    Unauthorized,

    #[error("No track currently playing")]
    NoTrackPlaying,

    /// Non-2xx or network failure from the Spotify Web API.
    #[error("Spotify API error: {0}")]
    Upstream(String),

    /// The lyrics search found nothing or failed.
    #[error("Lyrics not found")]
    LyricsNotFound,

    #[error("Could not scrape lyrics")]
    ScrapeFailed,

    #[error("Translation failed: {0}")]
    Translation(String),

    /// A request body is missing required fields.
    #[error("Invalid request: {0}")]
    InvalidRequest(String),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::StateMismatch => StatusCode::FORBIDDEN,
            ApiError::MissingCode | ApiError::InvalidRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::NoRefreshToken | ApiError::Unauthorized => StatusCode::UNAUTHORIZED,
            ApiError::NoTrackPlaying | ApiError::LyricsNotFound => StatusCode::NOT_FOUND,
            ApiError::TokenExchange(_)
            | ApiError::Refresh(_)
            | ApiError::Upstream(_)
            | ApiError::ScrapeFailed
            | ApiError::Translation(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status(), Json(json!({ "error": self.to_string() }))).into_response()
    }
}

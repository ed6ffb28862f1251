//! # API Module
//!
//! HTTP route handlers of the sporlyrics server. Each handler receives the
//! shared [`crate::server::AppState`] and the caller's
//! [`crate::session::Session`] and composes the upstream modules.
//!
//! ## Endpoints
//!
//! ### Authentication
//!
//! - [`login`] - `GET /login`, redirects the browser to the Spotify consent page
//! - [`callback`] - `GET /callback`, validates `state`, exchanges the code and
//!   redirects to the frontend with the access token in the URL fragment
//! - [`refresh`] - `GET /refresh`, renews the access token
//!
//! ### Playback and lyrics
//!
//! - [`current_track`] - `GET /current_track`, the track being played
//! - [`lyrics`] - `GET /lyrics?lang=<code>`, original and translated lyrics of
//!   the track being played
//! - [`translate_lyrics`] - `POST /translate_lyrics`, the same for a song named
//!   in the JSON body; needs no Spotify login
//!
//! ### Monitoring
//!
//! - [`health`] - `GET /health`, status, version and whether the session is
//!   logged in
//!
//! ## Errors
//!
//! Handlers return `Result<_, ApiError>`; every failure is rendered as
//! `{"error": "<message>"}` with the status of its category. Redirects use
//! `302 Found`.

mod auth;
mod health;
mod lyrics;
mod track;

use axum::{
    http::{StatusCode, header::LOCATION},
    response::{IntoResponse, Response},
};

pub use auth::{callback, login, refresh};
pub use health::health;
pub use lyrics::{fetch_lyrics, lyrics, translate_lyrics};
pub use track::current_track;

fn found(location: String) -> Response {
    (StatusCode::FOUND, [(LOCATION, location)]).into_response()
}

//! # Spotify Integration Module
//!
//! The Spotify side of the service:
//!
//! - [`auth`] - OAuth 2.0 authorization-code flow with a CSRF `state`
//!   parameter, and the refresh-token grant. Tokens are kept in the browser's
//!   session, never on disk.
//! - [`player`] - The currently playing track of the authenticated user,
//!   normalized into [`crate::types::Track`].
//!
//! ## API Coverage
//!
//! - `GET /authorize` - Consent page the browser is redirected to
//! - `POST /api/token` - Code exchange and refresh
//! - `GET /me/player/currently-playing` - Playback state
//!
//! All calls are single round trips: no retry, no backoff, no client-side
//! timeout. Failures are converted into [`crate::error::ApiError`] where they
//! happen.

pub mod auth;
pub mod player;

use axum::{Extension, response::Json};
use serde_json::{Value, json};

use crate::session::{ACCESS_TOKEN, Session};

/// Liveness probe. `authenticated` lets a frontend decide whether to show the
/// login button without triggering a Spotify call.
pub async fn health(Extension(session): Extension<Session>) -> Json<Value> {
    Json(json!({
        "status": "ok",
        "service": env!("CARGO_PKG_NAME"),
        "version": env!("CARGO_PKG_VERSION"),
        "authenticated": session.get(ACCESS_TOKEN).is_some()
    }))
}

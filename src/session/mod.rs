//! # Session Module
//!
//! Per-browser sessions for the OAuth flow. The browser only carries an opaque
//! session id in a signed cookie (`<id>.<signature>`); the values themselves
//! live server-side in a [`SessionStore`].
//!
//! [`session_layer`] resolves the cookie on every request and hands the route
//! handlers an explicit [`Session`] value through the request extensions. A
//! missing, malformed or tampered cookie starts a fresh empty session.
//!
//! Every response carries a `Set-Cookie` header whose `Max-Age` equals the idle
//! timeout, so the cookie and the server-side entry expire after the same idle
//! time.

mod store;

use std::{sync::Arc, time::Duration};

use axum::{
    extract::{Request, State},
    http::{
        HeaderMap, HeaderValue,
        header::{COOKIE, SET_COOKIE},
    },
    middleware::Next,
    response::Response,
};

use crate::{server::AppState, utils};

pub use store::{DEFAULT_IDLE_TIMEOUT, MemoryStore, SessionStore};

pub const SESSION_COOKIE: &str = "sporlyrics_session";

pub const OAUTH_STATE: &str = "oauth_state";
pub const ACCESS_TOKEN: &str = "access_token";
pub const REFRESH_TOKEN: &str = "refresh_token";

/// Handle on the session of the current request.
#[derive(Clone)]
pub struct Session {
    id: String,
    store: Arc<dyn SessionStore>,
}

impl Session {
    pub fn new(id: String, store: Arc<dyn SessionStore>) -> Self {
        Self { id, store }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn get(&self, key: &str) -> Option<String> {
        self.store.get(&self.id, key)
    }

    pub fn insert(&self, key: &str, value: impl Into<String>) {
        self.store.insert(&self.id, key, value.into());
    }

    /// Reads and deletes `key`.
    pub fn take(&self, key: &str) -> Option<String> {
        self.store.remove(&self.id, key)
    }
}

/// Builds the cookie value `<id>.<signature>` for a session id.
pub fn signed_cookie_value(secret: &str, session_id: &str) -> String {
    format!("{}.{}", session_id, utils::sign(secret, session_id))
}

/// Returns the session id carried by a signed cookie value, if the signature holds.
pub fn verify_cookie_value(secret: &str, value: &str) -> Option<String> {
    let (id, signature) = value.rsplit_once('.')?;
    if id.is_empty() || !utils::verify(secret, id, signature) {
        return None;
    }
    Some(id.to_string())
}

/// Finds a cookie by name across all `Cookie` headers.
pub fn cookie_value<'a>(headers: &'a HeaderMap, name: &str) -> Option<&'a str> {
    headers
        .get_all(COOKIE)
        .iter()
        .filter_map(|header| header.to_str().ok())
        .flat_map(|header| header.split(';'))
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(key, _)| *key == name)
        .map(|(_, value)| value)
}

/// Middleware attaching a [`Session`] to every request.
pub async fn session_layer(State(state): State<AppState>, mut req: Request, next: Next) -> Response {
    let secret = &state.settings.session_secret;
    let existing = cookie_value(req.headers(), SESSION_COOKIE)
        .and_then(|value| verify_cookie_value(secret, value));

    let id = existing.unwrap_or_else(utils::generate_session_id);

    req.extensions_mut()
        .insert(Session::new(id.clone(), Arc::clone(&state.sessions)));

    let mut res = next.run(req).await;

    let cookie = set_cookie(
        secret,
        &id,
        state.settings.session_idle_timeout,
        state.settings.tls.is_some(),
    );
    if let Ok(value) = HeaderValue::from_str(&cookie) {
        res.headers_mut().append(SET_COOKIE, value);
    }

    res
}

// Cross-site cookies from the browser extension need SameSite=None, which
// browsers only accept together with Secure.
fn set_cookie(secret: &str, session_id: &str, max_age: Duration, secure: bool) -> String {
    let value = signed_cookie_value(secret, session_id);
    let max_age = max_age.as_secs();
    if secure {
        format!(
            "{SESSION_COOKIE}={value}; Path=/; Max-Age={max_age}; HttpOnly; SameSite=None; Secure"
        )
    } else {
        format!("{SESSION_COOKIE}={value}; Path=/; Max-Age={max_age}; HttpOnly; SameSite=Lax")
    }
}

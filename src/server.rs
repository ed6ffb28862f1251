use std::{net::SocketAddr, str::FromStr, sync::Arc, time::Duration};

use axum::{
    Router,
    http::{HeaderValue, Method, header::CONTENT_TYPE},
    middleware,
    routing::{get, post},
};
use axum_server::tls_rustls::RustlsConfig;
use reqwest::Client;
use tower_http::cors::{AllowOrigin, CorsLayer};

use crate::{
    Res, api,
    config::Settings,
    info,
    session::{self, MemoryStore, SessionStore},
};

/// State shared by every request handler.
#[derive(Clone)]
pub struct AppState {
    pub settings: Arc<Settings>,
    pub client: Client,
    pub sessions: Arc<dyn SessionStore>,
}

impl AppState {
    pub fn new(settings: Settings, sessions: Arc<dyn SessionStore>) -> Self {
        Self {
            settings: Arc::new(settings),
            client: Client::new(),
            sessions,
        }
    }
}

/// Assembles the routes with the session middleware and CORS.
pub fn router(state: AppState) -> Router {
    let cors = cors_layer(&state.settings);

    Router::new()
        .route("/health", get(api::health))
        .route("/login", get(api::login))
        .route("/callback", get(api::callback))
        .route("/refresh", get(api::refresh))
        .route("/current_track", get(api::current_track))
        .route("/lyrics", get(api::lyrics))
        .route("/translate_lyrics", post(api::translate_lyrics))
        .layer(middleware::from_fn_with_state(
            state.clone(),
            session::session_layer,
        ))
        .layer(cors)
        .with_state(state)
}

pub async fn start_api_server(settings: Settings) -> Res<()> {
    let addr = SocketAddr::from_str(&settings.server_addr)
        .map_err(|e| format!("Failed to parse server address {}: {}", settings.server_addr, e))?;
    let tls = settings.tls.clone();

    let sessions: Arc<dyn SessionStore> =
        Arc::new(MemoryStore::with_idle_timeout(settings.session_idle_timeout));
    spawn_session_sweeper(Arc::clone(&sessions), settings.session_idle_timeout);

    let app = router(AppState::new(settings, sessions));

    match tls {
        Some(paths) => {
            let config = RustlsConfig::from_pem_file(&paths.cert, &paths.key).await?;
            info!("Listening on https://{}", addr);
            axum_server::bind_rustls(addr, config)
                .serve(app.into_make_service())
                .await?;
        }
        None => {
            let listener = tokio::net::TcpListener::bind(&addr).await?;
            info!("Listening on http://{}", addr);
            axum::serve(listener, app).await?;
        }
    }

    Ok(())
}

/// Periodically drops sessions idle for longer than the timeout.
///
/// The sweep runs every tenth of the timeout, kept between one second and one
/// minute.
pub fn spawn_session_sweeper(sessions: Arc<dyn SessionStore>, idle_timeout: Duration) {
    let period = (idle_timeout / 10).clamp(Duration::from_secs(1), Duration::from_secs(60));

    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(period);
        loop {
            ticker.tick().await;
            let evicted = sessions.evict_idle();
            if evicted > 0 {
                info!("Evicted {} idle sessions", evicted);
            }
        }
    });
}

// Credentialed CORS cannot use a wildcard origin; mirroring the request origin
// is what lets the browser extension call the API with its session cookie.
fn cors_layer(settings: &Settings) -> CorsLayer {
    let origins = if settings.cors_allowed_origins.is_empty() {
        AllowOrigin::mirror_request()
    } else {
        AllowOrigin::list(
            settings
                .cors_allowed_origins
                .iter()
                .filter_map(|origin| HeaderValue::from_str(origin).ok()),
        )
    };

    CorsLayer::new()
        .allow_origin(origins)
        .allow_methods([Method::GET, Method::POST])
        .allow_headers([CONTENT_TYPE])
        .allow_credentials(true)
}

use axum::{
    Extension, Json,
    extract::{Query, State},
    response::Response,
};

use crate::{
    api::found,
    error::ApiError,
    server::AppState,
    session::Session,
    spotify,
    types::{AccessTokenResponse, CallbackParams},
};

/// `GET /login`: redirects the browser to the Spotify consent page.
pub async fn login(State(state): State<AppState>, Extension(session): Extension<Session>) -> Response {
    found(spotify::auth::begin_authorization(&state.settings, &session))
}

/// `GET /callback`: finishes the login and redirects to the frontend with the
/// access token in the URL fragment.
pub async fn callback(
    State(state): State<AppState>,
    Extension(session): Extension<Session>,
    Query(params): Query<CallbackParams>,
) -> Result<Response, ApiError> {
    let target =
        spotify::auth::complete_authorization(&state.client, &state.settings, &session, &params)
            .await?;

    Ok(found(target))
}

/// `GET /refresh`: renews the session's access token.
pub async fn refresh(
    State(state): State<AppState>,
    Extension(session): Extension<Session>,
) -> Result<Json<AccessTokenResponse>, ApiError> {
    let access_token = spotify::auth::refresh(&state.client, &state.settings, &session).await?;
    Ok(Json(AccessTokenResponse { access_token }))
}

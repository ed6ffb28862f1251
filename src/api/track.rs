use axum::{Extension, Json, extract::State};

use crate::{error::ApiError, server::AppState, session::Session, spotify, types::Track};

/// `GET /current_track`: the track the session's user is playing.
pub async fn current_track(
    State(state): State<AppState>,
    Extension(session): Extension<Session>,
) -> Result<Json<Track>, ApiError> {
    spotify::player::get_current_track(&state.client, &state.settings, &session)
        .await
        .map(Json)
}

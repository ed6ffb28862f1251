use reqwest::{Client, StatusCode};

use crate::{
    config::Settings,
    error::ApiError,
    session::{ACCESS_TOKEN, Session},
    types::{CurrentlyPlaying, Track},
    warning,
};

/// Retrieves the track the session's user is currently playing.
///
/// Issues a single authenticated request to
/// `<api_url>/me/player/currently-playing` with the session's access token.
///
/// # Arguments
///
/// * `client` - Shared HTTP client
/// * `settings` - Server settings holding the Web API base URL
/// * `session` - Session holding the `access_token`
///
/// # Errors
///
/// - [`ApiError::Unauthorized`] - the session holds no access token; no request
///   is made
/// - [`ApiError::NoTrackPlaying`] - the API answered `204 No Content`, or the
///   playback state carries no item (ads, podcasts between episodes)
/// - [`ApiError::Upstream`] - any other non-2xx answer, a network failure or an
///   unreadable body
///
/// # Example
///
/// ```
/// let track = get_current_track(&client, &settings, &session).await?;
/// println!("{} - {}", track.artist, track.name);
/// ```
pub async fn get_current_track(
    client: &Client,
    settings: &Settings,
    session: &Session,
) -> Result<Track, ApiError> {
    let Some(token) = session.get(ACCESS_TOKEN) else {
        return Err(ApiError::Unauthorized);
    };

    let api_url = format!(
        "{uri}/me/player/currently-playing",
        uri = settings.spotify_api_url
    );

    let response = client
        .get(&api_url)
        .bearer_auth(token)
        .send()
        .await
        .map_err(upstream_error)?;

    if response.status() == StatusCode::NO_CONTENT {
        return Err(ApiError::NoTrackPlaying);
    }

    let playing = response
        .error_for_status()
        .map_err(upstream_error)?
        .json::<CurrentlyPlaying>()
        .await
        .map_err(upstream_error)?;

    normalize_track(playing).ok_or(ApiError::NoTrackPlaying)
}

/// Shapes the playback state into a [`Track`].
///
/// Returns `None` when nothing is playing. The first artist and the first
/// (largest) album image are used; a missing image list yields
/// `album_art: None` instead of an error.
pub fn normalize_track(playing: CurrentlyPlaying) -> Option<Track> {
    let item = playing.item?;

    let artist = item
        .artists
        .into_iter()
        .next()
        .map(|artist| artist.name)
        .unwrap_or_default();

    let album_art = item
        .album
        .and_then(|album| album.images.into_iter().next())
        .map(|image| image.url);

    Some(Track {
        name: item.name,
        artist,
        progress_ms: playing.progress_ms.unwrap_or(0),
        duration_ms: item.duration_ms,
        album_art,
    })
}

fn upstream_error(err: reqwest::Error) -> ApiError {
    warning!("Spotify API error: {}", err);
    ApiError::Upstream(err.to_string())
}

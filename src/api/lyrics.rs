use axum::{
    Extension, Json,
    extract::{Query, State, rejection::JsonRejection},
};
use reqwest::Client;

use crate::{
    config::Settings,
    error::ApiError,
    lyrics::{self, Lookup},
    server::AppState,
    session::{ACCESS_TOKEN, Session},
    spotify,
    translate::{self, DEFAULT_LANGUAGE},
    types::{LyricsParams, LyricsResult, TranslateLyricsRequest, TranslatedLyrics},
    warning,
};

/// `GET /lyrics?lang=<code>`: lyrics of the current track, translated.
pub async fn lyrics(
    State(state): State<AppState>,
    Extension(session): Extension<Session>,
    Query(params): Query<LyricsParams>,
) -> Result<Json<LyricsResult>, ApiError> {
    let language = params
        .lang
        .filter(|lang| !lang.is_empty())
        .unwrap_or_else(|| DEFAULT_LANGUAGE.to_string());

    fetch_lyrics(&state.client, &state.settings, &session, language)
        .await
        .map(Json)
}

/// Lyrics of an explicitly named song, without going through Spotify.
pub async fn translate_lyrics(
    State(state): State<AppState>,
    body: Result<Json<TranslateLyricsRequest>, JsonRejection>,
) -> Result<Json<TranslatedLyrics>, ApiError> {
    let Json(request) = body.map_err(|e| ApiError::InvalidRequest(e.body_text()))?;

    let (Some(song), Some(artist)) = (
        non_blank(request.song_title),
        non_blank(request.artist_name),
    ) else {
        return Err(ApiError::InvalidRequest(
            "song_title and artist_name are required".to_string(),
        ));
    };

    let language = non_blank(request.target_lang)
        .map(|lang| lang.to_lowercase())
        .unwrap_or_else(|| DEFAULT_LANGUAGE.to_string());

    let found = translated_lyrics(&state.client, &state.settings, &song, &artist, &language).await?;

    Ok(Json(TranslatedLyrics {
        lyrics: found.original,
        translated_lyrics: found.translated,
        source: found.url,
        language,
    }))
}

/// Fetches the lyrics of the session's current track and translates them.
///
/// Runs the whole chain and stops at the first failure:
///
/// 1. The session must hold an access token ([`ApiError::Unauthorized`])
/// 2. Current track from Spotify (its error is returned as is)
/// 3. Genius search by track name and artist ([`ApiError::LyricsNotFound`]
///    when there is no hit or the search failed)
/// 4. Lyrics page scrape ([`ApiError::ScrapeFailed`] when the page has no
///    lyrics or could not be fetched)
/// 5. Translation into `language` ([`ApiError::Translation`])
///
/// `language` is echoed in the result exactly as given.
pub async fn fetch_lyrics(
    client: &Client,
    settings: &Settings,
    session: &Session,
    language: String,
) -> Result<LyricsResult, ApiError> {
    if session.get(ACCESS_TOKEN).is_none() {
        return Err(ApiError::Unauthorized);
    }

    let track = spotify::player::get_current_track(client, settings, session).await?;
    let found = translated_lyrics(client, settings, &track.name, &track.artist, &language).await?;

    Ok(LyricsResult {
        original: found.original,
        translated: found.translated,
        language,
        track,
    })
}

struct FoundLyrics {
    url: String,
    original: String,
    translated: String,
}

async fn translated_lyrics(
    client: &Client,
    settings: &Settings,
    song: &str,
    artist: &str,
    language: &str,
) -> Result<FoundLyrics, ApiError> {
    let search = lyrics::find_lyrics_url(client, settings, song, artist).await;
    let url = settle(search, "Genius search").ok_or(ApiError::LyricsNotFound)?;

    let scraped = lyrics::scrape_lyrics(client, &url).await;
    let original = settle(scraped, "Lyrics scrape").ok_or(ApiError::ScrapeFailed)?;

    let translated = translate::translate(client, settings, &original, language).await?;

    Ok(FoundLyrics {
        url,
        original,
        translated,
    })
}

fn settle<T>(lookup: Lookup<T>, step: &str) -> Option<T> {
    if let Lookup::Failed(reason) = &lookup {
        warning!("{} failed: {}", step, reason);
    }
    lookup.found()
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
}

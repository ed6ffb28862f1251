use reqwest::Client;

use crate::{config::Settings, lyrics::Lookup, types::GeniusSearchResponse};

/// Searches Genius for a song and returns the first hit's page URL.
///
/// The query is `"{song} {artist}"`, sent to `<genius_api_url>/search` with the
/// configured API token as bearer credential.
///
/// # Returns
///
/// - `Lookup::Found(url)` - canonical page URL of the first hit
/// - `Lookup::NotFound` - the search returned zero hits
/// - `Lookup::Failed(reason)` - network failure, non-2xx answer or a body that
///   is not a search response
///
/// # Example
///
/// ```
/// match find_lyrics_url(&client, &settings, "Imagine", "John Lennon").await {
///     Lookup::Found(url) => println!("{}", url),
///     _ => println!("no lyrics"),
/// }
/// ```
pub async fn find_lyrics_url(
    client: &Client,
    settings: &Settings,
    song: &str,
    artist: &str,
) -> Lookup<String> {
    match search(client, settings, &format!("{song} {artist}")).await {
        Ok(found) => found
            .response
            .hits
            .into_iter()
            .next()
            .map(|hit| hit.result.url)
            .into(),
        Err(e) => Lookup::Failed(e.to_string()),
    }
}

async fn search(
    client: &Client,
    settings: &Settings,
    query: &str,
) -> Result<GeniusSearchResponse, reqwest::Error> {
    client
        .get(format!("{uri}/search", uri = settings.genius_api_url))
        .bearer_auth(&settings.genius_api_token)
        .query(&[("q", query)])
        .send()
        .await?
        .error_for_status()?
        .json::<GeniusSearchResponse>()
        .await
}

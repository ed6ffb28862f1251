use reqwest::{Client, header::USER_AGENT};
use scraper::{Html, Selector};

use crate::lyrics::Lookup;

/// Marker of the elements holding the lyrics on a Genius song page.
pub const LYRICS_CONTAINER_SELECTOR: &str = r#"div[data-lyrics-container="true"]"#;

// Genius rejects requests without a browser user agent.
const BROWSER_USER_AGENT: &str = "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/131.0.0.0 Safari/537.36";

/// Downloads a lyrics page and extracts its text.
///
/// # Returns
///
/// - `Lookup::Found(text)` - the lyrics as returned by [`extract_lyrics_text`]
/// - `Lookup::NotFound` - the page has no lyrics text
/// - `Lookup::Failed(reason)` - the page could not be fetched
pub async fn scrape_lyrics(client: &Client, url: &str) -> Lookup<String> {
    match fetch_page(client, url).await {
        Ok(html) => extract_lyrics_text(&html).into(),
        Err(e) => Lookup::Failed(e.to_string()),
    }
}

/// Extracts the lyrics text from the HTML of a Genius song page.
///
/// Every lyrics container is visited in document order. Within a container the
/// text nodes are joined with newlines, so `<br>`-separated verses end up on
/// their own lines; the containers are joined with newlines as well.
///
/// Returns `None` when the page has no lyrics container or the containers hold
/// no text.
pub fn extract_lyrics_text(html: &str) -> Option<String> {
    let document = Html::parse_document(html);
    let selector = Selector::parse(LYRICS_CONTAINER_SELECTOR).ok()?;

    let containers: Vec<String> = document
        .select(&selector)
        .map(|container| {
            container
                .text()
                .filter(|text| !text.is_empty())
                .collect::<Vec<_>>()
                .join("\n")
        })
        .collect();

    Some(containers.join("\n")).filter(|text| !text.trim().is_empty())
}

async fn fetch_page(client: &Client, url: &str) -> Result<String, reqwest::Error> {
    client
        .get(url)
        .header(USER_AGENT, BROWSER_USER_AGENT)
        .send()
        .await?
        .error_for_status()?
        .text()
        .await
}

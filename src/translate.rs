//! Machine translation adapter.
//!
//! Talks to the public Google Translate web endpoint (`client=gtx`). The source
//! language is detected by the provider. The text travels in a form body so
//! whole songs do not run into URL length limits.

use reqwest::Client;
use serde_json::Value;

use crate::{config::Settings, error::ApiError, warning};

/// Target language used when a request does not name one.
pub const DEFAULT_LANGUAGE: &str = "en";

/// Translates `text` into `target`.
///
/// # Errors
///
/// [`ApiError::Translation`] wrapping the provider's failure: unreachable
/// service, non-2xx answer (unsupported language, quota), an unreadable body or
/// an empty translation.
pub async fn translate(
    client: &Client,
    settings: &Settings,
    text: &str,
    target: &str,
) -> Result<String, ApiError> {
    let body = request_translation(client, settings, text, target)
        .await
        .map_err(|e| translation_error(e.to_string()))?;

    let translated = parse_translation(&body)
        .ok_or_else(|| translation_error("unexpected response format".to_string()))?;

    if translated.trim().is_empty() && !text.trim().is_empty() {
        return Err(translation_error("empty translation".to_string()));
    }

    Ok(translated)
}

async fn request_translation(
    client: &Client,
    settings: &Settings,
    text: &str,
    target: &str,
) -> Result<Value, reqwest::Error> {
    client
        .post(&settings.translate_url)
        .query(&[("client", "gtx"), ("sl", "auto"), ("tl", target), ("dt", "t")])
        .form(&[("q", text)])
        .send()
        .await?
        .error_for_status()?
        .json::<Value>()
        .await
}

/// Concatenates the translated segments of a `translate_a/single` response.
///
/// The response is a nested array whose first element lists the segments, each
/// segment holding its translation at index 0.
pub fn parse_translation(body: &Value) -> Option<String> {
    let segments = body.get(0)?.as_array()?;
    Some(
        segments
            .iter()
            .filter_map(|segment| segment.get(0).and_then(Value::as_str))
            .collect(),
    )
}

fn translation_error(reason: String) -> ApiError {
    warning!("Translation failed: {}", reason);
    ApiError::Translation(reason)
}

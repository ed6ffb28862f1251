use reqwest::Client;

use crate::{
    config::Settings,
    error::ApiError,
    session::{ACCESS_TOKEN, OAUTH_STATE, REFRESH_TOKEN, Session},
    types::{CallbackParams, TokenSet},
    success, utils, warning,
};

/// Scope requested at login. Reading the playback state is all the service needs.
pub const SCOPE: &str = "user-read-currently-playing";

/// Starts the OAuth 2.0 authorization-code flow for a browser session.
///
/// Generates a fresh random `state` token, stores it in the session under
/// `oauth_state` and returns the consent page URL the browser should be
/// redirected to. Calling this again replaces the previously stored state, so
/// only the most recent login of a session can complete.
///
/// # Arguments
///
/// * `settings` - Server settings holding the client id, redirect URI and
///   authorization endpoint
/// * `session` - Session of the browser starting the flow
///
/// # Query Parameters
///
/// The returned URL carries `response_type=code`, `client_id`,
/// `scope=user-read-currently-playing`, `redirect_uri` and `state`, each
/// URL-encoded.
///
/// # Example
///
/// ```
/// let url = begin_authorization(&settings, &session);
/// // redirect the browser to `url`
/// ```
pub fn begin_authorization(settings: &Settings, session: &Session) -> String {
    let state = utils::generate_state();
    session.insert(OAUTH_STATE, state.clone());

    let params = [
        ("response_type", "code"),
        ("client_id", settings.spotify_client_id.as_str()),
        ("scope", SCOPE),
        ("redirect_uri", settings.spotify_redirect_uri.as_str()),
        ("state", state.as_str()),
    ];

    format!(
        "{auth_url}?{query}",
        auth_url = settings.spotify_auth_url,
        query = encode_query(&params)
    )
}

/// Completes the authorization-code flow from the provider's callback.
///
/// The state stored at login is consumed before anything else is checked: it
/// is single-use whether or not the callback turns out to be valid.
///
/// # Arguments
///
/// * `client` - Shared HTTP client
/// * `settings` - Server settings holding the client credentials and endpoints
/// * `session` - Session of the browser returning from the consent page
/// * `params` - `state` and `code` query parameters of the callback
///
/// # Returns
///
/// The frontend URL the browser should land on, with the access token embedded
/// as a fragment: `<frontend_redirect_uri>#access_token=<token>`.
///
/// # Errors
///
/// - [`ApiError::StateMismatch`] - the returned state is absent, the session
///   holds no state, or the two differ
/// - [`ApiError::MissingCode`] - no authorization code in the callback
/// - [`ApiError::TokenExchange`] - the token endpoint answered non-2xx, could
///   not be reached or returned an unreadable body
pub async fn complete_authorization(
    client: &Client,
    settings: &Settings,
    session: &Session,
    params: &CallbackParams,
) -> Result<String, ApiError> {
    let stored_state = session.take(OAUTH_STATE);
    match (params.state.as_deref(), stored_state.as_deref()) {
        (Some(returned), Some(stored)) if returned == stored => {}
        _ => return Err(ApiError::StateMismatch),
    }

    let code = match params.code.as_deref() {
        Some(code) if !code.is_empty() => code,
        _ => return Err(ApiError::MissingCode),
    };

    let tokens = exchange_code(client, settings, code).await.map_err(|e| {
        warning!("Token exchange failed: {}", e);
        ApiError::TokenExchange(e.to_string())
    })?;

    session.insert(ACCESS_TOKEN, tokens.access_token.clone());
    if let Some(refresh_token) = tokens.refresh_token {
        session.insert(REFRESH_TOKEN, refresh_token);
    }
    success!("Spotify login completed (scope: {})", tokens.scope.as_deref().unwrap_or(SCOPE));

    Ok(format!(
        "{frontend}#access_token={token}",
        frontend = settings.frontend_redirect_uri,
        token = tokens.access_token
    ))
}

/// Exchanges the session's refresh token for a new access token.
///
/// Overwrites `access_token` in the session. When the provider rotates the
/// refresh token, the new one replaces the stored one as well.
///
/// # Errors
///
/// - [`ApiError::NoRefreshToken`] - the session holds no refresh token
/// - [`ApiError::Refresh`] - the token endpoint answered non-2xx, could not be
///   reached or returned an unreadable body
pub async fn refresh(
    client: &Client,
    settings: &Settings,
    session: &Session,
) -> Result<String, ApiError> {
    let Some(refresh_token) = session.get(REFRESH_TOKEN) else {
        return Err(ApiError::NoRefreshToken);
    };

    let tokens = refresh_grant(client, settings, &refresh_token)
        .await
        .map_err(|e| {
            warning!("Token refresh failed: {}", e);
            ApiError::Refresh(e.to_string())
        })?;

    session.insert(ACCESS_TOKEN, tokens.access_token.clone());
    if let Some(rotated) = tokens.refresh_token {
        session.insert(REFRESH_TOKEN, rotated);
    }

    Ok(tokens.access_token)
}

async fn exchange_code(
    client: &Client,
    settings: &Settings,
    code: &str,
) -> Result<TokenSet, reqwest::Error> {
    request_token(
        client,
        settings,
        &[
            ("grant_type", "authorization_code"),
            ("code", code),
            ("redirect_uri", settings.spotify_redirect_uri.as_str()),
            ("client_id", settings.spotify_client_id.as_str()),
            ("client_secret", settings.spotify_client_secret.as_str()),
        ],
    )
    .await
}

async fn refresh_grant(
    client: &Client,
    settings: &Settings,
    refresh_token: &str,
) -> Result<TokenSet, reqwest::Error> {
    request_token(
        client,
        settings,
        &[
            ("grant_type", "refresh_token"),
            ("refresh_token", refresh_token),
            ("client_id", settings.spotify_client_id.as_str()),
            ("client_secret", settings.spotify_client_secret.as_str()),
        ],
    )
    .await
}

async fn request_token(
    client: &Client,
    settings: &Settings,
    form: &[(&str, &str)],
) -> Result<TokenSet, reqwest::Error> {
    client
        .post(&settings.spotify_token_url)
        .form(form)
        .send()
        .await?
        .error_for_status()?
        .json::<TokenSet>()
        .await
}

fn encode_query(params: &[(&str, &str)]) -> String {
    params
        .iter()
        .map(|(key, value)| format!("{}={}", key, urlencoding::encode(value)))
        .collect::<Vec<_>>()
        .join("&")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn encode_query_escapes_values() {
        let query = encode_query(&[
            ("redirect_uri", "https://localhost:5000/callback"),
            ("scope", "a b"),
        ]);
        assert_eq!(
            query,
            "redirect_uri=https%3A%2F%2Flocalhost%3A5000%2Fcallback&scope=a%20b"
        );
    }
}

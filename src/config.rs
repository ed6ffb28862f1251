//! Configuration management for sporlyrics.
//!
//! This module handles loading and accessing configuration values from environment
//! variables and `.env` files. Values are collected once at startup into a
//! [`Settings`] value which is shared read-only with every request handler.
//!
//! The configuration system follows a hierarchical approach:
//! 1. Environment variables (highest priority)
//! 2. `.env` file in the working directory
//! 3. `.env` file in the local data directory
//! 4. Application defaults (where applicable)

use std::{env, io::ErrorKind, path::PathBuf, time::Duration};

use thiserror::Error;

use crate::{session::DEFAULT_IDLE_TIMEOUT, utils, warning};

pub const DEFAULT_SERVER_ADDRESS: &str = "0.0.0.0:5000";
pub const DEFAULT_SPOTIFY_AUTH_URL: &str = "https://accounts.spotify.com/authorize";
pub const DEFAULT_SPOTIFY_TOKEN_URL: &str = "https://accounts.spotify.com/api/token";
pub const DEFAULT_SPOTIFY_API_URL: &str = "https://api.spotify.com/v1";
pub const DEFAULT_GENIUS_API_URL: &str = "https://api.genius.com";
pub const DEFAULT_TRANSLATE_URL: &str = "https://translate.googleapis.com/translate_a/single";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{0} must be set")]
    Missing(&'static str),
    #[error("{name} has an invalid value: {value}")]
    Invalid { name: &'static str, value: String },
    #[error("{set} is set but {missing} is not")]
    IncompleteTls {
        set: &'static str,
        missing: &'static str,
    },
    #[error("cannot prepare data directory: {0}")]
    Io(#[from] std::io::Error),
}

/// Certificate and key paths for serving over TLS.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TlsPaths {
    pub cert: PathBuf,
    pub key: PathBuf,
}

/// Runtime settings of the server.
///
/// All fields are public so tests can point the upstream URLs at local fakes.
#[derive(Debug, Clone)]
pub struct Settings {
    pub server_addr: String,
    pub spotify_client_id: String,
    pub spotify_client_secret: String,
    pub spotify_redirect_uri: String,
    pub spotify_auth_url: String,
    pub spotify_token_url: String,
    pub spotify_api_url: String,
    pub frontend_redirect_uri: String,
    pub genius_api_token: String,
    pub genius_api_url: String,
    pub translate_url: String,
    pub session_secret: String,
    /// Idle time after which a session and its cookie expire.
    pub session_idle_timeout: Duration,
    pub tls: Option<TlsPaths>,
    pub cors_allowed_origins: Vec<String>,
}

impl Settings {
    /// Collects the settings from the process environment.
    ///
    /// Call [`load_env`] first so values from `.env` files are visible.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Missing`] for the first required variable that is
    /// not set, [`ConfigError::Invalid`] for a malformed
    /// `SESSION_IDLE_TIMEOUT_SECS` and [`ConfigError::IncompleteTls`] when only
    /// one of the TLS paths is configured.
    pub fn from_env() -> Result<Self, ConfigError> {
        Ok(Self {
            server_addr: server_addr(),
            spotify_client_id: required("SPOTIFY_CLIENT_ID")?,
            spotify_client_secret: required("SPOTIFY_CLIENT_SECRET")?,
            spotify_redirect_uri: required("SPOTIFY_REDIRECT_URI")?,
            spotify_auth_url: or_default("SPOTIFY_AUTH_URL", DEFAULT_SPOTIFY_AUTH_URL),
            spotify_token_url: or_default("SPOTIFY_TOKEN_URL", DEFAULT_SPOTIFY_TOKEN_URL),
            spotify_api_url: or_default("SPOTIFY_API_URL", DEFAULT_SPOTIFY_API_URL),
            frontend_redirect_uri: required("FRONTEND_REDIRECT_URI")?,
            genius_api_token: required("GENIUS_API_TOKEN")?,
            genius_api_url: or_default("GENIUS_API_URL", DEFAULT_GENIUS_API_URL),
            translate_url: or_default("TRANSLATE_URL", DEFAULT_TRANSLATE_URL),
            session_secret: session_secret(),
            session_idle_timeout: session_idle_timeout()?,
            tls: tls_paths()?,
            cors_allowed_origins: cors_allowed_origins(),
        })
    }
}

/// Loads environment variables from `.env` files.
///
/// Looks in the working directory first and then in the platform-specific
/// local data directory under `sporlyrics/.env`:
/// - Linux: `~/.local/share/sporlyrics/.env`
/// - macOS: `~/Library/Application Support/sporlyrics/.env`
/// - Windows: `%LOCALAPPDATA%/sporlyrics/.env`
///
/// Variables already present in the environment are never overridden and a
/// missing file is not an error, so deployments can rely on the process
/// environment alone. A file that exists but cannot be read or parsed is
/// reported with a warning.
///
/// # Errors
///
/// Fails only when the data directory cannot be created.
pub async fn load_env() -> Result<(), ConfigError> {
    if let Some(problem) = env_file_problem(&dotenv::dotenv()) {
        warning!("Cannot load .env from the working directory. Err: {}", problem);
    }

    let mut path = dirs::data_local_dir().unwrap_or_else(|| PathBuf::from("."));
    path.push("sporlyrics/.env");
    if let Some(parent) = path.parent() {
        async_fs::create_dir_all(parent).await?;
    }

    if let Some(problem) = env_file_problem(&dotenv::from_path(&path)) {
        warning!("Cannot load {}. Err: {}", path.display(), problem);
    }
    Ok(())
}

/// Describes why an existing `.env` file was not loaded. A missing file is fine.
fn env_file_problem<T>(result: &Result<T, dotenv::Error>) -> Option<String> {
    match result {
        Ok(_) => None,
        Err(dotenv::Error::Io(e)) if e.kind() == ErrorKind::NotFound => None,
        Err(e) => Some(e.to_string()),
    }
}

/// Returns the address the HTTP server binds to, `0.0.0.0:5000` unless
/// `SERVER_ADDRESS` is set.
pub fn server_addr() -> String {
    or_default("SERVER_ADDRESS", DEFAULT_SERVER_ADDRESS)
}

/// Returns the secret used to sign session cookies.
///
/// Falls back to a random per-process secret when `SESSION_SECRET` is unset.
/// Sessions then do not survive a restart.
pub fn session_secret() -> String {
    match env::var("SESSION_SECRET") {
        Ok(secret) if !secret.is_empty() => secret,
        _ => {
            warning!("SESSION_SECRET is not set, using a random secret for this process");
            format!("fallback_dev_secret_{}", utils::generate_token(32))
        }
    }
}

/// Returns how long a session may stay unused, `SESSION_IDLE_TIMEOUT_SECS` or
/// one day.
///
/// # Errors
///
/// A value that is not a positive number of seconds is an error.
pub fn session_idle_timeout() -> Result<Duration, ConfigError> {
    match optional("SESSION_IDLE_TIMEOUT_SECS") {
        Some(raw) => parse_idle_timeout(&raw).ok_or(ConfigError::Invalid {
            name: "SESSION_IDLE_TIMEOUT_SECS",
            value: raw,
        }),
        None => Ok(DEFAULT_IDLE_TIMEOUT),
    }
}

fn parse_idle_timeout(raw: &str) -> Option<Duration> {
    raw.trim()
        .parse::<u64>()
        .ok()
        .filter(|secs| *secs > 0)
        .map(Duration::from_secs)
}

/// Returns the TLS certificate and key paths when both are configured.
///
/// # Errors
///
/// Configuring only one of `SSL_CERT_PATH` and `SSL_KEY_PATH` is an error.
pub fn tls_paths() -> Result<Option<TlsPaths>, ConfigError> {
    match (optional("SSL_CERT_PATH"), optional("SSL_KEY_PATH")) {
        (Some(cert), Some(key)) => Ok(Some(TlsPaths {
            cert: PathBuf::from(cert),
            key: PathBuf::from(key),
        })),
        (None, None) => Ok(None),
        (Some(_), None) => Err(ConfigError::IncompleteTls {
            set: "SSL_CERT_PATH",
            missing: "SSL_KEY_PATH",
        }),
        (None, Some(_)) => Err(ConfigError::IncompleteTls {
            set: "SSL_KEY_PATH",
            missing: "SSL_CERT_PATH",
        }),
    }
}

/// Returns the origins allowed to make credentialed cross-origin requests.
///
/// An empty list means the request origin is mirrored back.
pub fn cors_allowed_origins() -> Vec<String> {
    optional("CORS_ALLOWED_ORIGINS")
        .map(|origins| parse_origins(&origins))
        .unwrap_or_default()
}

fn parse_origins(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|origin| !origin.is_empty())
        .map(str::to_string)
        .collect()
}

fn required(name: &'static str) -> Result<String, ConfigError> {
    optional(name).ok_or(ConfigError::Missing(name))
}

fn optional(name: &str) -> Option<String> {
    env::var(name).ok().filter(|value| !value.trim().is_empty())
}

fn or_default(name: &str, default: &str) -> String {
    optional(name).unwrap_or_else(|| default.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_origins_skips_blanks() {
        let origins = parse_origins(" http://localhost:3000, ,chrome-extension://abc ,");
        assert_eq!(
            origins,
            vec![
                "http://localhost:3000".to_string(),
                "chrome-extension://abc".to_string()
            ]
        );
    }

    #[test]
    fn idle_timeout_is_positive_seconds() {
        assert_eq!(parse_idle_timeout(" 3600 "), Some(Duration::from_secs(3600)));
        assert_eq!(parse_idle_timeout("0"), None);
        assert_eq!(parse_idle_timeout("-5"), None);
        assert_eq!(parse_idle_timeout("1h"), None);
    }

    #[test]
    fn missing_env_file_is_not_a_problem() {
        let missing = dotenv::from_path("/nonexistent/sporlyrics/.env");
        assert_eq!(env_file_problem(&missing), None);
        assert_eq!(env_file_problem(&Ok::<(), dotenv::Error>(())), None);
    }

    #[test]
    fn malformed_env_file_is_reported() {
        let malformed: Result<(), dotenv::Error> =
            Err(dotenv::Error::LineParse("FOO='unterminated".to_string(), 4));
        assert!(env_file_problem(&malformed).is_some());

        let denied: Result<(), dotenv::Error> = Err(dotenv::Error::Io(std::io::Error::new(
            ErrorKind::PermissionDenied,
            "denied",
        )));
        assert!(env_file_problem(&denied).is_some());
    }

    #[test]
    fn missing_error_names_the_variable() {
        let err = ConfigError::Missing("GENIUS_API_TOKEN");
        assert_eq!(err.to_string(), "GENIUS_API_TOKEN must be set");
    }
}

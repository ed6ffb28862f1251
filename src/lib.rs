//! Spotify lyrics translation backend.
//!
//! This library provides a small HTTP service that reads the track a user is
//! currently playing on Spotify, looks up its lyrics on Genius and returns them
//! translated into a requested language. All the heavy lifting is delegated to
//! the upstream services; this crate sequences the calls, manages the OAuth
//! credentials of a browser session and shapes the responses.
//!
//! # Modules
//!
//! - `api` - HTTP route handlers composing the upstream calls
//! - `cli` - Command-line entry points of the binary
//! - `config` - Environment loading and server settings
//! - `error` - Error taxonomy shared by all routes
//! - `lyrics` - Genius search and lyrics page scraping
//! - `server` - Router assembly and HTTP/TLS serving
//! - `session` - Signed cookie sessions backed by a key/value store
//! - `spotify` - OAuth grants and currently playing track lookup
//! - `translate` - Machine translation adapter
//! - `types` - Data structures and upstream response shapes
//! - `utils` - Random token generation and cookie signing helpers
//!
//! # Example
//!
//! ```
//! use sporlyrics::{config, server};
//!
//! #[tokio::main]
//! async fn main() -> sporlyrics::Res<()> {
//!     config::load_env().await?;
//!     let settings = config::Settings::from_env()?;
//!     server::start_api_server(settings).await
//! }
//! ```

pub mod api;
pub mod cli;
pub mod config;
pub mod error;
pub mod lyrics;
pub mod server;
pub mod session;
pub mod spotify;
pub mod translate;
pub mod types;
pub mod utils;

/// A convenient Result type alias for operations that may fail.
///
/// Used for startup and configuration paths where the concrete error type does
/// not matter to the caller. Request handling uses [`error::ApiError`] instead.
pub type Res<T> = std::result::Result<T, Box<dyn std::error::Error + Send + Sync>>;

/// Prints an informational message with a blue bullet point.
///
/// # Example
///
/// ```
/// info!("Listening on {}", addr);
/// ```
#[macro_export]
macro_rules! info {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "o".blue().bold(), std::format_args!($($arg)*));
  })
}

/// Prints a success message with a green checkmark.
#[macro_export]
macro_rules! success {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "✓".green().bold(), std::format_args!($($arg)*));
  })
}

/// Prints an error message with a red exclamation mark and exits the program.
///
/// Only meant for fatal startup failures. Request handlers never call this;
/// they report failures through [`error::ApiError`] responses.
///
/// # Example
///
/// ```
/// error!("Cannot load settings. Err: {}", e);
/// // Program exits here
/// ```
#[macro_export]
macro_rules! error {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "!".red().bold(), std::format_args!($($arg)*));
    std::process::exit(1);
  })
}

/// Prints a warning message with a yellow exclamation mark.
///
/// Used for recoverable problems: failed upstream calls that are turned into
/// error responses, swallowed lyrics lookups and insecure fallbacks.
///
/// # Example
///
/// ```
/// warning!("Genius search failed: {}", reason);
/// ```
#[macro_export]
macro_rules! warning {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "!".yellow().bold(), std::format_args!($($arg)*));
  })
}

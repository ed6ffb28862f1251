//! # CLI Module
//!
//! Command implementations of the `sporlyrics` binary.
//!
//! - [`serve`] - Loads the settings and runs the HTTP server, optionally
//!   opening the login page in the browser
//!
//! Shell completions are generated directly in `main` from the clap command.

mod serve;

pub use serve::{login_url, serve};

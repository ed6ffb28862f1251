//! # Lyrics Module
//!
//! Finds lyrics for a track on Genius in two steps:
//!
//! 1. [`find_lyrics_url`] asks the Genius search API for `"{song} {artist}"`
//!    and keeps the first hit's page URL.
//! 2. [`scrape_lyrics`] downloads that page and hands the HTML to
//!    [`extract_lyrics_text`].
//!
//! Both steps are best effort. Their outcome is a [`Lookup`] so callers can
//! tell "nothing there" from "the call failed" when logging, even though the
//! routes report both the same way.
//!
//! The page parser depends on the undocumented `data-lyrics-container`
//! attribute of Genius pages and may break whenever the site changes.

mod scrape;
mod search;

pub use scrape::{LYRICS_CONTAINER_SELECTOR, extract_lyrics_text, scrape_lyrics};
pub use search::find_lyrics_url;

/// Outcome of a best-effort lookup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Lookup<T> {
    Found(T),
    /// The upstream answered but had nothing to offer.
    NotFound,
    /// The upstream could not be asked or its answer could not be read.
    Failed(String),
}

impl<T> Lookup<T> {
    /// Collapses the outcome to the found value, treating failures like misses.
    pub fn found(self) -> Option<T> {
        match self {
            Lookup::Found(value) => Some(value),
            Lookup::NotFound | Lookup::Failed(_) => None,
        }
    }
}

impl<T> From<Option<T>> for Lookup<T> {
    fn from(value: Option<T>) -> Self {
        value.map_or(Lookup::NotFound, Lookup::Found)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn failed_and_not_found_collapse_alike() {
        let missing: Lookup<String> = Lookup::NotFound;
        let failed: Lookup<String> = Lookup::Failed("connection refused".into());

        assert_eq!(missing.found(), None);
        assert_eq!(failed.found(), None);
        assert_eq!(Lookup::Found(1).found(), Some(1));
    }

    #[test]
    fn from_option() {
        assert_eq!(Lookup::from(Some("x")), Lookup::Found("x"));
        assert_eq!(Lookup::<&str>::from(None), Lookup::NotFound);
    }
}

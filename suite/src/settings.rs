//! Command-line values layered over the environment.
//!
//! Flags replace the matching variable before anything is read, so a broken
//! `BOOKSTORE_FIXTURES` or `BOOKSTORE_BASE_URL` does not matter once the
//! command line supplies its own value.

use std::path::Path;

use bookstore_core::{BookStoreConfig, ConfigError};

#[derive(Debug, Clone, Copy, Default)]
pub struct Overrides<'a> {
    pub base_url: Option<&'a str>,
    pub fixtures: Option<&'a Path>,
}

pub fn resolve(
    overrides: Overrides<'_>,
    lookup: impl Fn(&str) -> Option<String>,
) -> Result<BookStoreConfig, ConfigError> {
    BookStoreConfig::from_lookup(|key| match key {
        "BOOKSTORE_BASE_URL" => overrides.base_url.map(str::to_string).or_else(|| lookup(key)),
        "BOOKSTORE_FIXTURES" => overrides
            .fixtures
            .map(|path| path.to_string_lossy().into_owned())
            .or_else(|| lookup(key)),
        _ => lookup(key),
    })
}

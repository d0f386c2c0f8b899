//! API key shape check
//!
//! Google API keys are `AIza` followed by 35 URL-safe characters. The check is
//! purely syntactic; use [`crate::validation::is_valid_api_key`] to ask the API.

use once_cell::sync::Lazy;
use regex::Regex;

static API_KEY_PATTERN: Lazy<Option<Regex>> =
    Lazy::new(|| Regex::new(r"^AIza[0-9A-Za-z_-]{35}$").ok());

/// Whether `key` (after trimming) has the shape of a Google API key.
pub fn can_be_valid_api_key(key: &str) -> bool {
    let key = key.trim();
    match API_KEY_PATTERN.as_ref() {
        Some(re) => re.is_match(key),
        None => false,
    }
}

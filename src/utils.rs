//! String helpers for affiliation text plus small runtime helpers.
//!
//! - Country extraction and normalization from affiliation addresses
//! - Author list splitting
//! - Worker pool sizing
//! - String truncation for logging

use once_cell::sync::Lazy;
use regex::Regex;

use crate::error::{Error, Result};

static AUTHOR_SEPARATOR: Lazy<Regex> = Lazy::new(|| Regex::new(r"[,&]").unwrap());

const NETHERLANDS: &str = "The Netherlands";

/// Upper bound on the default worker count.
const MAX_DEFAULT_JOBS: usize = 32;

/// Take the country out of an affiliation address.
///
/// The country is whatever follows the last comma, trimmed. An address
/// without a comma does not match the expected layout.
///
/// # Examples
///
/// ```ignore
/// assert_eq!(country_from_address("MRC, Cambridge, United Kingdom")?, "United Kingdom");
/// ```
pub fn country_from_address(address: &str) -> Result<&str> {
    address
        .rsplit_once(',')
        .map(|(_, country)| country.trim())
        .ok_or_else(|| Error::parse(format!("address has no country segment: {address:?}")))
}

/// Fold spelling variants onto one tally key.
///
/// Anything mentioning "Netherlands" becomes "The Netherlands". Other
/// countries are returned unchanged. Applying it twice is the same as once.
pub fn normalize_country(country: &str) -> String {
    if country.contains("Netherlands") {
        NETHERLANDS.to_string()
    } else {
        country.to_string()
    }
}

/// Split an authors line such as `"A. Smith, B. Jones & C. Wu"` into names.
///
/// Every fragment is kept, so doubled separators (`"A, & B"`) yield an empty
/// name between them.
pub fn split_authors(authors: &str) -> Vec<String> {
    AUTHOR_SEPARATOR
        .split(authors)
        .map(|name| name.trim().to_string())
        .collect()
}

/// Default size of the article worker pool: processors plus four, capped at 32.
pub fn default_jobs() -> usize {
    let cpus = std::thread::available_parallelism()
        .map(|n| n.get())
        .unwrap_or(1);
    (cpus + 4).min(MAX_DEFAULT_JOBS)
}

/// Truncate a string for logging purposes.
///
/// Long strings are cut at `max` bytes (backing off to a char boundary) with
/// an ellipsis and the number of dropped bytes appended.
pub fn truncate_for_log(s: &str, max: usize) -> String {
    if s.len() <= max {
        return s.to_string();
    }
    let mut end = max;
    while !s.is_char_boundary(end) {
        end -= 1;
    }
    format!("{}…(+{} bytes)", &s[..end], s.len() - end)
}

//! Small shared utilities: escaping, URL building, vocabulary loading.
use std::path::Path;

use percent_encoding::{NON_ALPHANUMERIC, utf8_percent_encode};
use thiserror::Error;

use crate::types::TagEntry;

/// Error type for vocabulary loading.
#[derive(Debug, Error)]
pub enum VocabError {
  #[error("I/O error: {0}")]
  Io(#[from] std::io::Error),

  #[error("Serde error: {0}")]
  Serde(#[from] serde_json::Error),
}

/// Escape text for use inside an element body.
#[must_use]
pub fn escape_text(text: &str) -> String {
  html_escape::encode_text(text).to_string()
}

/// Escape text for use inside a double-quoted attribute value.
#[must_use]
pub fn escape_attribute(text: &str) -> String {
  html_escape::encode_double_quoted_attribute(text).to_string()
}

/// Percent-encode a single query component.
#[must_use]
pub fn encode_component(value: &str) -> String {
  utf8_percent_encode(value, NON_ALPHANUMERIC).to_string()
}

/// Build an internal-search URL for a matched literal.
///
/// The literal keeps its source casing and is percent-encoded into the
/// query string: `{base}/?s={literal}`.
#[must_use]
pub fn search_url(base: &str, literal: &str) -> String {
  format!(
    "{}/?s={}",
    base.trim_end_matches('/'),
    encode_component(literal)
  )
}

/// Load an ordered tag vocabulary from a JSON array of
/// `{ "name": ..., "url": ... }` objects.
///
/// The core never calls this implicitly; it is a convenience for the
/// embedding system, which owns where vocabularies actually live.
///
/// # Errors
///
/// Returns an error if the file cannot be read or if the JSON is invalid.
pub fn load_tag_vocabulary(path: &Path) -> Result<Vec<TagEntry>, VocabError> {
  let content = std::fs::read_to_string(path)?;
  let entries: Vec<TagEntry> = serde_json::from_str(&content)?;
  Ok(entries)
}

/// Create a regex that never matches anything.
///
/// Used as a fallback when a pattern fails to compile. It asserts something
/// impossible, which is safer than a trivial pattern like `^$` that would
/// still match empty strings.
///
/// # Panics
///
/// Panics if the fallback pattern `r"^\b$"` fails to compile, which should
/// never happen.
#[must_use]
#[allow(clippy::unwrap_used, reason = "The fallback pattern is guaranteed valid")]
pub fn never_matching_regex() -> regex::Regex {
  regex::Regex::new(r"[^\s\S]")
    .unwrap_or_else(|_| regex::Regex::new(r"^\b$").unwrap())
}

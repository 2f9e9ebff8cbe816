//! Splitting shielded content into markup and text segments.
//!
//! A segment is either a single `<...>` tag (opaque, never rewritten) or a
//! maximal run of text between tags (eligible for linking). Segmentation is
//! lossless: concatenating the segments reproduces the input exactly.

use std::sync::LazyLock;

use regex::Regex;
use thiserror::Error;

use crate::types::Segment;

/// Error type for segmentation.
///
/// The orchestrator reacts to any segmentation error by treating the whole
/// input as inert text: matching is skipped and the content passes through
/// unlinked, never dropped.
#[derive(Debug, Error)]
pub enum SegmentError {
  #[error("tag delimiter pattern unavailable: {0}")]
  Pattern(#[from] regex::Error),
}

// A tag is everything from `<` to the next `>`, inclusive. No nesting
// semantics; a literal `>` inside an attribute value ends the tag early.
static TAG_RE: LazyLock<Result<Regex, regex::Error>> =
  LazyLock::new(|| Regex::new(r"<[^>]*>"));

/// Split shielded content into an ordered markup/text segment sequence.
///
/// Empty segments are discarded; input without any tag delimiter yields a
/// single text segment.
///
/// # Errors
///
/// Returns [`SegmentError`] if the tag delimiter pattern is unavailable.
pub fn segment(content: &str) -> Result<Vec<Segment>, SegmentError> {
  let tag_re = TAG_RE
    .as_ref()
    .map_err(|e| SegmentError::Pattern(e.clone()))?;

  let mut segments = Vec::new();
  let mut cursor = 0;

  for found in tag_re.find_iter(content) {
    if found.start() > cursor {
      segments.push(Segment::text(&content[cursor..found.start()]));
    }
    segments.push(Segment::markup(found.as_str()));
    cursor = found.end();
  }

  if cursor < content.len() {
    segments.push(Segment::text(&content[cursor..]));
  }

  Ok(segments)
}

//! Types for the taglink public API and internal use.
use serde::{Deserialize, Serialize};

/// Where a linkable term came from.
///
/// Custom words are always matched before tag names; a term that exists in
/// both sources only ever links once, by custom-word priority.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TermOrigin {
  /// Configured by hand in the custom word list.
  CustomWord,
  /// Provided by the tag vocabulary.
  Tag,
}

/// A term eligible for linking.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LinkableTerm {
  /// The literal word or phrase to match. Display is case-sensitive, the
  /// match itself is case-insensitive.
  pub text: String,

  /// Explicit destination URL. `None` means "link to an internal search
  /// for the matched literal".
  pub destination: Option<String>,

  /// Which rule set this term belongs to.
  pub origin: TermOrigin,
}

impl LinkableTerm {
  /// Create a custom-word term with an optional explicit destination.
  #[must_use]
  pub fn custom(text: impl Into<String>, destination: Option<String>) -> Self {
    Self {
      text: text.into(),
      destination,
      origin: TermOrigin::CustomWord,
    }
  }

  /// Create a tag-sourced term. Tags always carry an explicit URL.
  #[must_use]
  pub fn tag(text: impl Into<String>, url: impl Into<String>) -> Self {
    Self {
      text:        text.into(),
      destination: Some(url.into()),
      origin:      TermOrigin::Tag,
    }
  }

  /// Lower-cased key used for budgets, the blacklist and the
  /// processed-word set.
  #[must_use]
  pub fn key(&self) -> String {
    self.text.to_lowercase()
  }
}

/// Classification of a content slice after segmentation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SegmentKind {
  /// A single markup tag, opaque and unsplittable.
  Markup,
  /// Linkable text between tags.
  Text,
}

/// A contiguous slice of the input after segmentation.
///
/// Concatenating all segments' `content` in order reproduces the
/// post-shielding input exactly.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Segment {
  /// Whether this slice is an opaque tag or linkable text.
  pub kind: SegmentKind,

  /// The literal slice.
  pub content: String,
}

impl Segment {
  /// Construct a markup segment.
  #[must_use]
  pub fn markup(content: impl Into<String>) -> Self {
    Self {
      kind:    SegmentKind::Markup,
      content: content.into(),
    }
  }

  /// Construct a text segment.
  #[must_use]
  pub fn text(content: impl Into<String>) -> Self {
    Self {
      kind:    SegmentKind::Text,
      content: content.into(),
    }
  }
}

/// One entry of the tag vocabulary: a tag name and its archive URL.
///
/// The vocabulary is an *ordered* list and ordering is significant: when
/// budgets are tight across overlapping term spellings, earlier entries
/// consume occurrences first.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TagEntry {
  /// Tag name as displayed and matched.
  pub name: String,

  /// Destination URL for the tag archive.
  pub url: String,
}

impl TagEntry {
  /// Create a vocabulary entry.
  #[must_use]
  pub fn new(name: impl Into<String>, url: impl Into<String>) -> Self {
    Self {
      name: name.into(),
      url:  url.into(),
    }
  }
}

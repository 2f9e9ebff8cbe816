//! Configuration for the linking pipeline.
//!
//! Two layers, mirroring how the surrounding system stores and uses
//! settings:
//!
//! - [`LinkerSettings`] is the storage-facing snapshot: raw newline-separated
//!   text fields, serde-compatible, with defaults applied for every missing
//!   key.
//! - [`LinkerOptions`] is the resolved form the pipeline consumes: parsed
//!   term list, lower-cased blacklist set, clamped numeric limits.
//!
//! The core never reads settings from disk; the embedding system fetches
//! the snapshot and calls [`LinkerSettings::resolve`] before invoking the
//! transform.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::types::LinkableTerm;

/// Default style applied to generated links when no custom CSS is
/// configured.
pub const DEFAULT_LINK_CSS: &str = ".auto-tag-link { text-decoration: none \
                                    !important; color: inherit; } \
                                    .auto-tag-link:hover { text-decoration: \
                                    none !important; color: inherit; }";

const fn default_max_links() -> u32 {
  1
}

const fn default_true() -> bool {
  true
}

fn default_document_types() -> Vec<String> {
  vec!["post".to_string()]
}

fn default_custom_css() -> String {
  DEFAULT_LINK_CSS.to_string()
}

/// Raw configuration snapshot as the settings store hands it over.
///
/// All fields have defaults so a partial (or empty) stored snapshot
/// deserializes cleanly.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
#[allow(
  clippy::struct_excessive_bools,
  reason = "Config struct with related boolean flags"
)]
pub struct LinkerSettings {
  /// Maximum links produced per distinct term in one call. UI range is
  /// 1-10; zero is clamped to 1 on resolution.
  pub max_links_per_term: u32,

  /// Open generated links in a new window.
  pub open_new_window: bool,

  /// Match terms from the tag vocabulary.
  pub enable_tags: bool,

  /// Match terms from the custom word list.
  pub enable_custom_words: bool,

  /// Document types linking is enabled for.
  pub enabled_document_types: Vec<String>,

  /// Custom word list, one entry per line: `word` or `word|url`.
  pub custom_words: String,

  /// Terms never to link, one per line.
  pub blacklist: String,

  /// Raw CSS emitted for generated links.
  pub custom_css: String,

  /// Site base URL used to build internal-search destinations.
  pub search_base: String,
}

impl Default for LinkerSettings {
  fn default() -> Self {
    Self {
      max_links_per_term:     default_max_links(),
      open_new_window:        false,
      enable_tags:            true,
      enable_custom_words:    true,
      enabled_document_types: default_document_types(),
      custom_words:           String::new(),
      blacklist:              String::new(),
      custom_css:             default_custom_css(),
      search_base:            String::new(),
    }
  }
}

impl LinkerSettings {
  /// Resolve the raw snapshot into the form the pipeline consumes.
  ///
  /// Parses the custom word list, lower-cases the blacklist and clamps
  /// invalid numeric values rather than rejecting them.
  #[must_use]
  pub fn resolve(&self) -> LinkerOptions {
    LinkerOptions {
      max_links_per_term:     self.max_links_per_term.max(1),
      open_new_window:        self.open_new_window,
      enable_tags:            self.enable_tags,
      enable_custom_words:    self.enable_custom_words,
      enabled_document_types: self
        .enabled_document_types
        .iter()
        .cloned()
        .collect(),
      custom_terms:           parse_custom_words(&self.custom_words),
      blacklist:              parse_blacklist(&self.blacklist),
      custom_css:             self.custom_css.clone(),
      search_base:            self.search_base.clone(),
    }
  }
}

/// Resolved configuration consumed by [`crate::LinkProcessor`].
#[derive(Debug, Clone)]
#[allow(
  clippy::struct_excessive_bools,
  reason = "Config struct with related boolean flags"
)]
pub struct LinkerOptions {
  /// Maximum links per distinct term per transform call, always >= 1.
  pub max_links_per_term: u32,

  /// Open generated links in a new window.
  pub open_new_window: bool,

  /// Match terms from the tag vocabulary.
  pub enable_tags: bool,

  /// Match terms from the custom word list.
  pub enable_custom_words: bool,

  /// Document types linking is enabled for.
  pub enabled_document_types: HashSet<String>,

  /// Parsed custom word terms, in configured order.
  pub custom_terms: Vec<LinkableTerm>,

  /// Lower-cased terms never to link.
  pub blacklist: HashSet<String>,

  /// Raw CSS emitted for generated links.
  pub custom_css: String,

  /// Site base URL used to build internal-search destinations.
  pub search_base: String,
}

impl Default for LinkerOptions {
  fn default() -> Self {
    LinkerSettings::default().resolve()
  }
}

/// Parse the newline-separated custom word list.
///
/// Each line is `word` or `word|url`; surrounding whitespace is trimmed on
/// both halves. Empty and whitespace-only lines produce no term. An empty
/// URL half means "internal search".
#[must_use]
pub fn parse_custom_words(text: &str) -> Vec<LinkableTerm> {
  let mut terms = Vec::new();

  for line in text.lines() {
    let line = line.trim();
    if line.is_empty() {
      continue;
    }

    let (word, url) = match line.split_once('|') {
      Some((word, url)) => (word.trim(), url.trim()),
      None => (line, ""),
    };

    if word.is_empty() {
      continue;
    }

    let destination = if url.is_empty() {
      None
    } else {
      Some(url.to_string())
    };
    terms.push(LinkableTerm::custom(word, destination));
  }

  terms
}

/// Parse the newline-separated blacklist into a lower-cased set.
#[must_use]
pub fn parse_blacklist(text: &str) -> HashSet<String> {
  text
    .lines()
    .map(str::trim)
    .filter(|line| !line.is_empty())
    .map(str::to_lowercase)
    .collect()
}

/// Builder for constructing [`LinkerOptions`] with method chaining.
///
/// Mostly useful in tests and embeddings that assemble configuration in
/// code rather than deserializing a stored snapshot.
#[derive(Debug, Clone, Default)]
pub struct LinkerOptionsBuilder {
  options: LinkerOptions,
}

impl LinkerOptionsBuilder {
  /// Create a new builder with default options.
  #[must_use]
  pub fn new() -> Self {
    Self::default()
  }

  /// Set the per-term link budget. Zero is clamped to 1.
  #[must_use]
  pub fn max_links_per_term(mut self, max: u32) -> Self {
    self.options.max_links_per_term = max.max(1);
    self
  }

  /// Open generated links in a new window.
  #[must_use]
  pub const fn open_new_window(mut self, enabled: bool) -> Self {
    self.options.open_new_window = enabled;
    self
  }

  /// Enable or disable the tag vocabulary rule set.
  #[must_use]
  pub const fn enable_tags(mut self, enabled: bool) -> Self {
    self.options.enable_tags = enabled;
    self
  }

  /// Enable or disable the custom word rule set.
  #[must_use]
  pub const fn enable_custom_words(mut self, enabled: bool) -> Self {
    self.options.enable_custom_words = enabled;
    self
  }

  /// Replace the enabled document type set.
  #[must_use]
  pub fn document_types<I, S>(mut self, types: I) -> Self
  where
    I: IntoIterator<Item = S>,
    S: Into<String>,
  {
    self.options.enabled_document_types =
      types.into_iter().map(Into::into).collect();
    self
  }

  /// Append a custom word with an optional explicit destination.
  #[must_use]
  pub fn custom_word(
    mut self,
    word: impl Into<String>,
    destination: Option<String>,
  ) -> Self {
    self
      .options
      .custom_terms
      .push(LinkableTerm::custom(word, destination));
    self
  }

  /// Append a blacklist entry.
  #[must_use]
  pub fn blacklist_term(mut self, term: impl Into<String>) -> Self {
    self.options.blacklist.insert(term.into().to_lowercase());
    self
  }

  /// Set the custom CSS emitted for generated links.
  #[must_use]
  pub fn custom_css(mut self, css: impl Into<String>) -> Self {
    self.options.custom_css = css.into();
    self
  }

  /// Set the site base URL for internal-search destinations.
  #[must_use]
  pub fn search_base(mut self, base: impl Into<String>) -> Self {
    self.options.search_base = base.into();
    self
  }

  /// Build the final [`LinkerOptions`].
  #[must_use]
  pub fn build(self) -> LinkerOptions {
    self.options
  }
}

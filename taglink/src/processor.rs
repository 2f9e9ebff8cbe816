//! The content transform: gating, stage wiring and degradation policy.
use std::collections::HashSet;

use log::{debug, warn};

use crate::{
  matcher::{AnchorStyle, LinkBudget, link_terms},
  options::LinkerOptions,
  segment,
  shield,
  types::{LinkableTerm, SegmentKind, TagEntry},
  utils::escape_text,
};

/// Where and for what a transform call is being made.
///
/// The transform only runs for a primary single-document render of an
/// enabled document type with no per-document override; everything else
/// passes through unchanged.
#[derive(Debug, Clone)]
pub struct RenderContext {
  /// Type identifier of the document being rendered.
  pub document_type: String,

  /// Per-document override: `true` suppresses all linking.
  pub linking_disabled: bool,

  /// `true` only for a single-document primary-query render; feeds and
  /// archive/listing views are excluded.
  pub primary_render: bool,
}

impl RenderContext {
  /// Context for a primary single-document render with no override set.
  #[must_use]
  pub fn primary(document_type: impl Into<String>) -> Self {
    Self {
      document_type:    document_type.into(),
      linking_disabled: false,
      primary_render:   true,
    }
  }

  /// Set the per-document override flag.
  #[must_use]
  pub const fn with_linking_disabled(mut self, disabled: bool) -> Self {
    self.linking_disabled = disabled;
    self
  }

  /// Mark this as a non-primary render (feed, archive, listing).
  #[must_use]
  pub const fn secondary(mut self) -> Self {
    self.primary_render = false;
    self
  }
}

/// The auto-linking pipeline.
///
/// Immutable after construction; all per-call state (budgets, shield
/// record, processed-word set) lives inside [`Self::transform`], so one
/// processor can serve concurrent callers.
#[derive(Debug, Clone)]
pub struct LinkProcessor {
  options:    LinkerOptions,
  vocabulary: Vec<TagEntry>,
}

impl LinkProcessor {
  /// Create a processor from a resolved configuration snapshot and an
  /// ordered tag vocabulary.
  #[must_use]
  pub const fn new(
    options: LinkerOptions,
    vocabulary: Vec<TagEntry>,
  ) -> Self {
    Self {
      options,
      vocabulary,
    }
  }

  /// Access processor options.
  #[must_use]
  pub const fn options(&self) -> &LinkerOptions {
    &self.options
  }

  /// Rewrite term occurrences in `content` into anchors.
  ///
  /// Total: always returns a string, never panics to the caller. Any
  /// sub-stage failure degrades to the least-modified safe output; an
  /// empty term list and empty vocabulary simply mean "nothing to link".
  #[must_use]
  pub fn transform(&self, content: &str, ctx: &RenderContext) -> String {
    if ctx.linking_disabled
      || !ctx.primary_render
      || !self
        .options
        .enabled_document_types
        .contains(&ctx.document_type)
    {
      return content.to_string();
    }

    let shielded = shield::shield(content);

    let segments = match segment::segment(&shielded.text) {
      Ok(segments) => segments,
      Err(e) => {
        // Content is never dropped; it is only left unlinked.
        warn!("Segmentation unavailable, passing content through: {e}");
        return shield::restore(&shielded.text, &shielded.anchors);
      },
    };

    let style = AnchorStyle {
      open_new_window: self.options.open_new_window,
      search_base:     self.options.search_base.clone(),
    };

    let tag_terms: Vec<LinkableTerm> = if self.options.enable_tags {
      self
        .vocabulary
        .iter()
        .map(|tag| LinkableTerm::tag(&tag.name, &tag.url))
        .collect()
    } else {
      Vec::new()
    };

    let mut custom_budget = LinkBudget::new(self.options.max_links_per_term);
    let mut tag_budget = LinkBudget::new(self.options.max_links_per_term);
    let mut processed_words: HashSet<String> = HashSet::new();
    let no_skips = HashSet::new();

    let mut output = String::with_capacity(shielded.text.len());
    for seg in segments {
      match seg.kind {
        SegmentKind::Markup => output.push_str(&seg.content),
        SegmentKind::Text => {
          let mut text = seg.content;

          if self.options.enable_custom_words
            && !self.options.custom_terms.is_empty()
          {
            let outcome = link_terms(
              &text,
              &self.options.custom_terms,
              &self.options.blacklist,
              &no_skips,
              custom_budget,
              &style,
            );
            text = outcome.text;
            custom_budget = outcome.budget;
            processed_words.extend(outcome.consumed);
          }

          if !tag_terms.is_empty() {
            let outcome = link_terms(
              &text,
              &tag_terms,
              &self.options.blacklist,
              &processed_words,
              tag_budget,
              &style,
            );
            text = outcome.text;
            tag_budget = outcome.budget;
          }

          output.push_str(&text);
        },
      }
    }

    let links_made = custom_budget.total_spent() + tag_budget.total_spent();
    if links_made > 0 {
      debug!(
        "Linked {links_made} term occurrence(s) in a {} document",
        ctx.document_type
      );
    }

    shield::restore(&output, &shielded.anchors)
  }

  /// Render the configured link CSS as an escaped `<style>` block for the
  /// surrounding system's head emission. Empty CSS yields `None`.
  #[must_use]
  pub fn style_block(&self) -> Option<String> {
    let css = self.options.custom_css.trim();
    if css.is_empty() {
      return None;
    }
    Some(format!(
      "<style type='text/css'>\n{}\n</style>\n",
      escape_text(css)
    ))
  }
}

#[cfg(test)]
mod tests {
  #![allow(clippy::unwrap_used, reason = "Tests can unwrap")]

  use super::*;
  use crate::options::LinkerOptionsBuilder;

  fn processor_with(word: &str, url: &str) -> LinkProcessor {
    let options = LinkerOptionsBuilder::new()
      .custom_word(word, Some(url.to_string()))
      .build();
    LinkProcessor::new(options, Vec::new())
  }

  #[test]
  fn test_override_returns_input_unchanged() {
    let processor = processor_with("Rust", "/r");
    let ctx = RenderContext::primary("post").with_linking_disabled(true);
    assert_eq!(processor.transform("Rust content", &ctx), "Rust content");
  }

  #[test]
  fn test_secondary_render_returns_input_unchanged() {
    let processor = processor_with("Rust", "/r");
    let ctx = RenderContext::primary("post").secondary();
    assert_eq!(processor.transform("Rust content", &ctx), "Rust content");
  }

  #[test]
  fn test_disabled_document_type_returns_input_unchanged() {
    let processor = processor_with("Rust", "/r");
    let ctx = RenderContext::primary("page");
    assert_eq!(processor.transform("Rust content", &ctx), "Rust content");
  }

  #[test]
  fn test_primary_post_is_linked() {
    let processor = processor_with("Rust", "/r");
    let ctx = RenderContext::primary("post");
    assert_eq!(
      processor.transform("Rust content", &ctx),
      "<a href=\"/r\" class=\"auto-tag-link\">Rust</a> content"
    );
  }

  #[test]
  fn test_empty_configuration_is_noop() {
    let processor =
      LinkProcessor::new(LinkerOptionsBuilder::new().build(), Vec::new());
    let ctx = RenderContext::primary("post");
    assert_eq!(processor.transform("some content", &ctx), "some content");
  }

  #[test]
  fn test_style_block_escapes_css() {
    let options = LinkerOptionsBuilder::new()
      .custom_css(".auto-tag-link > em { color: red; }")
      .build();
    let processor = LinkProcessor::new(options, Vec::new());
    let block = processor.style_block().unwrap();
    assert!(block.starts_with("<style type='text/css'>\n"));
    assert!(block.contains("&gt;"));
    assert!(block.ends_with("\n</style>\n"));
  }

  #[test]
  fn test_style_block_empty_css_is_none() {
    let options = LinkerOptionsBuilder::new().custom_css("  ").build();
    let processor = LinkProcessor::new(options, Vec::new());
    assert!(processor.style_block().is_none());
  }
}

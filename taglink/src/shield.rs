//! Shielding of pre-existing anchor elements.
//!
//! Before any matching runs, every `<a>...</a>` already present in the
//! input is swapped for an opaque placeholder so the linking stage can
//! neither link text that is already a link nor mangle an anchor's inner
//! text. The originals are restored verbatim as the final pipeline step.

use std::sync::LazyLock;

use regex::Regex;

use crate::utils::never_matching_regex;

/// Placeholder stem for shielded anchors. The full token is
/// `%%EXISTING_LINK_<n>%%` with a 0-based sequential index.
const PLACEHOLDER_PREFIX: &str = "%%EXISTING_LINK_";

// Non-greedy from a word-boundary-qualified `<a` opener to the *first*
// `</a>`. Nested anchors and a literal `>` inside an attribute value are
// not handled; correct behavior for those is undefined in the systems this
// feeds, so the limitation is kept rather than guessed at.
static ANCHOR_RE: LazyLock<Regex> = LazyLock::new(|| {
  Regex::new(r"(?is)<a\b.*?</a>").unwrap_or_else(|e| {
    log::error!(
      "Failed to compile anchor shielding regex: {e}\n Falling back to \
       never matching regex."
    );
    never_matching_regex()
  })
});

/// Content with its pre-existing anchors swapped for placeholders.
///
/// Valid only within one processing call; the `anchors` list is the
/// ordered shield record keyed by placeholder index.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShieldedContent {
  /// The input with every anchor element replaced by a placeholder token.
  pub text: String,

  /// Original anchor fragments, in order of appearance.
  pub anchors: Vec<String>,
}

/// Replace every anchor element with a unique placeholder token.
///
/// A placeholder is alphanumeric text with no boundary conflicts, so the
/// matching stage passes over it; a user-defined term that happens to match
/// substrings of `EXISTING_LINK` could still split one, which is accepted
/// residual risk.
#[must_use]
pub fn shield(content: &str) -> ShieldedContent {
  let mut anchors = Vec::new();
  let text = ANCHOR_RE
    .replace_all(content, |caps: &regex::Captures| {
      let placeholder = format!("{PLACEHOLDER_PREFIX}{}%%", anchors.len());
      anchors.push(caps[0].to_string());
      placeholder
    })
    .into_owned();

  ShieldedContent { text, anchors }
}

/// Substitute each placeholder token back to its recorded original.
///
/// Placeholders are unique literal strings, so restoration order does not
/// matter.
#[must_use]
pub fn restore(text: &str, anchors: &[String]) -> String {
  let mut restored = text.to_string();
  for (index, original) in anchors.iter().enumerate() {
    let placeholder = format!("{PLACEHOLDER_PREFIX}{index}%%");
    restored = restored.replacen(&placeholder, original, 1);
  }
  restored
}

#[cfg(test)]
mod tests {
  #![allow(clippy::unwrap_used, reason = "Tests can unwrap")]

  use super::*;

  #[test]
  fn test_shield_records_anchors_in_order() {
    let input = r#"one <a href="/x">X</a> two <a href="/y">Y</a> three"#;
    let shielded = shield(input);

    assert_eq!(shielded.anchors.len(), 2);
    assert_eq!(shielded.anchors[0], r#"<a href="/x">X</a>"#);
    assert_eq!(shielded.anchors[1], r#"<a href="/y">Y</a>"#);
    assert_eq!(
      shielded.text,
      "one %%EXISTING_LINK_0%% two %%EXISTING_LINK_1%% three"
    );
  }

  #[test]
  fn test_shield_restore_roundtrip() {
    let input = r#"<p>See <a href="/a">first</a> and <A HREF="/b">second
</A> plus <a
href="/c">multi-line</a>.</p>"#;
    let shielded = shield(input);
    assert_eq!(restore(&shielded.text, &shielded.anchors), input);
  }

  #[test]
  fn test_shield_no_anchors() {
    let input = "<p>no links here</p>";
    let shielded = shield(input);
    assert!(shielded.anchors.is_empty());
    assert_eq!(shielded.text, input);
    assert_eq!(restore(&shielded.text, &shielded.anchors), input);
  }

  #[test]
  fn test_shield_anchor_with_nested_markup() {
    let input = r#"x <a href="/a"><strong>bold</strong> link</a> y"#;
    let shielded = shield(input);
    assert_eq!(shielded.anchors.len(), 1);
    assert_eq!(
      shielded.anchors[0],
      r#"<a href="/a"><strong>bold</strong> link</a>"#
    );
    assert_eq!(shielded.text, "x %%EXISTING_LINK_0%% y");
  }

  #[test]
  fn test_shield_stops_at_first_close() {
    // Nested anchors are a known limitation: the match ends at the first
    // `</a>` and the dangling tail is left in place.
    let input = "<a><a>inner</a>outer</a>";
    let shielded = shield(input);
    assert_eq!(shielded.anchors.len(), 1);
    assert_eq!(shielded.anchors[0], "<a><a>inner</a>");
    assert_eq!(shielded.text, "%%EXISTING_LINK_0%%outer</a>");
  }

  #[test]
  fn test_shield_ignores_abbr() {
    // `<a` must be word-boundary qualified: `<abbr>` is not an anchor.
    let input = "<abbr>HTML</abbr> text";
    let shielded = shield(input);
    assert!(shielded.anchors.is_empty());
    assert_eq!(shielded.text, input);
  }
}

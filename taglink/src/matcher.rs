//! Budgeted term matching and anchor splicing.
//!
//! One matching pass takes a text segment, an ordered term list and the
//! current budgets, and returns the rewritten segment together with the
//! updated budgets and the set of consumed terms. Budgets and consumed
//! terms are explicit values flowing through the call, not captured
//! mutable counters, so a pass is thread-safe and testable in isolation.
//!
//! Matching operates on a piece list: spans produced by earlier
//! replacements are locked, so replacement output is never re-scanned and
//! no anchor introduced here can end up nested inside another.

use std::collections::{HashMap, HashSet};

use regex::Regex;

use crate::{
  types::LinkableTerm,
  utils::{escape_attribute, escape_text, search_url},
};

/// Per-term link counters, scoped to one full transform call.
///
/// Created fresh for every top-level call and discarded at the end of it;
/// never persisted or pooled.
#[derive(Debug, Clone)]
pub struct LinkBudget {
  max:   u32,
  spent: HashMap<String, u32>,
}

impl LinkBudget {
  /// Create a budget allowing `max_links_per_term` links per distinct
  /// term. Zero is clamped to 1.
  #[must_use]
  pub fn new(max_links_per_term: u32) -> Self {
    Self {
      max:   max_links_per_term.max(1),
      spent: HashMap::new(),
    }
  }

  /// Links still permitted for the given lower-cased term key.
  #[must_use]
  pub fn remaining(&self, term_key: &str) -> u32 {
    self.max - self.spent.get(term_key).copied().unwrap_or(0).min(self.max)
  }

  /// Record one link made for the given lower-cased term key.
  pub fn record(&mut self, term_key: &str) {
    *self.spent.entry(term_key.to_string()).or_insert(0) += 1;
  }

  /// Total links made across all terms so far.
  #[must_use]
  pub fn total_spent(&self) -> u32 {
    self.spent.values().sum()
  }
}

/// Anchor rendering parameters shared by both rule sets.
#[derive(Debug, Clone, Default)]
pub struct AnchorStyle {
  /// Add ` target="_blank" rel="noopener noreferrer"` to generated links.
  pub open_new_window: bool,

  /// Site base URL for internal-search destinations.
  pub search_base: String,
}

/// Result of one matching pass over a text segment.
#[derive(Debug)]
pub struct MatchOutcome {
  /// The rewritten segment.
  pub text: String,

  /// The updated budget, to be threaded into the next pass.
  pub budget: LinkBudget,

  /// Lower-cased keys of every term that produced at least one link in
  /// this pass.
  pub consumed: HashSet<String>,
}

/// A span of the working segment during splicing. `Linked` spans are
/// locked: later terms never match inside them.
enum Piece {
  Plain(String),
  Linked(String),
}

/// Rewrite occurrences of `terms` in `text` into anchors.
///
/// Terms are processed in order; per term, occurrences are replaced
/// left-to-right until the budget for that term runs out, and the rest are
/// left as plain text. Whole-word matching with Unicode-aware boundaries,
/// case-insensitive; the anchor text preserves the source casing. Terms
/// whose lower-cased text is in `blacklist` or `skip` produce no links and
/// are not counted.
#[must_use]
pub fn link_terms(
  text: &str,
  terms: &[LinkableTerm],
  blacklist: &HashSet<String>,
  skip: &HashSet<String>,
  mut budget: LinkBudget,
  style: &AnchorStyle,
) -> MatchOutcome {
  let mut consumed = HashSet::new();
  let mut pieces = vec![Piece::Plain(text.to_string())];

  for term in terms {
    let key = term.key();
    if key.is_empty() || blacklist.contains(&key) || skip.contains(&key) {
      continue;
    }
    if budget.remaining(&key) == 0 {
      continue;
    }

    let Some(pattern) = word_pattern(&term.text) else {
      log::warn!("Skipping term {:?}: unusable match pattern", term.text);
      continue;
    };

    let mut next = Vec::with_capacity(pieces.len());
    for piece in pieces {
      match piece {
        Piece::Linked(_) => next.push(piece),
        Piece::Plain(content) => {
          splice(
            &content,
            &pattern,
            term,
            &key,
            &mut budget,
            style,
            &mut consumed,
            &mut next,
          );
        },
      }
    }
    pieces = next;
  }

  let text = pieces
    .into_iter()
    .map(|piece| {
      match piece {
        Piece::Plain(s) | Piece::Linked(s) => s,
      }
    })
    .collect();

  MatchOutcome {
    text,
    budget,
    consumed,
  }
}

/// Replace budget-many matches of one term inside one plain span, pushing
/// the resulting plain/linked pieces onto `out` in order.
#[allow(
  clippy::too_many_arguments,
  reason = "Splice state is deliberately explicit"
)]
fn splice(
  content: &str,
  pattern: &Regex,
  term: &LinkableTerm,
  key: &str,
  budget: &mut LinkBudget,
  style: &AnchorStyle,
  consumed: &mut HashSet<String>,
  out: &mut Vec<Piece>,
) {
  let mut cursor = 0;

  for found in pattern.find_iter(content) {
    if budget.remaining(key) == 0 {
      break;
    }

    if found.start() > cursor {
      out.push(Piece::Plain(content[cursor..found.start()].to_string()));
    }
    out.push(Piece::Linked(render_anchor(term, found.as_str(), style)));
    budget.record(key);
    consumed.insert(key.to_string());
    cursor = found.end();
  }

  if cursor == 0 {
    // No match spent; the span passes through untouched.
    out.push(Piece::Plain(content.to_string()));
  } else if cursor < content.len() {
    out.push(Piece::Plain(content[cursor..].to_string()));
  }
}

/// Render one matched literal as an anchor. Replacement is all-or-nothing:
/// the string returned here is complete, valid markup.
fn render_anchor(
  term: &LinkableTerm,
  literal: &str,
  style: &AnchorStyle,
) -> String {
  let url = term
    .destination
    .clone()
    .unwrap_or_else(|| search_url(&style.search_base, literal));

  let target = if style.open_new_window {
    " target=\"_blank\" rel=\"noopener noreferrer\""
  } else {
    ""
  };

  format!(
    "<a href=\"{}\"{target} class=\"auto-tag-link\">{}</a>",
    escape_attribute(&url),
    escape_text(literal)
  )
}

/// Compile the whole-word pattern for one term. The regex crate's `\b` is
/// Unicode-aware, matching the boundary semantics the match contract asks
/// for.
fn word_pattern(term: &str) -> Option<Regex> {
  Regex::new(&format!(r"(?i)\b{}\b", regex::escape(term)))
    .map_err(|e| {
      log::error!("Failed to compile word pattern for {term:?}: {e}");
      e
    })
    .ok()
}

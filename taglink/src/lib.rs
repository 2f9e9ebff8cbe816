//! # taglink - automatic term linking for rendered content
//!
//! taglink scans rendered HTML (blog post bodies) and rewrites occurrences
//! of configured words into hyperlinks, leaving existing markup and links
//! untouched. Terms come from two prioritized sources: a custom word list
//! (explicit URL or internal search) and a tag vocabulary (tag archive
//! URLs). Pre-existing anchors are shielded before matching, markup tags
//! are opaque tokens, and every term is capped by a per-call link budget.
//!
//! ## Quick Start
//!
//! ```rust
//! use taglink::{LinkProcessor, LinkerSettings, RenderContext, TagEntry};
//!
//! let settings = LinkerSettings {
//!   custom_words: "Rust|https://rust-lang.org".to_string(),
//!   ..Default::default()
//! };
//! let vocabulary = vec![TagEntry::new("PHP", "https://example.com/tag/php")];
//!
//! let processor = LinkProcessor::new(settings.resolve(), vocabulary);
//! let html = processor.transform(
//!   "<p>Rust and PHP in one post.</p>",
//!   &RenderContext::primary("post"),
//! );
//!
//! assert!(html.contains("href=\"https://rust-lang.org\""));
//! assert!(html.contains("href=\"https://example.com/tag/php\""));
//! ```
//!
//! ## Pipeline
//!
//! One call to [`LinkProcessor::transform`] runs three stages:
//!
//! 1. **Shielding** - existing `<a>...</a>` elements are swapped for
//!    opaque placeholders so they can neither be re-linked nor mangled.
//! 2. **Segmentation** - the shielded text is split into markup and text
//!    segments; tags are never rewritten.
//! 3. **Linking** - per text segment, custom words first, then tags, with
//!    per-term budgets and a consumed-word set preventing double links;
//!    segments are reassembled and the shielded anchors restored.
//!
//! The transform is pure given its inputs and total: malformed markup,
//! unusable patterns and empty configuration all degrade to returning the
//! content unchanged (or minimally changed), never to an error.
//!
//! This crate performs no I/O of its own; configuration snapshots and the
//! tag vocabulary are injected by the embedding system
//! ([`utils::load_tag_vocabulary`] is provided as a convenience for
//! JSON-backed vocabularies).

pub mod matcher;
pub mod options;
pub mod processor;
pub mod segment;
pub mod shield;
pub mod types;
pub mod utils;

pub use crate::{
  matcher::{AnchorStyle, LinkBudget, MatchOutcome, link_terms},
  options::{
    DEFAULT_LINK_CSS,
    LinkerOptions,
    LinkerOptionsBuilder,
    LinkerSettings,
  },
  processor::{LinkProcessor, RenderContext},
  segment::{SegmentError, segment},
  shield::{ShieldedContent, restore, shield},
  types::{LinkableTerm, Segment, SegmentKind, TagEntry, TermOrigin},
  utils::{VocabError, load_tag_vocabulary},
};

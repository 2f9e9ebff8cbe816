#![allow(clippy::expect_used, clippy::panic, reason = "Fine in tests")]
//! Settings-driven behavior of the linking engine, end to end.

use taglink::{
  DEFAULT_LINK_CSS,
  LinkProcessor,
  LinkerSettings,
  RenderContext,
  TagEntry,
};

fn ctx() -> RenderContext {
  RenderContext::primary("post")
}

#[test]
fn settings_snapshot_drives_the_pipeline() {
  let settings = LinkerSettings {
    custom_words: "WordPress|https://wordpress.org\nPHP\n\n   \n".to_string(),
    search_base: "https://blog.example.com".to_string(),
    ..Default::default()
  };
  let processor = LinkProcessor::new(settings.resolve(), Vec::new());

  let output =
    processor.transform("<p>WordPress and PHP and wordpress</p>", &ctx());

  // Explicit destination for the first term.
  assert!(output.contains(
    r#"<a href="https://wordpress.org" class="auto-tag-link">WordPress</a>"#
  ));
  // Internal search for the bare term, built from the configured base.
  assert!(output.contains(
    r#"<a href="https://blog.example.com/?s=PHP" class="auto-tag-link">PHP</a>"#
  ));
  // Default budget of 1: the second "wordpress" stays plain.
  assert!(output.contains("and wordpress</p>"));
}

#[test]
fn whitespace_only_custom_word_lines_produce_no_terms() {
  let settings = LinkerSettings {
    custom_words: "\n   \n\t\n".to_string(),
    ..Default::default()
  };
  let options = settings.resolve();
  assert!(options.custom_terms.is_empty());

  let processor = LinkProcessor::new(options, Vec::new());
  assert_eq!(processor.transform("anything", &ctx()), "anything");
}

#[test]
fn blacklist_from_settings_is_case_insensitive() {
  let settings = LinkerSettings {
    custom_words: "Rust".to_string(),
    blacklist: "RUST\n".to_string(),
    ..Default::default()
  };
  let processor = LinkProcessor::new(settings.resolve(), Vec::new());

  assert_eq!(processor.transform("rust is fast", &ctx()), "rust is fast");
}

#[test]
fn open_new_window_adds_target_and_rel() {
  let settings = LinkerSettings {
    custom_words: "Rust|https://rust-lang.org".to_string(),
    open_new_window: true,
    ..Default::default()
  };
  let processor = LinkProcessor::new(settings.resolve(), Vec::new());

  let output = processor.transform("Rust", &ctx());
  assert_eq!(
    output,
    "<a href=\"https://rust-lang.org\" target=\"_blank\" \
     rel=\"noopener noreferrer\" class=\"auto-tag-link\">Rust</a>"
  );
}

#[test]
fn zero_budget_clamps_to_one() {
  let settings = LinkerSettings {
    max_links_per_term: 0,
    custom_words: "Rust|/r".to_string(),
    ..Default::default()
  };
  let processor = LinkProcessor::new(settings.resolve(), Vec::new());

  let output = processor.transform("Rust and Rust", &ctx());
  assert_eq!(output.matches("<a ").count(), 1);
}

#[test]
fn larger_budget_links_up_to_the_cap() {
  let settings = LinkerSettings {
    max_links_per_term: 3,
    custom_words: "go|/go".to_string(),
    ..Default::default()
  };
  let processor = LinkProcessor::new(settings.resolve(), Vec::new());

  let output = processor.transform("go go go go go", &ctx());
  assert_eq!(output.matches("<a ").count(), 3);
}

#[test]
fn vocabulary_order_decides_overlapping_spellings() {
  let settings = LinkerSettings::default();

  // Longer entry first: the whole phrase is consumed.
  let processor = LinkProcessor::new(settings.resolve(), vec![
    TagEntry::new("Visual Studio Code", "/tag/vsc"),
    TagEntry::new("Visual Studio", "/tag/vs"),
  ]);
  let output = processor.transform("Visual Studio Code", &ctx());
  assert!(output.contains("/tag/vsc"));
  assert!(!output.contains("/tag/vs\""));

  // Shorter entry first: it wins the span and the longer one cannot
  // match across the generated anchor.
  let processor = LinkProcessor::new(settings.resolve(), vec![
    TagEntry::new("Visual Studio", "/tag/vs"),
    TagEntry::new("Visual Studio Code", "/tag/vsc"),
  ]);
  let output = processor.transform("Visual Studio Code", &ctx());
  assert!(output.contains("/tag/vs\""));
  assert!(!output.contains("/tag/vsc"));
}

#[test]
fn search_terms_are_percent_encoded() {
  let settings = LinkerSettings {
    custom_words: "año nuevo".to_string(),
    ..Default::default()
  };
  let processor = LinkProcessor::new(settings.resolve(), Vec::new());

  let output = processor.transform("feliz año nuevo!", &ctx());
  assert!(output.contains(r#"href="/?s=a%C3%B1o%20nuevo""#));
  assert!(output.contains(">año nuevo</a>"));
}

#[test]
fn default_style_block_uses_shipped_css() {
  let processor =
    LinkProcessor::new(LinkerSettings::default().resolve(), Vec::new());
  let block = processor.style_block().expect("default CSS is non-empty");
  assert!(block.contains("auto-tag-link"));
  assert!(DEFAULT_LINK_CSS.contains(".auto-tag-link"));
}

#[test]
fn document_type_gating_follows_settings() {
  let settings = LinkerSettings {
    enabled_document_types: vec!["post".to_string(), "page".to_string()],
    custom_words: "Rust|/r".to_string(),
    ..Default::default()
  };
  let processor = LinkProcessor::new(settings.resolve(), Vec::new());

  assert!(
    processor
      .transform("Rust", &RenderContext::primary("page"))
      .contains("<a ")
  );
  assert_eq!(
    processor.transform("Rust", &RenderContext::primary("attachment")),
    "Rust"
  );
}

#![allow(clippy::print_stdout, reason = "Fine in examples")]
//! Minimal demonstration of the auto-linking pipeline.
//!
//! Run with: `cargo run --example transform`

use taglink::{LinkProcessor, LinkerSettings, RenderContext, TagEntry};

fn main() {
  let settings = LinkerSettings {
    custom_words: "Rust|https://rust-lang.org\nWordPress".to_string(),
    blacklist: "the\nand".to_string(),
    search_base: "https://blog.example.com".to_string(),
    ..Default::default()
  };

  let vocabulary = vec![
    TagEntry::new("PHP", "https://blog.example.com/tag/php"),
    TagEntry::new("Nix", "https://blog.example.com/tag/nix"),
  ];

  let processor = LinkProcessor::new(settings.resolve(), vocabulary);

  let content = r#"<p>I started with PHP, moved to Rust, and still run
WordPress for the blog. See <a href="/about">the about page</a> for the
whole story.</p>"#;

  let linked =
    processor.transform(content, &RenderContext::primary("post"));

  println!("before:\n{content}\n");
  println!("after:\n{linked}");

  if let Some(css) = processor.style_block() {
    println!("\nstyle block:\n{css}");
  }
}

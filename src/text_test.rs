//! Tests for text helpers.

use crate::text::{link, truncate};

#[test]
fn truncate_keeps_short_text() {
  assert_eq!(truncate("short", 100), "short");
}

#[test]
fn truncate_cuts_on_word_boundary_with_ellipsis() {
  let t = truncate("the quick brown fox jumps", 14);
  assert_eq!(t, "the quick…");
}

#[test]
fn truncate_handles_multibyte_chars() {
  let t = truncate("ñandú ñandú ñandú", 8);
  assert!(t.ends_with('…'));
  assert!(t.chars().count() <= 9);
}

#[test]
fn link_renders_markdown() {
  assert_eq!(link("IUCN", "https://x/"), "[IUCN](https://x/)");
}

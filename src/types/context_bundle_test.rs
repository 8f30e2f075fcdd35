//! Tests for `ContextBundle`.

use super::ContextBundle;

#[test]
fn citations_deduplicate_by_url_first_seen() {
  let mut b = ContextBundle::new("text");
  assert!(b.push_citation("Wikipedia", "https://en.wikipedia.org/wiki/Macaca_fuscata", 10));
  assert!(!b.push_citation("Duplicate", "https://en.wikipedia.org/wiki/Macaca_fuscata", 10));
  assert!(b.push_citation("IUCN", "https://www.iucnredlist.org/", 10));
  assert_eq!(b.citations().len(), 2);
  assert_eq!(b.citations()[0].title, "Wikipedia");
}

#[test]
fn citations_respect_cap() {
  let mut b = ContextBundle::new("");
  assert!(b.push_citation("a", "https://a.example/", 1));
  assert!(!b.push_citation("b", "https://b.example/", 1));
  assert_eq!(b.citations().len(), 1);
}

#[test]
fn empty_urls_are_dropped() {
  let mut b = ContextBundle::new("");
  assert!(!b.push_citation("no url", "", 10));
  assert!(b.is_empty());
}

use crate::types::NameSource;

use super::resolve_name::{normalize_label_key, resolve_label, slug_to_binomial};

#[test]
fn dataset_labels_hit_the_map() {
  let subject = resolve_label("Japanese_macaque").expect("map hit");
  assert_eq!(subject.binomial(), "Macaca fuscata");
  assert_eq!(subject.source(), NameSource::Map);
}

#[test]
fn separators_are_normalized_before_the_lookup() {
  assert_eq!(normalize_label_key(" Bald uakari "), "Bald_uakari");
  assert_eq!(normalize_label_key("Bald--uakari"), "Bald_uakari");
  let subject = resolve_label("Bald uakari").expect("normalized map hit");
  assert_eq!(subject.binomial(), "Cacajao calvus");
}

#[test]
fn whitelisted_slug_normalizes() {
  let subject = slug_to_binomial("macaca_fuscata").expect("slug hit");
  assert_eq!(subject.binomial(), "Macaca fuscata");
  assert_eq!(subject.source(), NameSource::Normalized);
}

#[test]
fn unknown_genus_slug_stays_unresolved() {
  assert!(slug_to_binomial("unknown_monkey").is_none());
  assert!(resolve_label("Unknown_monkey").is_none());
}

#[test]
fn non_binomial_shapes_stay_unresolved() {
  assert!(slug_to_binomial("macaca").is_none());
  assert!(slug_to_binomial("macaca_fuscata_yakui").is_none());
  assert!(slug_to_binomial("macaca_fusc4ta").is_none());
}

#[test]
fn resolution_is_idempotent() {
  let first = resolve_label("Common_squirrel_monkey").expect("map hit");
  let second = resolve_label(first.binomial()).expect("stable on re-entry");
  assert_eq!(first.binomial(), second.binomial());
}

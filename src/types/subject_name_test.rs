//! Tests for `SubjectName` and binomial validation.

use super::{NameSource, SubjectName, is_valid_binomial};

#[test]
fn valid_binomial_accepts_genus_species() {
  assert!(is_valid_binomial("Macaca fuscata"));
  assert!(is_valid_binomial("Alouatta palliata"));
}

#[test]
fn valid_binomial_rejects_other_shapes() {
  assert!(!is_valid_binomial("macaca fuscata"));
  assert!(!is_valid_binomial("Macaca"));
  assert!(!is_valid_binomial("Macaca Fuscata"));
  assert!(!is_valid_binomial("Macaca fuscata fuscata"));
  assert!(!is_valid_binomial(""));
}

#[test]
fn parse_trims_whitespace() {
  let s = SubjectName::parse("  Macaca fuscata ", NameSource::Map).expect("valid");
  assert_eq!(s.binomial(), "Macaca fuscata");
  assert_eq!(s.genus(), "Macaca");
  assert_eq!(s.source(), NameSource::Map);
}

#[test]
fn parse_rejects_invalid() {
  assert!(SubjectName::parse("unknown monkey", NameSource::Vision).is_none());
}

#[test]
fn scan_finds_binomial_inside_free_text() {
  let s = SubjectName::scan("is this Macaca fuscata by any chance?", NameSource::User)
    .expect("candidate");
  assert_eq!(s.binomial(), "Macaca fuscata");
  assert_eq!(s.source(), NameSource::User);
}

#[test]
fn scan_returns_none_without_candidate() {
  assert!(SubjectName::scan("what monkey is this", NameSource::User).is_none());
}

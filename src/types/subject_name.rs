//! Validated scientific name (two-token binomial) with its provenance tag.

use std::fmt;

use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;

static BINOMIAL_RE: Lazy<Regex> =
  Lazy::new(|| Regex::new(r"^[A-Z][a-z]+ [a-z]+$").expect("binomial regex"));
static CANDIDATE_RE: Lazy<Regex> =
  Lazy::new(|| Regex::new(r"\b[A-Z][a-z]+ [a-z]{2,}\b").expect("candidate regex"));

/// Where a resolved subject name came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum NameSource {
  /// Typed by the user in free text.
  User,
  /// Direct hit in the label-to-binomial map.
  Map,
  /// Derived from a slug-style label with a whitelisted genus.
  Normalized,
  /// Returned by the external vision verifier.
  Vision,
}

impl fmt::Display for NameSource {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      NameSource::User => write!(f, "user"),
      NameSource::Map => write!(f, "map"),
      NameSource::Normalized => write!(f, "normalized"),
      NameSource::Vision => write!(f, "vision"),
    }
  }
}

/// A validated two-token binomial (`Genus species`) plus its provenance.
///
/// The constructors are the only way to obtain a value, so an unvalidated
/// string can never overwrite a validated subject in the conversation state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SubjectName {
  binomial: String,
  source: NameSource,
}

impl SubjectName {
  /// Accepts `raw` only if the whole trimmed string is a valid binomial.
  pub fn parse(raw: &str, source: NameSource) -> Option<Self> {
    let trimmed = raw.trim();
    is_valid_binomial(trimmed).then(|| Self {
      binomial: trimmed.to_string(),
      source,
    })
  }

  /// Finds the first binomial-looking bigram in free text.
  pub fn scan(text: &str, source: NameSource) -> Option<Self> {
    if let Some(exact) = Self::parse(text, source) {
      return Some(exact);
    }
    CANDIDATE_RE
      .find(text)
      .and_then(|m| Self::parse(m.as_str(), source))
  }

  pub fn binomial(&self) -> &str {
    &self.binomial
  }

  pub fn genus(&self) -> &str {
    self.binomial.split(' ').next().unwrap_or(&self.binomial)
  }

  pub fn source(&self) -> NameSource {
    self.source
  }
}

impl fmt::Display for SubjectName {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{}", self.binomial)
  }
}

/// True if `s` is exactly `Genus species` (capitalized genus, lowercase epithet).
pub fn is_valid_binomial(s: &str) -> bool {
  BINOMIAL_RE.is_match(s)
}

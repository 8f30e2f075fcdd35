//! Aggregated reference text plus source citations for one turn.

use serde::Serialize;

/// One cited source (title plus URL).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Citation {
  pub title: String,
  pub url: String,
}

/// Aggregated reference text plus source citations.
///
/// Citation URLs are unique, in first-seen order.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ContextBundle {
  text: String,
  citations: Vec<Citation>,
}

impl ContextBundle {
  pub fn new(text: impl Into<String>) -> Self {
    Self {
      text: text.into(),
      citations: Vec::new(),
    }
  }

  /// Appends a citation unless its URL was already seen or `cap` is reached.
  /// Returns true if the citation was kept.
  pub fn push_citation(&mut self, title: impl Into<String>, url: impl Into<String>, cap: usize) -> bool {
    let url = url.into();
    if url.is_empty() || self.citations.len() >= cap {
      return false;
    }
    if self.citations.iter().any(|c| c.url == url) {
      return false;
    }
    self.citations.push(Citation {
      title: title.into(),
      url,
    });
    true
  }

  pub fn text(&self) -> &str {
    &self.text
  }

  pub fn citations(&self) -> &[Citation] {
    &self.citations
  }

  pub fn is_empty(&self) -> bool {
    self.text.is_empty() && self.citations.is_empty()
  }
}

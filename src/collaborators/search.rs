//! Web-search collaborator: short snippets to supplement the reference page.

use async_trait::async_trait;
use serde::Serialize;

use crate::types::CallStatus;

/// One search hit.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SearchResult {
  pub title: String,
  pub url: String,
  pub snippet: String,
}

/// Summary of one search call.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SearchSummary {
  pub status: CallStatus,
  pub top_snippet: String,
  pub results: Vec<SearchResult>,
}

impl SearchSummary {
  pub fn empty() -> Self {
    Self {
      status: CallStatus::Empty,
      top_snippet: String::new(),
      results: Vec::new(),
    }
  }
}

/// Searches the web for a binomial name.
#[async_trait]
pub trait WebSearch: Send + Sync {
  async fn search(&self, binomial: &str, max_results: usize) -> SearchSummary;
}

/// Deterministic search stub pointing at the usual natural-history sources.
/// Stands in for a real search backend; output shape matches the contract.
pub struct StubSearch;

#[async_trait]
impl WebSearch for StubSearch {
  async fn search(&self, binomial: &str, max_results: usize) -> SearchSummary {
    if binomial.trim().is_empty() {
      return SearchSummary::empty();
    }
    let results = vec![
      SearchResult {
        title: format!("{binomial} – IUCN Red List"),
        url: "https://www.iucnredlist.org/".to_string(),
        snippet: "Conservation status and threats...".to_string(),
      },
      SearchResult {
        title: format!("{binomial} – Animal Diversity Web"),
        url: "https://animaldiversity.org/".to_string(),
        snippet: "Natural history, behavior...".to_string(),
      },
    ];
    SearchSummary {
      status: CallStatus::Ok,
      top_snippet: "Conservation status reported by IUCN; natural history from ADW.".to_string(),
      results: results.into_iter().take(max_results).collect(),
    }
  }
}

//! Reference-page fetcher: full-page plain text for a binomial name.

use std::time::Duration;

use async_trait::async_trait;
use serde::Serialize;
use tracing::warn;

use crate::types::CallStatus;

/// One fetched reference page.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReferencePage {
  pub status: CallStatus,
  pub title: String,
  pub url: String,
  pub plain_text: String,
  /// Key/value infobox rows; may be empty depending on the backend.
  pub infobox: Vec<(String, String)>,
  pub error: Option<String>,
}

impl ReferencePage {
  pub fn not_found() -> Self {
    Self {
      status: CallStatus::NotFound,
      title: String::new(),
      url: String::new(),
      plain_text: String::new(),
      infobox: Vec::new(),
      error: None,
    }
  }

  pub fn error(detail: impl Into<String>) -> Self {
    Self {
      status: CallStatus::Error,
      title: String::new(),
      url: String::new(),
      plain_text: String::new(),
      infobox: Vec::new(),
      error: Some(detail.into()),
    }
  }
}

/// Fetches the reference page for a binomial name.
#[async_trait]
pub trait ReferencePageFetcher: Send + Sync {
  async fn fetch(&self, binomial: &str) -> ReferencePage;
}

/// Fetcher backed by the MediaWiki extracts API (plain-text page extract,
/// redirects followed). This backend leaves the infobox empty.
pub struct WikipediaFetcher {
  client: reqwest::Client,
  api_base: String,
  page_base: String,
  user_agent: String,
  timeout: Duration,
}

impl WikipediaFetcher {
  pub fn new() -> Self {
    Self {
      client: reqwest::Client::new(),
      api_base: "https://en.wikipedia.org/w/api.php".to_string(),
      page_base: "https://en.wikipedia.org/wiki".to_string(),
      user_agent: "taxograph/0.3 (reference fetcher)".to_string(),
      timeout: Duration::from_secs(12),
    }
  }

  /// Points the fetcher at a different API endpoint (used by tests).
  pub fn with_api_base(mut self, api_base: impl Into<String>) -> Self {
    self.api_base = api_base.into();
    self
  }

  pub fn with_timeout(mut self, timeout: Duration) -> Self {
    self.timeout = timeout;
    self
  }
}

impl Default for WikipediaFetcher {
  fn default() -> Self {
    Self::new()
  }
}

#[async_trait]
impl ReferencePageFetcher for WikipediaFetcher {
  async fn fetch(&self, binomial: &str) -> ReferencePage {
    if binomial.trim().is_empty() {
      return ReferencePage::not_found();
    }

    let response = self
      .client
      .get(&self.api_base)
      .header(reqwest::header::USER_AGENT, &self.user_agent)
      .timeout(self.timeout)
      .query(&[
        ("action", "query"),
        ("prop", "extracts"),
        ("explaintext", "1"),
        ("redirects", "1"),
        ("format", "json"),
        ("titles", binomial),
      ])
      .send()
      .await;

    let response = match response {
      Ok(r) => r,
      Err(e) => {
        warn!(error = %e, title = binomial, "reference fetch failed");
        return if e.is_timeout() {
          ReferencePage {
            status: CallStatus::Timeout,
            error: Some(e.to_string()),
            ..ReferencePage::not_found()
          }
        } else {
          ReferencePage::error(e.to_string())
        };
      }
    };
    if !response.status().is_success() {
      return ReferencePage::error(format!("http {}", response.status()));
    }

    let body: serde_json::Value = match response.json().await {
      Ok(v) => v,
      Err(e) => return ReferencePage::error(e.to_string()),
    };
    let pages = match body["query"]["pages"].as_object() {
      Some(p) if !p.is_empty() => p,
      _ => return ReferencePage::not_found(),
    };
    let page = pages.values().next().expect("non-empty pages object");
    if page.get("missing").is_some() {
      return ReferencePage::not_found();
    }

    let title = page["title"].as_str().unwrap_or(binomial).to_string();
    let plain_text = page["extract"].as_str().unwrap_or("").to_string();
    if plain_text.is_empty() {
      return ReferencePage {
        status: CallStatus::Empty,
        title,
        ..ReferencePage::not_found()
      };
    }
    let url = format!("{}/{}", self.page_base, title.replace(' ', "_"));
    ReferencePage {
      status: CallStatus::Ok,
      title,
      url,
      plain_text,
      infobox: Vec::new(),
      error: None,
    }
  }
}

//! Fan-in join: folds both retrieval branches into one context bundle.

use async_trait::async_trait;
use tracing::info;

use crate::config::EngineConfig;
use crate::graph::TurnNode;
use crate::text::truncate;
use crate::types::{
  CallStatus, ContextBundle, ContextScratch, ConversationState, Namespace, NodeDelta,
};

/// Builds the single context block handed to the answerer. Sections carry
/// tagged separators for the model, never shown to the user. Either branch
/// may have failed; whatever arrived is still merged.
pub struct MergeContextNode {
  max_sources: usize,
  max_infobox_rows: usize,
  context_max_chars: usize,
}

impl MergeContextNode {
  pub fn new(config: &EngineConfig) -> Self {
    Self {
      max_sources: config.max_sources,
      max_infobox_rows: config.max_infobox_rows,
      context_max_chars: config.context_max_chars,
    }
  }
}

#[async_trait]
impl TurnNode for MergeContextNode {
  fn owns(&self) -> &'static [Namespace] {
    &[Namespace::Context]
  }

  async fn run(&self, state: &ConversationState) -> NodeDelta {
    let page = state
      .scratch
      .reference
      .as_ref()
      .filter(|r| r.status.is_ok())
      .and_then(|r| r.page.as_ref());
    let summary = state
      .scratch
      .search
      .as_ref()
      .filter(|s| s.status.is_ok())
      .and_then(|s| s.summary.as_ref());

    let mut parts: Vec<String> = Vec::new();
    if let Some(page) = page {
      let meta: Vec<&str> = [page.title.as_str(), page.url.as_str()]
        .into_iter()
        .filter(|s| !s.is_empty())
        .collect();
      if !meta.is_empty() {
        parts.push(meta.join(" | "));
      }
      if !page.infobox.is_empty() {
        let rows: Vec<String> = page
          .infobox
          .iter()
          .take(self.max_infobox_rows)
          .map(|(k, v)| format!("- {k}: {v}"))
          .collect();
        parts.push(format!("<INFOBOX>\n{}\n</INFOBOX>", rows.join("\n")));
      }
      if !page.plain_text.is_empty() {
        parts.push(format!("<REFERENCE>\n{}\n</REFERENCE>", page.plain_text));
      }
    }
    if let Some(summary) = summary {
      let mut lines: Vec<String> = Vec::new();
      if !summary.top_snippet.is_empty() {
        lines.push(summary.top_snippet.clone());
      }
      for result in &summary.results {
        let chunk: Vec<&str> = [
          result.title.as_str(),
          result.snippet.as_str(),
          result.url.as_str(),
        ]
        .into_iter()
        .filter(|s| !s.is_empty())
        .collect();
        if !chunk.is_empty() {
          lines.push(chunk.join(" | "));
        }
      }
      if !lines.is_empty() {
        parts.push(format!("<WEB_SNIPPETS>\n{}\n</WEB_SNIPPETS>", lines.join("\n")));
      }
    }

    let text = truncate(&parts.join("\n\n"), self.context_max_chars);
    let mut bundle = ContextBundle::new(text);
    // Reference page first, then search hits; URLs dedupe in first-seen order.
    if let Some(page) = page {
      bundle.push_citation(page.title.clone(), page.url.clone(), self.max_sources);
    }
    if let Some(summary) = summary {
      for result in &summary.results {
        bundle.push_citation(result.title.clone(), result.url.clone(), self.max_sources);
      }
    }

    let status = if bundle.is_empty() {
      CallStatus::Empty
    } else {
      CallStatus::Ok
    };
    info!(%status, citations = bundle.citations().len(), "context merged");

    let mut delta = NodeDelta::default();
    delta.context = Some(bundle);
    delta.scratch.context = Some(ContextScratch { status });
    delta
  }
}

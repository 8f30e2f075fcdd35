//! Web-search branch of the retrieval fan-out.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::info;

use crate::collaborators::WebSearch;
use crate::graph::TurnNode;
use crate::types::{CallStatus, ConversationState, Namespace, NodeDelta, SearchScratch};

pub struct WebSearchNode {
  search: Arc<dyn WebSearch>,
  max_results: usize,
}

impl WebSearchNode {
  pub fn new(search: Arc<dyn WebSearch>, max_results: usize) -> Self {
    Self {
      search,
      max_results,
    }
  }
}

#[async_trait]
impl TurnNode for WebSearchNode {
  fn owns(&self) -> &'static [Namespace] {
    &[Namespace::Search]
  }

  async fn run(&self, state: &ConversationState) -> NodeDelta {
    let mut delta = NodeDelta::default();
    let Some(subject) = state.subject.as_ref() else {
      delta.scratch.search = Some(SearchScratch {
        status: CallStatus::Invalid,
        summary: None,
      });
      return delta;
    };

    let summary = self.search.search(subject.binomial(), self.max_results).await;
    info!(binomial = %subject, status = %summary.status, hits = summary.results.len(), "web search done");
    delta.scratch.search = Some(SearchScratch {
      status: summary.status,
      summary: Some(summary),
    });
    delta
  }
}

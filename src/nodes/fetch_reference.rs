//! Reference-page branch of the retrieval fan-out.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::info;

use crate::collaborators::ReferencePageFetcher;
use crate::graph::TurnNode;
use crate::types::{CallStatus, ConversationState, Namespace, NodeDelta, ReferenceScratch};

pub struct FetchReferenceNode {
  fetcher: Arc<dyn ReferencePageFetcher>,
}

impl FetchReferenceNode {
  pub fn new(fetcher: Arc<dyn ReferencePageFetcher>) -> Self {
    Self { fetcher }
  }
}

#[async_trait]
impl TurnNode for FetchReferenceNode {
  fn owns(&self) -> &'static [Namespace] {
    &[Namespace::Reference]
  }

  async fn run(&self, state: &ConversationState) -> NodeDelta {
    let mut delta = NodeDelta::default();
    let Some(subject) = state.subject.as_ref() else {
      delta.scratch.reference = Some(ReferenceScratch {
        status: CallStatus::Invalid,
        page: None,
        error: Some("no resolved subject".to_string()),
      });
      return delta;
    };

    let page = self.fetcher.fetch(subject.binomial()).await;
    info!(binomial = %subject, status = %page.status, "reference page fetched");
    delta.scratch.reference = Some(ReferenceScratch {
      status: page.status,
      error: page.error.clone(),
      page: Some(page),
    });
    delta
  }
}

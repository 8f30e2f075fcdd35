//! Records a binomial the user typed, ahead of asking for a photo.

use async_trait::async_trait;
use tracing::info;

use crate::graph::TurnNode;
use crate::types::{ConversationState, NameSource, Namespace, NodeDelta, SubjectName};

pub struct CaptureSubjectNode;

#[async_trait]
impl TurnNode for CaptureSubjectNode {
  fn owns(&self) -> &'static [Namespace] {
    &[]
  }

  async fn run(&self, state: &ConversationState) -> NodeDelta {
    let mut delta = NodeDelta::default();
    let candidate = state
      .latest_user_text()
      .and_then(|text| SubjectName::scan(text, NameSource::User));
    if let Some(subject) = candidate {
      info!(binomial = %subject, "captured subject from user text");
      delta.subject = Some(subject);
    }
    delta
  }
}

//! Terminal node for follow-up questions about an already-identified subject.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{info, warn};

use crate::collaborators::TextAnswerer;
use crate::config::EngineConfig;
use crate::graph::TurnNode;
use crate::prompts;
use crate::text::truncate;
use crate::types::{ConversationState, Namespace, NodeDelta};

const NO_INFORMATION: &str = "Not enough information was found.";

pub struct AnswerQuestionNode {
  answerer: Arc<dyn TextAnswerer>,
  answer_context_max_chars: usize,
}

impl AnswerQuestionNode {
  pub fn new(answerer: Arc<dyn TextAnswerer>, config: &EngineConfig) -> Self {
    Self {
      answerer,
      answer_context_max_chars: config.answer_context_max_chars,
    }
  }
}

#[async_trait]
impl TurnNode for AnswerQuestionNode {
  fn owns(&self) -> &'static [Namespace] {
    &[]
  }

  async fn run(&self, state: &ConversationState) -> NodeDelta {
    let Some(subject) = state.subject.as_ref() else {
      // Routing only sends turns here with a subject; degrade politely anyway.
      return NodeDelta::assistant_message(NO_INFORMATION);
    };
    let context = state
      .context
      .as_ref()
      .map(|b| truncate(b.text(), self.answer_context_max_chars))
      .unwrap_or_default();
    if context.is_empty() {
      info!(binomial = %subject, "no stored context for follow-up question");
      return NodeDelta::assistant_message(NO_INFORMATION);
    }

    let question = state.latest_user_text().unwrap_or_default();
    let report = self
      .answerer
      .answer(&prompts::qa_prompt(subject.binomial(), question, &context))
      .await;
    if report.status.is_ok() && !report.text.is_empty() {
      NodeDelta::assistant_message(report.text)
    } else {
      warn!(status = %report.status, "follow-up answering failed");
      NodeDelta::assistant_message(NO_INFORMATION)
    }
  }
}

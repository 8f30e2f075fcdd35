//! Terminal node for the identification path: composes the final answer.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{info, warn};

use crate::collaborators::TextAnswerer;
use crate::config::EngineConfig;
use crate::graph::TurnNode;
use crate::prompts;
use crate::text::{bold, italic, link, truncate};
use crate::types::{ConversationState, Namespace, NodeDelta};

pub struct SynthesizeAnswerNode {
  answerer: Arc<dyn TextAnswerer>,
  answer_context_max_chars: usize,
}

impl SynthesizeAnswerNode {
  pub fn new(answerer: Arc<dyn TextAnswerer>, config: &EngineConfig) -> Self {
    Self {
      answerer,
      answer_context_max_chars: config.answer_context_max_chars,
    }
  }

  fn citation_block(state: &ConversationState) -> String {
    let Some(bundle) = state.context.as_ref() else {
      return String::new();
    };
    bundle
      .citations()
      .iter()
      .map(|c| format!("- {}", link(&c.title, &c.url)))
      .collect::<Vec<_>>()
      .join("\n")
  }

  /// Confidence footnote from the classifier metrics, when this turn ran the
  /// local model at all.
  fn confidence_footnote(state: &ConversationState) -> String {
    match state.scratch.classifier.as_ref().filter(|c| c.status.is_ok()) {
      Some(c) => format!(
        "\n\n(Local confidence: {:.2} · Entropy: {:.2})",
        c.p1, c.entropy
      ),
      None => String::new(),
    }
  }

  /// Composed locally when the answerer fails; the turn still ends with a
  /// usable identification.
  fn fallback(state: &ConversationState, binomial: &str) -> String {
    let summary = state
      .context
      .as_ref()
      .map(|b| b.text().to_string())
      .unwrap_or_default();
    format!(
      "{} {}\n\n{}",
      bold("Identified species:"),
      italic(binomial),
      summary
    )
    .trim_end()
    .to_string()
  }
}

#[async_trait]
impl TurnNode for SynthesizeAnswerNode {
  fn owns(&self) -> &'static [Namespace] {
    &[]
  }

  async fn run(&self, state: &ConversationState) -> NodeDelta {
    let binomial = state
      .subject
      .as_ref()
      .map(|s| s.binomial().to_string())
      .unwrap_or_else(|| "—".to_string());
    let context_text = state
      .context
      .as_ref()
      .map(|b| truncate(b.text(), self.answer_context_max_chars))
      .unwrap_or_default();
    let citations = Self::citation_block(state);
    let grounding = if citations.is_empty() {
      context_text
    } else {
      format!("{context_text}\n\n{citations}")
    };

    let report = self.answerer.answer(&prompts::synthesize_prompt(&binomial, &grounding)).await;
    let mut answer = if report.status.is_ok() && !report.text.is_empty() {
      report.text
    } else {
      warn!(status = %report.status, "answer synthesis degraded to local fallback");
      Self::fallback(state, &binomial)
    };
    answer.push_str(&Self::confidence_footnote(state));
    info!(binomial = %binomial, "final answer composed");
    NodeDelta::assistant_message(answer)
  }
}

//! Terminal node asking the user for a photo.

use async_trait::async_trait;

use crate::graph::TurnNode;
use crate::text::bold;
use crate::types::{ConversationState, Namespace, NodeDelta};

pub struct PromptForImageNode;

#[async_trait]
impl TurnNode for PromptForImageNode {
  fn owns(&self) -> &'static [Namespace] {
    &[]
  }

  async fn run(&self, state: &ConversationState) -> NodeDelta {
    let text = match state.subject.as_ref() {
      Some(subject) => format!(
        "I have noted {} as the species of interest. Please upload a photo (JPG or PNG) so I can confirm the identification.",
        bold(subject.binomial())
      ),
      None => "To identify the species I need a photo. Please upload an image in JPG or PNG format.".to_string(),
    };
    NodeDelta::assistant_message(text)
  }
}

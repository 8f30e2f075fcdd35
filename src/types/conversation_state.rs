//! The shared conversation record for one turn, and its merge semantics.

use bytes::Bytes;
use tracing::instrument;

use super::{ChatMessage, ContextBundle, ImageInput, NodeDelta, Role, Scratch, SubjectName};

/// The long-lived record for one conversational turn.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ConversationState {
  /// Ordered, append-only transcript.
  pub messages: Vec<ChatMessage>,
  /// Resolved scientific name, if any. Only [SubjectName] values exist, so
  /// whatever lands here has passed binomial validation.
  pub subject: Option<SubjectName>,
  /// Aggregated reference text plus citations.
  pub context: Option<ContextBundle>,
  /// Photo input for this turn.
  pub image: Option<ImageInput>,
  /// Ephemeral per-turn working memory; ignored once the turn finalizes.
  pub scratch: Scratch,
}

impl ConversationState {
  pub fn new() -> Self {
    Self::default()
  }

  pub fn with_user_message(mut self, text: impl Into<String>) -> Self {
    self.messages.push(ChatMessage::user(text));
    self
  }

  pub fn with_image(mut self, image: ImageInput) -> Self {
    self.image = Some(image);
    self
  }

  /// Applies a node delta: top-level optionals overwrite (last writer wins),
  /// `messages` append, scratch merges namespace-by-namespace.
  #[instrument(level = "trace", skip(self, delta))]
  pub fn merge(&mut self, delta: NodeDelta) {
    self.messages.extend(delta.messages);
    if delta.subject.is_some() {
      self.subject = delta.subject;
    }
    if delta.context.is_some() {
      self.context = delta.context;
    }
    if delta.image.is_some() {
      self.image = delta.image;
    }
    self.scratch.apply(delta.scratch);
  }

  /// Text of the most recent user message, if any.
  pub fn latest_user_text(&self) -> Option<&str> {
    self
      .messages
      .iter()
      .rev()
      .find(|m| m.role == Role::User)
      .map(|m| m.text.as_str())
  }

  /// Normalized image bytes, if present.
  pub fn image_bytes(&self) -> Option<&Bytes> {
    self
      .image
      .as_ref()
      .and_then(|i| i.bytes.as_ref())
      .filter(|b| !b.is_empty())
  }

  /// True if the turn carries any image representation at all.
  pub fn has_image(&self) -> bool {
    self.image.as_ref().is_some_and(|i| i.has_data())
  }
}

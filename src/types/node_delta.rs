//! Partial state update produced by a single node invocation.

use super::{ChatMessage, ContextBundle, ImageInput, Scratch, SubjectName};

/// Partial state update produced by one node invocation.
///
/// Structurally partial: a node with nothing to say about a field leaves it
/// `None` (or empty, for `messages`), which the merge reads as "unchanged".
/// Created fresh per invocation and consumed by the merge step.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NodeDelta {
  /// Appended to the transcript; never replaces prior entries.
  pub messages: Vec<ChatMessage>,
  pub subject: Option<SubjectName>,
  pub context: Option<ContextBundle>,
  pub image: Option<ImageInput>,
  pub scratch: Scratch,
}

impl NodeDelta {
  /// Delta that only appends one assistant message.
  pub fn assistant_message(text: impl Into<String>) -> Self {
    Self {
      messages: vec![ChatMessage::assistant(text)],
      ..Self::default()
    }
  }
}

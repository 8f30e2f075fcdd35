//! One entry in the append-only conversation transcript.

use serde::Serialize;

/// Author of a transcript entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
  User,
  Assistant,
}

/// One entry in the append-only conversation transcript.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChatMessage {
  pub role: Role,
  pub text: String,
}

impl ChatMessage {
  pub fn user(text: impl Into<String>) -> Self {
    Self {
      role: Role::User,
      text: text.into(),
    }
  }

  pub fn assistant(text: impl Into<String>) -> Self {
    Self {
      role: Role::Assistant,
      text: text.into(),
    }
  }
}

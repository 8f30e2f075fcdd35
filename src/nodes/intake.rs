//! Entry node: picks the route for the turn from the state alone.

use async_trait::async_trait;

use crate::graph::TurnNode;
use crate::types::{ConversationState, NameSource, Namespace, NodeDelta, RouteDecision, SubjectName};

/// Routes the turn. An image wins over everything else; without one, a known
/// subject means the user is asking a follow-up question, and a binomial in
/// the latest user text is captured before asking for a photo.
pub struct IntakeNode;

impl IntakeNode {
  fn decide(state: &ConversationState) -> RouteDecision {
    if state.has_image() {
      return RouteDecision::Classify;
    }
    if state.subject.is_some() {
      return RouteDecision::Question;
    }
    let candidate = state
      .latest_user_text()
      .and_then(|text| SubjectName::scan(text, NameSource::User));
    if candidate.is_some() {
      return RouteDecision::CaptureName;
    }
    RouteDecision::AskImage
  }
}

#[async_trait]
impl TurnNode for IntakeNode {
  fn owns(&self) -> &'static [Namespace] {
    &[Namespace::Route]
  }

  async fn run(&self, state: &ConversationState) -> NodeDelta {
    let route = Self::decide(state);
    let mut delta = NodeDelta::default();
    delta.scratch.route = Some(route);
    delta
  }
}

use bytes::Bytes;

use crate::graph::TurnNode;
use crate::types::{
  ConversationState, ImageInput, NameSource, RouteDecision, SubjectName,
};

use super::intake::IntakeNode;

#[tokio::test]
async fn image_routes_to_classification() {
  let state = ConversationState::new()
    .with_user_message("what is this?")
    .with_image(ImageInput::from_bytes(Bytes::from_static(b"\xff\xd8\xff")));
  let delta = IntakeNode.run(&state).await;
  assert_eq!(delta.scratch.route, Some(RouteDecision::Classify));
}

#[tokio::test]
async fn known_subject_without_image_routes_to_question() {
  let mut state = ConversationState::new().with_user_message("where does it live?");
  state.subject = SubjectName::parse("Macaca fuscata", NameSource::Map);
  let delta = IntakeNode.run(&state).await;
  assert_eq!(delta.scratch.route, Some(RouteDecision::Question));
}

#[tokio::test]
async fn binomial_in_text_routes_to_capture() {
  let state = ConversationState::new().with_user_message("I think I saw a Macaca fuscata today");
  let delta = IntakeNode.run(&state).await;
  assert_eq!(delta.scratch.route, Some(RouteDecision::CaptureName));
}

#[tokio::test]
async fn empty_turn_asks_for_an_image() {
  let state = ConversationState::new().with_user_message("hello!");
  let delta = IntakeNode.run(&state).await;
  assert_eq!(delta.scratch.route, Some(RouteDecision::AskImage));
}

#[tokio::test]
async fn image_wins_over_known_subject() {
  let mut state = ConversationState::new()
    .with_image(ImageInput::from_url("https://photos.example/a.jpg"));
  state.subject = SubjectName::parse("Macaca fuscata", NameSource::Map);
  let delta = IntakeNode.run(&state).await;
  assert_eq!(delta.scratch.route, Some(RouteDecision::Classify));
}

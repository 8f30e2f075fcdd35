use crate::graph::TurnNode;
use crate::types::{
  CallStatus, ConversationState, GateDecision, GateScratch, ImageScratch, NameSource,
  ResolutionScratch, SubjectName, VisionScratch,
};

use super::clarify::ClarifyNode;

#[tokio::test]
async fn image_rejection_maps_to_a_friendly_reason() {
  let mut state = ConversationState::new();
  state.scratch.image = Some(ImageScratch::rejected("unsupported_format"));
  let delta = ClarifyNode.run(&state).await;

  let clarify = delta.scratch.clarify.expect("clarify scratch");
  assert!(clarify.awaiting_image);
  assert!(clarify.reasons[0].contains("format is not supported"));
  assert!(delta.messages[0].text.contains("### What happened"));
}

#[tokio::test]
async fn degraded_pipeline_collects_every_reason_in_order() {
  let mut state = ConversationState::new();
  state.scratch.gate = Some(GateScratch {
    decision: GateDecision::Review,
  });
  state.scratch.vision = Some(VisionScratch {
    status: CallStatus::Empty,
    error: None,
  });
  state.scratch.resolution = Some(ResolutionScratch { resolved: false });
  let delta = ClarifyNode.run(&state).await;

  let reasons = delta.scratch.clarify.expect("clarify scratch").reasons;
  assert_eq!(reasons.len(), 3);
  assert!(reasons[0].contains("not confident enough"));
  assert!(reasons[1].contains("vision verifier"));
  assert!(reasons[2].contains("scientific name"));
}

#[tokio::test]
async fn no_specific_cause_falls_back_to_a_generic_reason() {
  let delta = ClarifyNode.run(&ConversationState::new()).await;
  let reasons = delta.scratch.clarify.expect("clarify scratch").reasons;
  assert_eq!(reasons.len(), 1);
  assert!(reasons[0].contains("enough quality"));
}

#[tokio::test]
async fn known_subject_shapes_the_header_and_tips() {
  let mut state = ConversationState::new();
  state.subject = SubjectName::parse("Macaca fuscata", NameSource::User);
  let delta = ClarifyNode.run(&state).await;
  let text = &delta.messages[0].text;
  assert!(text.contains("I have recorded **Macaca fuscata**"));
  assert!(text.contains("distinguishing features of **Macaca fuscata**"));
}

//! Terminal node explaining why identification failed and what to do next.

use async_trait::async_trait;
use chrono::Utc;

use crate::graph::TurnNode;
use crate::types::{
  CallStatus, ClarifyScratch, ConversationState, GateDecision, Namespace, NodeDelta,
};

fn image_error_text(code: &str) -> &'static str {
  match code {
    "unsupported_format" => "The image format is not supported. I accept JPG, PNG, or WEBP.",
    "download_failed" => "I could not download the image from the provided URL.",
    "download_empty" => "The image URL returned no data.",
    "empty_bytes" => "I did not receive any valid image data.",
    _ => "The image is not valid or I could not process it.",
  }
}

/// Reasons in pipeline order: image validation first, then the local
/// classifier, then vision, then label resolution.
fn collect_reasons(state: &ConversationState) -> Vec<String> {
  let scratch = &state.scratch;
  let mut reasons: Vec<String> = Vec::new();

  if let Some(image) = scratch.image.as_ref().filter(|i| !i.ok) {
    let code = image.error.as_deref().unwrap_or("");
    reasons.push(image_error_text(code).to_string());
  }
  if scratch
    .gate
    .as_ref()
    .is_some_and(|g| g.decision == GateDecision::Review)
  {
    reasons.push("The local prediction was not confident enough (high uncertainty).".to_string());
  }
  if scratch
    .vision
    .as_ref()
    .is_some_and(|v| !matches!(v.status, CallStatus::Ok))
  {
    reasons.push("The external vision verifier could not confirm the species.".to_string());
  }
  if scratch.resolution.as_ref().is_some_and(|r| !r.resolved) {
    reasons.push("I could not safely map the predicted label to a scientific name.".to_string());
  }
  if reasons.is_empty() {
    reasons.push("I could not identify the species with enough quality.".to_string());
  }
  reasons
}

fn photo_tips(state: &ConversationState) -> Vec<String> {
  let mut tips = vec![
    "Face visible and unobstructed.".to_string(),
    "Good natural lighting; avoid backlight.".to_string(),
    "A relatively simple background with little visual noise.".to_string(),
    "The subject should fill a significant portion of the frame.".to_string(),
    "Avoid blur: rest the camera on something stable.".to_string(),
  ];
  if let Some(subject) = state.subject.as_ref() {
    tips.insert(
      0,
      format!(
        "If you can, capture distinguishing features of **{}** (face, fur, ears).",
        subject.binomial()
      ),
    );
  }
  tips
}

pub struct ClarifyNode;

#[async_trait]
impl TurnNode for ClarifyNode {
  fn owns(&self) -> &'static [Namespace] {
    &[Namespace::Clarify]
  }

  async fn run(&self, state: &ConversationState) -> NodeDelta {
    let reasons = collect_reasons(state);
    let header = match state.subject.as_ref() {
      Some(subject) => format!(
        "I have recorded **{}**, but I need a valid image to confirm.",
        subject.binomial()
      ),
      None => "To continue I need **a valid photo of the animal**.".to_string(),
    };

    let mut lines = vec![header, String::new(), "### What happened".to_string()];
    lines.extend(reasons.iter().map(|r| format!("- {r}")));
    lines.extend([
      String::new(),
      "### What I need now".to_string(),
      "- Upload an **image in JPG, PNG, or WEBP** format.".to_string(),
      "- If you use a URL, make sure it is public and points directly at the file.".to_string(),
      String::new(),
      "### Tips for a better photo".to_string(),
    ]);
    lines.extend(photo_tips(state).iter().map(|t| format!("- {t}")));

    let mut delta = NodeDelta::assistant_message(lines.join("\n"));
    delta.scratch.clarify = Some(ClarifyScratch {
      awaiting_image: true,
      reasons,
      at: Utc::now(),
    });
    delta
  }
}

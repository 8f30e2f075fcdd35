use std::sync::Arc;

use async_trait::async_trait;
use bytes::Bytes;

use crate::collaborators::{
  AnswerReport, Classifier, InferenceReport, RankedLabel, ReferencePage, ReferencePageFetcher,
  SearchSummary, StubSearch, TextAnswerer, VisionReport, VisionVerifier, WebSearch,
};
use crate::config::EngineConfig;
use crate::pipeline::{Collaborators, identification_engine, identification_graph};
use crate::types::{CallStatus, ConversationState, ImageInput, Role};

const JPEG: &[u8] = &[0xFF, 0xD8, 0xFF, 0xE0, 0x00, 0x10];

struct FixedClassifier {
  label: &'static str,
  p1: f64,
}

#[async_trait]
impl Classifier for FixedClassifier {
  async fn infer(&self, _image: &Bytes, _top_k: usize) -> InferenceReport {
    InferenceReport::from_ranked(vec![
      RankedLabel {
        label: self.label.to_string(),
        prob: self.p1,
      },
      RankedLabel {
        label: "Patas_monkey".to_string(),
        prob: 1.0 - self.p1,
      },
    ])
  }
}

struct NoVision;

#[async_trait]
impl VisionVerifier for NoVision {
  async fn resolve(&self, _image: &Bytes) -> VisionReport {
    VisionReport::invalid()
  }
}

struct FixedReference;

#[async_trait]
impl ReferencePageFetcher for FixedReference {
  async fn fetch(&self, binomial: &str) -> ReferencePage {
    ReferencePage {
      status: CallStatus::Ok,
      title: binomial.to_string(),
      url: format!("https://en.wikipedia.org/wiki/{}", binomial.replace(' ', "_")),
      plain_text: format!("{binomial} is a primate."),
      infobox: Vec::new(),
      error: None,
    }
  }
}

struct EchoAnswerer;

#[async_trait]
impl TextAnswerer for EchoAnswerer {
  async fn answer(&self, prompt: &str) -> AnswerReport {
    AnswerReport::ok(format!("answered: {}", prompt.chars().take(40).collect::<String>()))
  }
}

fn collaborators() -> Collaborators {
  Collaborators {
    classifier: Arc::new(FixedClassifier {
      label: "Japanese_macaque",
      p1: 0.9,
    }),
    vision: Arc::new(NoVision),
    reference: Arc::new(FixedReference),
    search: Arc::new(StubSearch),
    answerer: Arc::new(EchoAnswerer),
  }
}

#[test]
fn the_identification_graph_builds() {
  let graph = identification_graph(collaborators(), &EngineConfig::default());
  assert!(graph.is_ok());
  assert_eq!(graph.unwrap().node_count(), 15);
}

#[tokio::test]
async fn image_turn_never_reaches_the_no_image_path() {
  let engine = identification_engine(collaborators(), &EngineConfig::default()).expect("engine");
  let state = ConversationState::new()
    .with_user_message("what is this monkey?")
    .with_image(ImageInput::from_bytes(Bytes::from_static(JPEG)));
  let state = engine.run_turn(state).await;

  // The turn ended with an identification, not an image request.
  let answer = state
    .messages
    .iter()
    .rev()
    .find(|m| m.role == Role::Assistant)
    .expect("assistant reply");
  assert!(answer.text.starts_with("answered:"));
  assert!(state.scratch.clarify.is_none());
  assert_eq!(
    state.subject.as_ref().map(|s| s.binomial()),
    Some("Macaca fuscata")
  );
}

#[tokio::test]
async fn unusable_turn_ends_with_an_image_prompt() {
  let engine = identification_engine(collaborators(), &EngineConfig::default()).expect("engine");
  let state = engine
    .run_turn(ConversationState::new().with_user_message("hi there"))
    .await;
  let answer = state.messages.last().expect("assistant reply");
  assert!(answer.text.contains("upload an image"));
}

#[tokio::test]
async fn stub_search_respects_the_result_cap() {
  let summary: SearchSummary = StubSearch.search("Macaca fuscata", 1).await;
  assert_eq!(summary.results.len(), 1);
}

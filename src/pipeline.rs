//! Wiring for the species-identification turn graph.

use std::sync::Arc;

use crate::collaborators::{Classifier, ReferencePageFetcher, TextAnswerer, VisionVerifier, WebSearch};
use crate::config::EngineConfig;
use crate::graph::{
  GraphBuildError, GraphDefinition, Guard, IdentityNode, TurnEngine, TurnNode,
};
use crate::nodes::{
  AnswerQuestionNode, CaptureSubjectNode, ClarifyNode, ClassifyLocalNode, FetchReferenceNode,
  GateUncertaintyNode, IntakeNode, MergeContextNode, NormalizeImageNode, PromptForImageNode,
  ResolveNameNode, SynthesizeAnswerNode, VerifyVisionNode, WebSearchNode,
};
use crate::types::{CallStatus, GateDecision, RouteDecision};

/// The injected collaborators, constructed once at process start.
#[derive(Clone)]
pub struct Collaborators {
  pub classifier: Arc<dyn Classifier>,
  pub vision: Arc<dyn VisionVerifier>,
  pub reference: Arc<dyn ReferencePageFetcher>,
  pub search: Arc<dyn WebSearch>,
  pub answerer: Arc<dyn TextAnswerer>,
}

/// Builds the identification turn graph. All wiring defects surface here,
/// before the first turn runs.
pub fn identification_graph(
  collaborators: Collaborators,
  config: &EngineConfig,
) -> Result<GraphDefinition, GraphBuildError> {
  let Collaborators {
    classifier,
    vision,
    reference,
    search,
    answerer,
  } = collaborators;

  GraphDefinition::builder()
    .add_node("intake", Arc::new(IntakeNode))
    .add_node(
      "normalize_image",
      Arc::new(NormalizeImageNode::new(config.call_timeout())),
    )
    .add_node(
      "classify_local",
      Arc::new(ClassifyLocalNode::new(classifier, config.top_k)),
    )
    .add_node(
      "gate_uncertainty",
      Arc::new(GateUncertaintyNode::new(
        config.accept_policy,
        config.accept_threshold,
      )),
    )
    .add_node("resolve_name", Arc::new(ResolveNameNode))
    .add_node("verify_vision", Arc::new(VerifyVisionNode::new(vision)))
    .add_node("retrieve", Arc::new(IdentityNode) as Arc<dyn TurnNode>)
    .add_node(
      "fetch_reference",
      Arc::new(FetchReferenceNode::new(reference)),
    )
    .add_node(
      "web_search",
      Arc::new(WebSearchNode::new(search, config.max_search_results)),
    )
    .add_node("merge_context", Arc::new(MergeContextNode::new(config)))
    .add_node(
      "synthesize_answer",
      Arc::new(SynthesizeAnswerNode::new(Arc::clone(&answerer), config)),
    )
    .add_node(
      "answer_question",
      Arc::new(AnswerQuestionNode::new(answerer, config)),
    )
    .add_node("capture_subject", Arc::new(CaptureSubjectNode))
    .add_node("prompt_for_image", Arc::new(PromptForImageNode))
    .add_node("clarify", Arc::new(ClarifyNode))
    .entry("intake")
    .add_branch(
      "intake",
      Guard::new("route_classify", |s| {
        s.scratch.route == Some(RouteDecision::Classify)
      }),
      "normalize_image",
    )
    .add_branch(
      "intake",
      Guard::new("route_question", |s| {
        s.scratch.route == Some(RouteDecision::Question)
      }),
      "answer_question",
    )
    .add_branch(
      "intake",
      Guard::new("route_capture", |s| {
        s.scratch.route == Some(RouteDecision::CaptureName)
      }),
      "capture_subject",
    )
    .default_edge("intake", "prompt_for_image")
    .add_branch(
      "normalize_image",
      Guard::new("image_ok", |s| {
        s.scratch.image.as_ref().is_some_and(|i| i.ok)
      }),
      "classify_local",
    )
    .default_edge("normalize_image", "clarify")
    .add_edge("classify_local", "gate_uncertainty")
    .add_branch(
      "gate_uncertainty",
      Guard::new("accepted", |s| {
        s.scratch
          .gate
          .as_ref()
          .is_some_and(|g| g.decision == GateDecision::Accept)
      }),
      "resolve_name",
    )
    .default_edge("gate_uncertainty", "verify_vision")
    .add_branch(
      "resolve_name",
      Guard::new("resolved", |s| {
        s.scratch.resolution.as_ref().is_some_and(|r| r.resolved)
      }),
      "retrieve",
    )
    .default_edge("resolve_name", "verify_vision")
    .add_branch(
      "verify_vision",
      Guard::new("verified", |s| {
        s.scratch
          .vision
          .as_ref()
          .is_some_and(|v| v.status == CallStatus::Ok)
          && s.subject.is_some()
      }),
      "retrieve",
    )
    .default_edge("verify_vision", "clarify")
    .add_fan_out("retrieve", &["fetch_reference", "web_search"], "merge_context")
    .add_edge("merge_context", "synthesize_answer")
    .add_edge("capture_subject", "prompt_for_image")
    .build()
}

/// Convenience constructor: the wired graph behind a [TurnEngine] with the
/// configured branch timeout.
pub fn identification_engine(
  collaborators: Collaborators,
  config: &EngineConfig,
) -> Result<TurnEngine, GraphBuildError> {
  Ok(
    TurnEngine::new(identification_graph(collaborators, config)?)
      .with_branch_timeout(config.branch_timeout()),
  )
}

//! Tests for the turn engine loop and the fan-out barrier.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;

use crate::collaborators::{SearchResult, SearchSummary};
use crate::types::{
  CallStatus, ConversationState, Namespace, NodeDelta, ReferenceScratch, RouteDecision,
  SearchScratch,
};

use super::definition::{GraphDefinition, Guard};
use super::engine::TurnEngine;
use super::node::{IdentityNode, TurnNode};

/// Appends one assistant message naming itself.
struct SayNode(&'static str);

#[async_trait]
impl TurnNode for SayNode {
  fn owns(&self) -> &'static [Namespace] {
    &[]
  }

  async fn run(&self, _state: &ConversationState) -> NodeDelta {
    NodeDelta::assistant_message(self.0)
  }
}

/// Writes a route decision so a guard downstream can observe it.
struct RouteNode(RouteDecision);

#[async_trait]
impl TurnNode for RouteNode {
  fn owns(&self) -> &'static [Namespace] {
    &[Namespace::Route]
  }

  async fn run(&self, _state: &ConversationState) -> NodeDelta {
    let mut delta = NodeDelta::default();
    delta.scratch.route = Some(self.0);
    delta
  }
}

/// Fan-out branch that fills the reference namespace after an optional delay.
struct ReferenceBranch {
  delay: Duration,
}

#[async_trait]
impl TurnNode for ReferenceBranch {
  fn owns(&self) -> &'static [Namespace] {
    &[Namespace::Reference]
  }

  async fn run(&self, _state: &ConversationState) -> NodeDelta {
    tokio::time::sleep(self.delay).await;
    let mut delta = NodeDelta::default();
    delta.scratch.reference = Some(ReferenceScratch {
      status: CallStatus::Ok,
      page: None,
      error: None,
    });
    delta
  }
}

/// Fan-out branch that fills the search namespace immediately.
struct SearchBranch;

#[async_trait]
impl TurnNode for SearchBranch {
  fn owns(&self) -> &'static [Namespace] {
    &[Namespace::Search]
  }

  async fn run(&self, _state: &ConversationState) -> NodeDelta {
    let mut delta = NodeDelta::default();
    delta.scratch.search = Some(SearchScratch {
      status: CallStatus::Ok,
      summary: Some(SearchSummary {
        status: CallStatus::Ok,
        top_snippet: "snippet".to_string(),
        results: vec![SearchResult {
          title: "hit".to_string(),
          url: "https://hit.example/".to_string(),
          snippet: "snippet".to_string(),
        }],
      }),
    });
    delta
  }
}

#[tokio::test]
async fn linear_graph_runs_in_order() {
  let definition = GraphDefinition::builder()
    .add_node("first", Arc::new(SayNode("first")))
    .add_node("second", Arc::new(SayNode("second")))
    .entry("first")
    .add_edge("first", "second")
    .build()
    .expect("valid graph");

  let state = TurnEngine::new(definition)
    .run_turn(ConversationState::new())
    .await;
  let texts: Vec<&str> = state.messages.iter().map(|m| m.text.as_str()).collect();
  assert_eq!(texts, vec!["first", "second"]);
}

#[tokio::test]
async fn guards_are_evaluated_after_the_merge_in_declared_order() {
  let definition = GraphDefinition::builder()
    .add_node("route", Arc::new(RouteNode(RouteDecision::Question)))
    .add_node("classify", Arc::new(SayNode("classify")))
    .add_node("question", Arc::new(SayNode("question")))
    .add_node("fallback", Arc::new(SayNode("fallback")))
    .entry("route")
    .add_branch(
      "route",
      Guard::new("route_classify", |s| {
        s.scratch.route == Some(RouteDecision::Classify)
      }),
      "classify",
    )
    .add_branch(
      "route",
      Guard::new("route_question", |s| {
        s.scratch.route == Some(RouteDecision::Question)
      }),
      "question",
    )
    .default_edge("route", "fallback")
    .build()
    .expect("valid graph");

  let state = TurnEngine::new(definition)
    .run_turn(ConversationState::new())
    .await;
  assert_eq!(state.messages.last().map(|m| m.text.as_str()), Some("question"));
}

#[tokio::test]
async fn unmatched_guards_take_the_default_edge() {
  let definition = GraphDefinition::builder()
    .add_node("route", Arc::new(RouteNode(RouteDecision::AskImage)))
    .add_node("classify", Arc::new(SayNode("classify")))
    .add_node("fallback", Arc::new(SayNode("fallback")))
    .entry("route")
    .add_branch(
      "route",
      Guard::new("route_classify", |s| {
        s.scratch.route == Some(RouteDecision::Classify)
      }),
      "classify",
    )
    .default_edge("route", "fallback")
    .build()
    .expect("valid graph");

  let state = TurnEngine::new(definition)
    .run_turn(ConversationState::new())
    .await;
  assert_eq!(state.messages.last().map(|m| m.text.as_str()), Some("fallback"));
}

fn fan_out_definition(reference_delay: Duration) -> GraphDefinition {
  GraphDefinition::builder()
    .add_node("dispatch", Arc::new(IdentityNode))
    .add_node(
      "reference",
      Arc::new(ReferenceBranch {
        delay: reference_delay,
      }),
    )
    .add_node("search", Arc::new(SearchBranch))
    .add_node("join", Arc::new(SayNode("join")))
    .entry("dispatch")
    .add_fan_out("dispatch", &["reference", "search"], "join")
    .build()
    .expect("valid graph")
}

#[tokio::test]
async fn join_runs_after_all_branches_report() {
  let engine = TurnEngine::new(fan_out_definition(Duration::ZERO));
  let state = engine.run_turn(ConversationState::new()).await;

  assert_eq!(state.scratch.reference.as_ref().map(|r| r.status), Some(CallStatus::Ok));
  assert_eq!(state.scratch.search.as_ref().map(|s| s.status), Some(CallStatus::Ok));
  // The join only produced its message after both branch namespaces landed.
  assert_eq!(state.messages.last().map(|m| m.text.as_str()), Some("join"));
}

#[tokio::test(start_paused = true)]
async fn branch_timeout_isolates_the_slow_branch() {
  let engine = TurnEngine::new(fan_out_definition(Duration::from_secs(60)))
    .with_branch_timeout(Duration::from_secs(1));
  let state = engine.run_turn(ConversationState::new()).await;

  assert_eq!(
    state.scratch.reference.as_ref().map(|r| r.status),
    Some(CallStatus::Timeout)
  );
  assert_eq!(state.scratch.search.as_ref().map(|s| s.status), Some(CallStatus::Ok));
  assert_eq!(state.messages.last().map(|m| m.text.as_str()), Some("join"));
}

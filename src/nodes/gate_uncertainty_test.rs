use crate::collaborators::RankedLabel;
use crate::config::GatePolicy;
use crate::graph::TurnNode;
use crate::types::{CallStatus, ClassifierScratch, ConversationState, GateDecision};

use super::gate_uncertainty::{GateUncertaintyNode, gate_decision};

#[test]
fn confidence_policy_accepts_at_or_above_threshold() {
  assert_eq!(
    gate_decision(GatePolicy::Confidence, 0.7, 0.82, 0.1, 0.6),
    GateDecision::Accept
  );
  assert_eq!(
    gate_decision(GatePolicy::Confidence, 0.7, 0.65, 0.1, 0.6),
    GateDecision::Review
  );
  assert_eq!(
    gate_decision(GatePolicy::Confidence, 0.7, 0.7, 0.1, 0.6),
    GateDecision::Accept
  );
}

#[test]
fn margin_policy_compares_top_two() {
  assert_eq!(
    gate_decision(GatePolicy::Margin, 0.25, 0.6, 0.5, 0.9),
    GateDecision::Review
  );
  assert_eq!(
    gate_decision(GatePolicy::Margin, 0.25, 0.7, 0.2, 0.9),
    GateDecision::Accept
  );
}

#[test]
fn entropy_policy_accepts_low_entropy() {
  assert_eq!(
    gate_decision(GatePolicy::Entropy, 1.0, 0.5, 0.3, 0.8),
    GateDecision::Accept
  );
  assert_eq!(
    gate_decision(GatePolicy::Entropy, 1.0, 0.5, 0.3, 1.4),
    GateDecision::Review
  );
}

#[tokio::test]
async fn failed_classification_is_always_reviewed() {
  let mut state = ConversationState::new();
  state.scratch.classifier = Some(ClassifierScratch::failed(CallStatus::Error, "model load"));
  let node = GateUncertaintyNode::new(GatePolicy::Confidence, 0.1);
  let delta = node.run(&state).await;
  assert_eq!(
    delta.scratch.gate.map(|g| g.decision),
    Some(GateDecision::Review)
  );
}

#[tokio::test]
async fn successful_classification_flows_into_the_decision() {
  let mut state = ConversationState::new();
  state.scratch.classifier = Some(ClassifierScratch {
    status: CallStatus::Ok,
    top: vec![RankedLabel {
      label: "Japanese_macaque".to_string(),
      prob: 0.9,
    }],
    p1: 0.9,
    p2: 0.05,
    margin: 0.85,
    entropy: 0.3,
    predicted: Some("Japanese_macaque".to_string()),
    error: None,
  });
  let node = GateUncertaintyNode::new(GatePolicy::Confidence, 0.7);
  let delta = node.run(&state).await;
  assert_eq!(
    delta.scratch.gate.map(|g| g.decision),
    Some(GateDecision::Accept)
  );
}

//! Confidence gate over the classifier's metrics.

use async_trait::async_trait;
use tracing::{info, instrument};

use crate::config::GatePolicy;
use crate::graph::TurnNode;
use crate::types::{
  ConversationState, GateDecision, GateScratch, Namespace, NodeDelta,
};

/// Pure accept/review decision over a probability distribution's metrics.
#[instrument(level = "trace")]
pub fn gate_decision(
  policy: GatePolicy,
  threshold: f64,
  p1: f64,
  p2: f64,
  entropy: f64,
) -> GateDecision {
  let accept = match policy {
    GatePolicy::Confidence => p1 >= threshold,
    GatePolicy::Margin => p1 - p2 >= threshold,
    GatePolicy::Entropy => entropy <= threshold,
  };
  if accept {
    GateDecision::Accept
  } else {
    GateDecision::Review
  }
}

pub struct GateUncertaintyNode {
  policy: GatePolicy,
  threshold: f64,
}

impl GateUncertaintyNode {
  pub fn new(policy: GatePolicy, threshold: f64) -> Self {
    Self { policy, threshold }
  }
}

#[async_trait]
impl TurnNode for GateUncertaintyNode {
  fn owns(&self) -> &'static [Namespace] {
    &[Namespace::Gate]
  }

  async fn run(&self, state: &ConversationState) -> NodeDelta {
    // A failed or missing classification never passes the gate.
    let decision = match state.scratch.classifier.as_ref() {
      Some(c) if c.status.is_ok() && c.predicted.is_some() => {
        gate_decision(self.policy, self.threshold, c.p1, c.p2, c.entropy)
      }
      _ => GateDecision::Review,
    };
    info!(?decision, policy = ?self.policy, threshold = self.threshold, "gate evaluated");
    let mut delta = NodeDelta::default();
    delta.scratch.gate = Some(GateScratch { decision });
    delta
  }
}

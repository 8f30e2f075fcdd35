//! Local classification: runs the injected classifier over normalized bytes.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::info;

use crate::collaborators::Classifier;
use crate::graph::TurnNode;
use crate::types::{CallStatus, ClassifierScratch, ConversationState, Namespace, NodeDelta};

pub struct ClassifyLocalNode {
  classifier: Arc<dyn Classifier>,
  top_k: usize,
}

impl ClassifyLocalNode {
  pub fn new(classifier: Arc<dyn Classifier>, top_k: usize) -> Self {
    Self { classifier, top_k }
  }
}

#[async_trait]
impl TurnNode for ClassifyLocalNode {
  fn owns(&self) -> &'static [Namespace] {
    &[Namespace::Classifier]
  }

  async fn run(&self, state: &ConversationState) -> NodeDelta {
    let mut delta = NodeDelta::default();
    let Some(bytes) = state.image_bytes() else {
      delta.scratch.classifier = Some(ClassifierScratch::failed(
        CallStatus::Invalid,
        "no normalized image bytes",
      ));
      return delta;
    };

    let report = self.classifier.infer(bytes, self.top_k).await;
    let predicted = report.top.first().map(|r| r.label.clone());
    info!(
      status = %report.status,
      predicted = predicted.as_deref().unwrap_or("-"),
      p1 = report.p1,
      entropy = report.entropy,
      "local classification done"
    );
    delta.scratch.classifier = Some(ClassifierScratch {
      status: report.status,
      p1: report.p1,
      p2: report.p2,
      margin: report.p1 - report.p2,
      entropy: report.entropy,
      predicted,
      top: report.top,
      error: report.error,
    });
    delta
  }
}

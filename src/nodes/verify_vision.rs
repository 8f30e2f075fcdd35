//! External vision verification for turns the local path could not settle.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::info;

use crate::collaborators::VisionVerifier;
use crate::graph::TurnNode;
use crate::types::{CallStatus, ConversationState, Namespace, NodeDelta, VisionScratch};

pub struct VerifyVisionNode {
  verifier: Arc<dyn VisionVerifier>,
}

impl VerifyVisionNode {
  pub fn new(verifier: Arc<dyn VisionVerifier>) -> Self {
    Self { verifier }
  }
}

#[async_trait]
impl TurnNode for VerifyVisionNode {
  fn owns(&self) -> &'static [Namespace] {
    &[Namespace::Vision]
  }

  async fn run(&self, state: &ConversationState) -> NodeDelta {
    let mut delta = NodeDelta::default();
    let Some(bytes) = state.image_bytes() else {
      delta.scratch.vision = Some(VisionScratch {
        status: CallStatus::Invalid,
        error: Some("no normalized image bytes".to_string()),
      });
      return delta;
    };

    let report = self.verifier.resolve(bytes).await;
    info!(status = %report.status, "vision verification done");
    if let Some(subject) = report.binomial {
      delta.subject = Some(subject);
    }
    delta.scratch.vision = Some(VisionScratch {
      status: report.status,
      error: report.error,
    });
    delta
  }
}

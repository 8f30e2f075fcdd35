//! Local image classifier contract and confidence metrics.

use async_trait::async_trait;
use bytes::Bytes;
use serde::Serialize;
use tracing::instrument;

use crate::types::CallStatus;

/// One ranked class from the classifier's top-k output.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RankedLabel {
  pub label: String,
  pub prob: f64,
}

/// Full report of one classifier invocation.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct InferenceReport {
  pub status: CallStatus,
  /// Ranked labels, highest probability first.
  pub top: Vec<RankedLabel>,
  pub p1: f64,
  pub p2: f64,
  pub entropy: f64,
  pub error: Option<String>,
}

impl InferenceReport {
  /// Builds a report from ranked labels, deriving the confidence metrics
  /// from the label probabilities. Empty input yields `status = empty`.
  pub fn from_ranked(top: Vec<RankedLabel>) -> Self {
    if top.is_empty() {
      return Self {
        status: CallStatus::Empty,
        top,
        p1: 0.0,
        p2: 0.0,
        entropy: 0.0,
        error: None,
      };
    }
    let probs: Vec<f64> = top.iter().map(|r| r.prob).collect();
    let (p1, p2, entropy) = distribution_metrics(&probs);
    Self {
      status: CallStatus::Ok,
      top,
      p1,
      p2,
      entropy,
      error: None,
    }
  }

  pub fn error(detail: impl Into<String>) -> Self {
    Self {
      status: CallStatus::Error,
      top: Vec::new(),
      p1: 0.0,
      p2: 0.0,
      entropy: 0.0,
      error: Some(detail.into()),
    }
  }
}

/// Computes `(p1, p2, entropy)` over a class probability distribution.
/// Entropy is Shannon entropy in nats; zero-probability classes contribute
/// nothing.
#[instrument(level = "trace", skip(probs))]
pub fn distribution_metrics(probs: &[f64]) -> (f64, f64, f64) {
  let mut sorted: Vec<f64> = probs.to_vec();
  sorted.sort_by(|a, b| b.partial_cmp(a).unwrap_or(std::cmp::Ordering::Equal));
  let p1 = sorted.first().copied().unwrap_or(0.0);
  let p2 = sorted.get(1).copied().unwrap_or(0.0);
  let entropy = probs
    .iter()
    .filter(|&&p| p > 0.0)
    .map(|&p| -p * p.ln())
    .sum();
  (p1, p2, entropy)
}

/// Local image classifier. The model handle behind an implementation is
/// process-wide, read-only after initialization, and safe for concurrent use.
#[async_trait]
pub trait Classifier: Send + Sync {
  /// Classifies `image`, returning at most `top_k` ranked labels. Failures
  /// are encoded in the report status, never returned as errors.
  async fn infer(&self, image: &Bytes, top_k: usize) -> InferenceReport;
}

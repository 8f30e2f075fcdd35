//! Engine configuration, supplied explicitly at graph-build time.

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Confidence-gate policy over classifier metrics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GatePolicy {
  /// Accept iff `p1 >= threshold`.
  Confidence,
  /// Accept iff `p1 - p2 >= threshold`.
  Margin,
  /// Accept iff `entropy <= threshold`.
  Entropy,
}

/// Graph-build-time configuration. Recognized keys are enumerated here;
/// unknown keys are rejected on deserialization, and no defaults come from
/// the environment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct EngineConfig {
  pub accept_policy: GatePolicy,
  pub accept_threshold: f64,
  /// Ranked labels requested from the classifier.
  pub top_k: usize,
  /// Search hits kept per query.
  pub max_search_results: usize,
  /// Citation cap for the context bundle.
  pub max_sources: usize,
  /// Infobox rows rendered into the context block.
  pub max_infobox_rows: usize,
  /// Character budget for the merged context block.
  pub context_max_chars: usize,
  /// Character budget for context quoted inside answer prompts.
  pub answer_context_max_chars: usize,
  /// Per-branch timeout at the retrieval fan-out, in seconds.
  pub branch_timeout_secs: u64,
  /// Timeout for individual collaborator calls, in seconds.
  pub call_timeout_secs: u64,
}

impl Default for EngineConfig {
  fn default() -> Self {
    Self {
      accept_policy: GatePolicy::Confidence,
      accept_threshold: 0.7,
      top_k: 5,
      max_search_results: 3,
      max_sources: 10,
      max_infobox_rows: 12,
      context_max_chars: 8000,
      answer_context_max_chars: 4000,
      branch_timeout_secs: 10,
      call_timeout_secs: 12,
    }
  }
}

impl EngineConfig {
  pub fn branch_timeout(&self) -> Duration {
    Duration::from_secs(self.branch_timeout_secs)
  }

  pub fn call_timeout(&self) -> Duration {
    Duration::from_secs(self.call_timeout_secs)
  }
}

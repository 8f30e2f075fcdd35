//! Tests for `EngineConfig`.

use crate::config::{EngineConfig, GatePolicy};

#[test]
fn defaults_match_the_documented_policy() {
  let c = EngineConfig::default();
  assert_eq!(c.accept_policy, GatePolicy::Confidence);
  assert_eq!(c.accept_threshold, 0.7);
  assert_eq!(c.top_k, 5);
}

#[test]
fn partial_json_fills_in_defaults() {
  let c: EngineConfig = serde_json::from_str(r#"{ "accept_policy": "margin", "accept_threshold": 0.25 }"#)
    .expect("valid config");
  assert_eq!(c.accept_policy, GatePolicy::Margin);
  assert_eq!(c.accept_threshold, 0.25);
  assert_eq!(c.context_max_chars, 8000);
}

#[test]
fn unknown_keys_are_rejected() {
  let err = serde_json::from_str::<EngineConfig>(r#"{ "acept_threshold": 0.5 }"#);
  assert!(err.is_err());
}

//! Status tag returned by every collaborator call.

use std::fmt;

use serde::Serialize;

/// Status tag returned by every collaborator call.
///
/// Nodes branch on this tag, never on an error type. A collaborator that
/// fails must surface the failure here instead of returning `Err`; the
/// engine never sees node-level failures as engine-level failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CallStatus {
  Ok,
  Empty,
  Error,
  NotFound,
  Invalid,
  Timeout,
}

impl CallStatus {
  pub fn is_ok(&self) -> bool {
    matches!(self, CallStatus::Ok)
  }
}

impl fmt::Display for CallStatus {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      CallStatus::Ok => write!(f, "ok"),
      CallStatus::Empty => write!(f, "empty"),
      CallStatus::Error => write!(f, "error"),
      CallStatus::NotFound => write!(f, "not_found"),
      CallStatus::Invalid => write!(f, "invalid"),
      CallStatus::Timeout => write!(f, "timeout"),
    }
  }
}

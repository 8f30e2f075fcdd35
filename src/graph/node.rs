//! Node contract for turn execution.

use async_trait::async_trait;

use crate::types::{ConversationState, Namespace, NodeDelta};

/// A unit of work in the turn graph.
///
/// Nodes read the shared state and return a partial update; they never fail
/// at the engine level. A node that calls an external collaborator must catch
/// every failure and encode the outcome as a status flag in its own scratch
/// namespace. The engine invokes a node at most once per turn.
#[async_trait]
pub trait TurnNode: Send + Sync {
  /// Scratch namespaces this node may write. Used to validate that fan-out
  /// branches stay disjoint, and to record branch timeouts.
  fn owns(&self) -> &'static [Namespace];

  async fn run(&self, state: &ConversationState) -> NodeDelta;
}

/// Pass-through node producing an empty delta. Used for dispatch points that
/// exist only to carry edges (the retrieval fan-out).
pub struct IdentityNode;

#[async_trait]
impl TurnNode for IdentityNode {
  fn owns(&self) -> &'static [Namespace] {
    &[]
  }

  async fn run(&self, _state: &ConversationState) -> NodeDelta {
    NodeDelta::default()
  }
}

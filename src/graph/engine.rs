//! Turn engine: drives one conversation turn from the entry node to a
//! terminal node, merging deltas and synchronizing fan-out branches.

use std::sync::Arc;
use std::time::Duration;

use futures::future::join_all;
use tracing::{error, info, warn};

use crate::types::{ConversationState, NodeDelta, Scratch};

use super::definition::{EdgeSet, GraphDefinition};
use super::node::TurnNode;

/// Hard cap on executed nodes per turn. The graph is a validated DAG, so the
/// cap only matters if the definition invariants are ever broken.
const MAX_STEPS: usize = 64;

const DEFAULT_BRANCH_TIMEOUT: Duration = Duration::from_secs(10);

/// Executes turns over an immutable [GraphDefinition].
///
/// One engine serves the whole process; it holds no per-turn state, so it is
/// safe to share across concurrent turns.
pub struct TurnEngine {
  definition: GraphDefinition,
  branch_timeout: Duration,
}

impl TurnEngine {
  pub fn new(definition: GraphDefinition) -> Self {
    Self {
      definition,
      branch_timeout: DEFAULT_BRANCH_TIMEOUT,
    }
  }

  /// Per-branch timeout applied at fan-out dispatch. A branch that exceeds it
  /// reports `timeout` in its own scratch namespace; siblings keep running.
  pub fn with_branch_timeout(mut self, branch_timeout: Duration) -> Self {
    self.branch_timeout = branch_timeout;
    self
  }

  pub fn definition(&self) -> &GraphDefinition {
    &self.definition
  }

  /// Runs one turn to termination and returns the final state.
  ///
  /// Node-level failures never surface here; they are already data in the
  /// state's scratch record by the time routing sees them.
  pub async fn run_turn(&self, initial: ConversationState) -> ConversationState {
    let mut state = initial;
    let mut current = self.definition.entry;

    for step in 1usize.. {
      if step > MAX_STEPS {
        error!(steps = MAX_STEPS, "step cap exceeded; returning state as-is");
        break;
      }

      let (name, node) = &self.definition.nodes[current];
      info!(node = %name, step, "executing node");
      let delta = node.run(&state).await;
      state.merge(delta);

      // Guards are evaluated strictly after the node's delta is merged.
      match &self.definition.edges[current] {
        EdgeSet::Terminal => {
          info!(node = %name, "turn complete");
          break;
        }
        EdgeSet::Direct(next) => current = *next,
        EdgeSet::Conditional { arms, default } => {
          current = arms
            .iter()
            .find(|(guard, _)| guard.matches(&state))
            .map(|(guard, to)| {
              info!(node = %name, guard = guard.label(), "guard matched");
              *to
            })
            .unwrap_or(*default);
        }
        EdgeSet::FanOut { branches, join } => {
          let deltas = self.dispatch(branches, &state).await;
          // Arrival order; branches own disjoint namespaces, so order does
          // not affect the merged result.
          for delta in deltas {
            state.merge(delta);
          }
          current = *join;
        }
      }
    }

    state
  }

  /// Dispatches fan-out branches concurrently and waits for all of them.
  /// The join node must not run until every branch has reported, success or
  /// failure, so this returns exactly one delta per branch.
  async fn dispatch(&self, branches: &[usize], state: &ConversationState) -> Vec<NodeDelta> {
    let futures = branches.iter().map(|&ix| {
      let (name, node) = &self.definition.nodes[ix];
      let node: Arc<dyn TurnNode> = Arc::clone(node);
      async move {
        info!(branch = %name, "dispatching fan-out branch");
        match tokio::time::timeout(self.branch_timeout, node.run(state)).await {
          Ok(delta) => delta,
          Err(_) => {
            warn!(branch = %name, timeout = ?self.branch_timeout, "fan-out branch timed out");
            let mut delta = NodeDelta::default();
            for ns in node.owns() {
              delta.scratch.apply(Scratch::timeout(*ns));
            }
            delta
          }
        }
      }
    });
    join_all(futures).await
  }
}

//! Static graph definition: named nodes, guarded edges, fan-out declarations,
//! and the build-time validation that makes turn execution infallible.

use std::collections::{HashMap, HashSet};
use std::fmt;
use std::sync::Arc;

use thiserror::Error;
use tracing::instrument;

use crate::types::ConversationState;

use super::node::TurnNode;

/// Predicate over the merged state, evaluated strictly after the owning
/// node's delta has been merged.
#[derive(Clone)]
pub struct Guard {
  label: &'static str,
  test: Arc<dyn Fn(&ConversationState) -> bool + Send + Sync>,
}

impl Guard {
  pub fn new(label: &'static str, test: impl Fn(&ConversationState) -> bool + Send + Sync + 'static) -> Self {
    Self {
      label,
      test: Arc::new(test),
    }
  }

  pub fn label(&self) -> &'static str {
    self.label
  }

  pub(crate) fn matches(&self, state: &ConversationState) -> bool {
    (self.test)(state)
  }
}

impl fmt::Debug for Guard {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_struct("Guard").field("label", &self.label).finish()
  }
}

/// Resolved outgoing edges of one node.
#[derive(Debug)]
pub(crate) enum EdgeSet {
  /// No outgoing edges: reaching this node ends the turn.
  Terminal,
  /// Unconditional edge.
  Direct(usize),
  /// Guards evaluated in declared order; first match wins, else the default.
  Conditional {
    arms: Vec<(Guard, usize)>,
    default: usize,
  },
  /// Dispatch every branch, then run the join once all have reported.
  FanOut { branches: Vec<usize>, join: usize },
}

/// Construction defect found while building a graph. The only fatal error
/// class in the crate; nothing here can occur during turn execution.
#[derive(Debug, Error)]
pub enum GraphBuildError {
  #[error("duplicate node '{0}'")]
  DuplicateNode(String),
  #[error("edge references unknown node '{0}'")]
  UnknownNode(String),
  #[error("entry node is not set")]
  MissingEntry,
  #[error("node '{0}' declares conflicting edge kinds")]
  ConflictingEdges(String),
  #[error("conditional node '{0}' has no default edge")]
  MissingDefault(String),
  #[error("node '{0}' has a default edge but no guarded branches")]
  DanglingDefault(String),
  #[error("fan-out at '{0}' needs at least two branches")]
  DegenerateFanOut(String),
  #[error("fan-out at '{0}': branches share scratch namespace '{1}'")]
  NamespaceCollision(String, String),
  #[error("fan-out branch '{0}' may not declare its own outgoing edges")]
  BranchWithEdges(String),
  #[error("cycle detected through node '{0}'")]
  Cycle(String),
  #[error("node '{0}' is unreachable from the entry node")]
  Unreachable(String),
  #[error("no terminal node is reachable from the entry node")]
  NoTerminal,
}

/// Immutable turn graph: node registry plus edge table. Built once at process
/// start and owned by the engine for the process lifetime.
pub struct GraphDefinition {
  pub(crate) nodes: Vec<(String, Arc<dyn TurnNode>)>,
  pub(crate) edges: Vec<EdgeSet>,
  pub(crate) entry: usize,
}

impl fmt::Debug for GraphDefinition {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_struct("GraphDefinition")
      .field("nodes", &self.nodes.iter().map(|(name, _)| name).collect::<Vec<_>>())
      .field("edges", &self.edges)
      .field("entry", &self.entry)
      .finish()
  }
}

impl GraphDefinition {
  pub fn builder() -> GraphBuilder {
    GraphBuilder::default()
  }

  pub fn node_count(&self) -> usize {
    self.nodes.len()
  }

  pub(crate) fn node_name(&self, ix: usize) -> &str {
    &self.nodes[ix].0
  }
}

#[derive(Default)]
struct PendingEdges {
  direct: Vec<String>,
  arms: Vec<(Guard, String)>,
  default: Option<String>,
  fan_out: Option<(Vec<String>, String)>,
}

/// Builder for [GraphDefinition]. All defects are reported by [GraphBuilder::build],
/// never during turn execution.
#[derive(Default)]
pub struct GraphBuilder {
  nodes: Vec<(String, Arc<dyn TurnNode>)>,
  entry: Option<String>,
  pending: HashMap<String, PendingEdges>,
  order: Vec<String>,
}

impl GraphBuilder {
  pub fn add_node(mut self, name: impl Into<String>, node: Arc<dyn TurnNode>) -> Self {
    self.nodes.push((name.into(), node));
    self
  }

  pub fn entry(mut self, name: impl Into<String>) -> Self {
    self.entry = Some(name.into());
    self
  }

  /// Unconditional edge `from -> to`.
  pub fn add_edge(mut self, from: impl Into<String>, to: impl Into<String>) -> Self {
    self.pending_mut(from.into()).direct.push(to.into());
    self
  }

  /// Guarded edge `from -> to`; guards are evaluated in declaration order.
  pub fn add_branch(mut self, from: impl Into<String>, guard: Guard, to: impl Into<String>) -> Self {
    self.pending_mut(from.into()).arms.push((guard, to.into()));
    self
  }

  /// Default edge taken when none of `from`'s guards match. Required for
  /// every node with guarded branches.
  pub fn default_edge(mut self, from: impl Into<String>, to: impl Into<String>) -> Self {
    self.pending_mut(from.into()).default = Some(to.into());
    self
  }

  /// Declares `from` as a fan-out node: all `branches` are dispatched, and
  /// `join` runs only after every branch has reported.
  pub fn add_fan_out(
    mut self,
    from: impl Into<String>,
    branches: &[&str],
    join: impl Into<String>,
  ) -> Self {
    let branches = branches.iter().map(|b| b.to_string()).collect();
    self.pending_mut(from.into()).fan_out = Some((branches, join.into()));
    self
  }

  fn pending_mut(&mut self, from: String) -> &mut PendingEdges {
    if !self.pending.contains_key(&from) {
      self.order.push(from.clone());
    }
    self.pending.entry(from).or_default()
  }

  /// Validates and freezes the graph.
  #[instrument(level = "trace", skip(self))]
  pub fn build(self) -> Result<GraphDefinition, GraphBuildError> {
    let mut index: HashMap<String, usize> = HashMap::new();
    for (ix, (name, _)) in self.nodes.iter().enumerate() {
      if index.insert(name.clone(), ix).is_some() {
        return Err(GraphBuildError::DuplicateNode(name.clone()));
      }
    }

    let resolve = |name: &str| -> Result<usize, GraphBuildError> {
      index
        .get(name)
        .copied()
        .ok_or_else(|| GraphBuildError::UnknownNode(name.to_string()))
    };

    let entry_name = self.entry.as_deref().ok_or(GraphBuildError::MissingEntry)?;
    let entry = resolve(entry_name)?;

    let mut edges: Vec<EdgeSet> = (0..self.nodes.len()).map(|_| EdgeSet::Terminal).collect();
    let mut branch_nodes: HashSet<usize> = HashSet::new();

    for from_name in &self.order {
      let from = resolve(from_name)?;
      let pending = &self.pending[from_name];
      let kinds = usize::from(!pending.direct.is_empty())
        + usize::from(!pending.arms.is_empty() || pending.default.is_some())
        + usize::from(pending.fan_out.is_some());
      if kinds > 1 || pending.direct.len() > 1 {
        return Err(GraphBuildError::ConflictingEdges(from_name.clone()));
      }

      let edge_set = if let Some(to) = pending.direct.first() {
        EdgeSet::Direct(resolve(to)?)
      } else if let Some((branches, join)) = &pending.fan_out {
        if branches.len() < 2 {
          return Err(GraphBuildError::DegenerateFanOut(from_name.clone()));
        }
        let mut resolved = Vec::with_capacity(branches.len());
        let mut seen = HashSet::new();
        for branch in branches {
          let ix = resolve(branch)?;
          for ns in self.nodes[ix].1.owns() {
            if !seen.insert(*ns) {
              return Err(GraphBuildError::NamespaceCollision(
                from_name.clone(),
                ns.to_string(),
              ));
            }
          }
          branch_nodes.insert(ix);
          resolved.push(ix);
        }
        EdgeSet::FanOut {
          branches: resolved,
          join: resolve(join)?,
        }
      } else if !pending.arms.is_empty() {
        let default_name = pending
          .default
          .as_deref()
          .ok_or_else(|| GraphBuildError::MissingDefault(from_name.clone()))?;
        let mut arms = Vec::with_capacity(pending.arms.len());
        for (guard, to) in &pending.arms {
          arms.push((guard.clone(), resolve(to)?));
        }
        EdgeSet::Conditional {
          arms,
          default: resolve(default_name)?,
        }
      } else {
        // A default with no branches is a wiring mistake, not a no-op.
        return Err(GraphBuildError::DanglingDefault(from_name.clone()));
      };
      edges[from] = edge_set;
    }

    for &branch in &branch_nodes {
      if !matches!(edges[branch], EdgeSet::Terminal) {
        return Err(GraphBuildError::BranchWithEdges(self.nodes[branch].0.clone()));
      }
    }

    let definition = GraphDefinition {
      nodes: self.nodes,
      edges,
      entry,
    };
    validate_acyclic(&definition)?;
    validate_reachability(&definition)?;
    Ok(definition)
  }
}

fn successors(definition: &GraphDefinition, ix: usize) -> Vec<usize> {
  match &definition.edges[ix] {
    EdgeSet::Terminal => vec![],
    EdgeSet::Direct(to) => vec![*to],
    EdgeSet::Conditional { arms, default } => {
      let mut out: Vec<usize> = arms.iter().map(|(_, to)| *to).collect();
      out.push(*default);
      out
    }
    EdgeSet::FanOut { branches, join } => {
      let mut out = branches.clone();
      out.push(*join);
      out
    }
  }
}

/// Rejects cycles: the turn graph is a DAG by design, which is what bounds
/// execution and guarantees at-most-one invocation per node.
fn validate_acyclic(definition: &GraphDefinition) -> Result<(), GraphBuildError> {
  const WHITE: u8 = 0;
  const GRAY: u8 = 1;
  const BLACK: u8 = 2;

  fn visit(
    definition: &GraphDefinition,
    ix: usize,
    color: &mut [u8],
  ) -> Result<(), GraphBuildError> {
    color[ix] = GRAY;
    for next in successors(definition, ix) {
      match color[next] {
        WHITE => visit(definition, next, color)?,
        GRAY => return Err(GraphBuildError::Cycle(definition.node_name(next).to_string())),
        _ => {}
      }
    }
    color[ix] = BLACK;
    Ok(())
  }

  let mut color = vec![WHITE; definition.nodes.len()];
  for ix in 0..definition.nodes.len() {
    if color[ix] == WHITE {
      visit(definition, ix, &mut color)?;
    }
  }
  Ok(())
}

/// Every node must be reachable from the entry, and at least one reachable
/// node must be terminal.
fn validate_reachability(definition: &GraphDefinition) -> Result<(), GraphBuildError> {
  let mut reached = vec![false; definition.nodes.len()];
  let mut stack = vec![definition.entry];
  while let Some(ix) = stack.pop() {
    if reached[ix] {
      continue;
    }
    reached[ix] = true;
    stack.extend(successors(definition, ix));
  }

  if let Some(ix) = reached.iter().position(|r| !r) {
    return Err(GraphBuildError::Unreachable(definition.node_name(ix).to_string()));
  }
  let has_terminal = (0..definition.nodes.len())
    .any(|ix| reached[ix] && matches!(definition.edges[ix], EdgeSet::Terminal));
  if !has_terminal {
    return Err(GraphBuildError::NoTerminal);
  }
  Ok(())
}

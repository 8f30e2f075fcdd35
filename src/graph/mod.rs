//! The graph execution engine: node contract, static definition with
//! build-time validation, and the turn-driving engine with its fan-out
//! barrier.

mod definition;
mod engine;
#[cfg(test)]
mod engine_test;
mod node;

pub use definition::{GraphBuildError, GraphBuilder, GraphDefinition, Guard};
pub use engine::TurnEngine;
pub use node::{IdentityNode, TurnNode};

//! # taxograph
//!
//! One species-identification conversation turn as a typed execution graph.
//!
//! A turn flows through intake, image normalization, local classification, a
//! confidence gate, scientific-name resolution, optional external vision
//! verification, a parallel retrieval fan-out (reference page + web search),
//! and answer synthesis. Each step is a node `(ConversationState) -> NodeDelta`;
//! routing between nodes is declared up front and validated when the graph is
//! built, so turn execution itself is infallible. Node failures are data: a
//! status tag in the state's scratch record that routing branches on.
//!
//! The graph engine (`graph` module) is generic over [TurnNode]; the
//! identification pipeline (`pipeline` module) is the one graph this crate
//! ships.

pub mod collaborators;
pub mod config;
#[cfg(test)]
mod config_test;
pub mod graph;
pub mod nodes;
pub mod pipeline;
#[cfg(test)]
mod pipeline_test;
pub mod prompts;
pub mod text;
#[cfg(test)]
mod text_test;
pub mod types;

pub use config::{EngineConfig, GatePolicy};
pub use graph::{GraphBuildError, GraphBuilder, GraphDefinition, Guard, TurnEngine, TurnNode};
pub use pipeline::{Collaborators, identification_engine, identification_graph};
pub use types::{ConversationState, NodeDelta};

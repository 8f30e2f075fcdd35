//! Conversation-turn data model: state, deltas, scratch, and status tags.
//!
//! These types flow through the execution graph; the engine only ever reads
//! state and merges [NodeDelta] values into it.

mod call_status;
mod chat_message;
#[cfg(test)]
mod chat_message_test;
mod context_bundle;
#[cfg(test)]
mod context_bundle_test;
mod conversation_state;
mod image_input;
mod node_delta;
mod scratch;
mod subject_name;
#[cfg(test)]
mod subject_name_test;

pub use call_status::CallStatus;
pub use chat_message::{ChatMessage, Role};
pub use context_bundle::{Citation, ContextBundle};
pub use conversation_state::ConversationState;
pub use image_input::ImageInput;
pub use node_delta::NodeDelta;
pub use scratch::{
  ClarifyScratch, ClassifierScratch, ContextScratch, GateDecision, GateScratch, ImageScratch,
  Namespace, ReferenceScratch, ResolutionScratch, RouteDecision, Scratch, SearchScratch,
  VisionScratch,
};
pub use subject_name::{NameSource, SubjectName, is_valid_binomial};

//! The identification nodes. Each one reads the conversation state, calls at
//! most one collaborator, and returns a partial delta; routing between them
//! lives in the pipeline wiring, not here.

mod answer_question;
mod capture_subject;
mod clarify;
#[cfg(test)]
mod clarify_test;
mod classify_local;
mod fetch_reference;
mod gate_uncertainty;
#[cfg(test)]
mod gate_uncertainty_test;
mod intake;
#[cfg(test)]
mod intake_test;
mod merge_context;
mod normalize_image;
#[cfg(test)]
mod normalize_image_test;
mod prompt_for_image;
mod resolve_name;
#[cfg(test)]
mod resolve_name_test;
mod synthesize_answer;
mod verify_vision;
mod web_search;

pub use answer_question::AnswerQuestionNode;
pub use capture_subject::CaptureSubjectNode;
pub use clarify::ClarifyNode;
pub use classify_local::ClassifyLocalNode;
pub use fetch_reference::FetchReferenceNode;
pub use gate_uncertainty::{GateUncertaintyNode, gate_decision};
pub use intake::IntakeNode;
pub use merge_context::MergeContextNode;
pub use normalize_image::{ImageFormat, NormalizeImageNode, sniff_format};
pub use prompt_for_image::PromptForImageNode;
pub use resolve_name::{ResolveNameNode, normalize_label_key, resolve_label, slug_to_binomial};
pub use synthesize_answer::SynthesizeAnswerNode;
pub use verify_vision::VerifyVisionNode;
pub use web_search::WebSearchNode;

//! Injected external collaborators: classifier, vision verifier, reference
//! fetcher, web search, and text answerer.
//!
//! Every call returns a tagged [CallStatus](crate::types::CallStatus) instead
//! of an error; nodes branch on the tag only. Implementations are constructed
//! once at process start and shared across turns; nothing here is a lazy
//! module-level singleton.

mod answerer;
mod classifier;
mod reference;
mod search;
#[cfg(test)]
mod search_test;
mod vision;

pub use answerer::{AnswerReport, OpenAiAnswerer, TextAnswerer};
pub use classifier::{Classifier, InferenceReport, RankedLabel, distribution_metrics};
pub use reference::{ReferencePage, ReferencePageFetcher, WikipediaFetcher};
pub use search::{SearchResult, SearchSummary, StubSearch, WebSearch};
pub use vision::{OpenAiVisionVerifier, VisionReport, VisionVerifier};

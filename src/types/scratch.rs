//! Ephemeral per-turn working memory, namespaced per concern.
//!
//! The original dict-keyed `_tmp` dialect is replaced by one canonical typed
//! record: one optional sub-record per namespace. A node may only replace the
//! sub-records it owns; merging a patch touches exactly the namespaces the
//! patch carries, so deltas from fan-out branches with disjoint namespaces
//! commute.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::collaborators::{RankedLabel, ReferencePage, SearchSummary};

use super::CallStatus;

/// Scratch namespaces, one per concern. Each maps to exactly one field of
/// [Scratch]; fan-out validation checks branch disjointness over these.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Namespace {
  Route,
  Image,
  Classifier,
  Gate,
  Resolution,
  Vision,
  Reference,
  Search,
  Context,
  Clarify,
}

impl fmt::Display for Namespace {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    let name = match self {
      Namespace::Route => "route",
      Namespace::Image => "image",
      Namespace::Classifier => "classifier",
      Namespace::Gate => "gate",
      Namespace::Resolution => "resolution",
      Namespace::Vision => "vision",
      Namespace::Reference => "reference",
      Namespace::Search => "search",
      Namespace::Context => "context",
      Namespace::Clarify => "clarify",
    };
    write!(f, "{name}")
  }
}

/// Route picked by the intake node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RouteDecision {
  /// An image is present: run the classification path.
  Classify,
  /// No image, but the subject is already known: answer from stored context.
  Question,
  /// No image, but the user text carries a binomial candidate.
  CaptureName,
  /// Nothing usable: ask for a photo.
  AskImage,
}

/// Accept/review verdict of the confidence gate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum GateDecision {
  Accept,
  Review,
}

/// Outcome of image normalization.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ImageScratch {
  pub ok: bool,
  /// Machine-readable failure code (`empty_bytes`, `unsupported_format`,
  /// `download_failed`, `download_empty`).
  pub error: Option<String>,
}

impl ImageScratch {
  pub fn accepted() -> Self {
    Self {
      ok: true,
      error: None,
    }
  }

  pub fn rejected(code: impl Into<String>) -> Self {
    Self {
      ok: false,
      error: Some(code.into()),
    }
  }
}

/// Local classifier output: ranked labels plus confidence metrics.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ClassifierScratch {
  pub status: CallStatus,
  pub top: Vec<RankedLabel>,
  pub p1: f64,
  pub p2: f64,
  pub margin: f64,
  pub entropy: f64,
  /// Top-1 label, if any usable label came back.
  pub predicted: Option<String>,
  pub error: Option<String>,
}

impl ClassifierScratch {
  pub fn failed(status: CallStatus, detail: impl Into<String>) -> Self {
    Self {
      status,
      top: Vec::new(),
      p1: 0.0,
      p2: 0.0,
      margin: 0.0,
      entropy: 0.0,
      predicted: None,
      error: Some(detail.into()),
    }
  }
}

/// Confidence-gate verdict.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct GateScratch {
  pub decision: GateDecision,
}

/// Whether label-to-binomial resolution produced a subject.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ResolutionScratch {
  pub resolved: bool,
}

/// Outcome of the external vision verifier.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VisionScratch {
  pub status: CallStatus,
  pub error: Option<String>,
}

/// Reference-page branch of the retrieval fan-out.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReferenceScratch {
  pub status: CallStatus,
  pub page: Option<ReferencePage>,
  pub error: Option<String>,
}

/// Web-search branch of the retrieval fan-out.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SearchScratch {
  pub status: CallStatus,
  pub summary: Option<SearchSummary>,
}

/// Outcome of context merging at the fan-in join.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ContextScratch {
  pub status: CallStatus,
}

/// Breadcrumbs left by the clarification terminal.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ClarifyScratch {
  pub awaiting_image: bool,
  pub reasons: Vec<String>,
  pub at: DateTime<Utc>,
}

/// Per-turn working memory. Doubles as its own patch type: `None` in a patch
/// means "leave that namespace unchanged".
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Scratch {
  pub route: Option<RouteDecision>,
  pub image: Option<ImageScratch>,
  pub classifier: Option<ClassifierScratch>,
  pub gate: Option<GateScratch>,
  pub resolution: Option<ResolutionScratch>,
  pub vision: Option<VisionScratch>,
  pub reference: Option<ReferenceScratch>,
  pub search: Option<SearchScratch>,
  pub context: Option<ContextScratch>,
  pub clarify: Option<ClarifyScratch>,
}

impl Scratch {
  /// Merges `patch` namespace-by-namespace: present sub-records replace the
  /// old value for that namespace only, absent ones are preserved.
  pub fn apply(&mut self, patch: Scratch) {
    if patch.route.is_some() {
      self.route = patch.route;
    }
    if patch.image.is_some() {
      self.image = patch.image;
    }
    if patch.classifier.is_some() {
      self.classifier = patch.classifier;
    }
    if patch.gate.is_some() {
      self.gate = patch.gate;
    }
    if patch.resolution.is_some() {
      self.resolution = patch.resolution;
    }
    if patch.vision.is_some() {
      self.vision = patch.vision;
    }
    if patch.reference.is_some() {
      self.reference = patch.reference;
    }
    if patch.search.is_some() {
      self.search = patch.search;
    }
    if patch.context.is_some() {
      self.context = patch.context;
    }
    if patch.clarify.is_some() {
      self.clarify = patch.clarify;
    }
  }

  /// Patch recording a fan-out branch timeout in the branch's namespace.
  /// Namespaces that carry no call status produce an empty patch.
  pub fn timeout(namespace: Namespace) -> Scratch {
    let mut patch = Scratch::default();
    match namespace {
      Namespace::Reference => {
        patch.reference = Some(ReferenceScratch {
          status: CallStatus::Timeout,
          page: None,
          error: Some("fan-out branch timed out".to_string()),
        });
      }
      Namespace::Search => {
        patch.search = Some(SearchScratch {
          status: CallStatus::Timeout,
          summary: None,
        });
      }
      Namespace::Vision => {
        patch.vision = Some(VisionScratch {
          status: CallStatus::Timeout,
          error: Some("fan-out branch timed out".to_string()),
        });
      }
      Namespace::Route
      | Namespace::Image
      | Namespace::Classifier
      | Namespace::Gate
      | Namespace::Resolution
      | Namespace::Context
      | Namespace::Clarify => {}
    }
    patch
  }
}

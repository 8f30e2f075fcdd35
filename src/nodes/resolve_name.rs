//! Label-to-binomial resolution for the accepted classifier prediction.

use std::collections::{HashMap, HashSet};

use async_trait::async_trait;
use once_cell::sync::Lazy;
use tracing::info;

use crate::graph::TurnNode;
use crate::types::{
  ConversationState, NameSource, Namespace, NodeDelta, ResolutionScratch, SubjectName,
};

/// Dataset label to binomial name, for the ten classes the classifier knows.
static LABEL_TO_BINOMIAL: Lazy<HashMap<&'static str, &'static str>> = Lazy::new(|| {
  HashMap::from([
    ("Mantled_howler", "Alouatta palliata"),
    ("Patas_monkey", "Erythrocebus patas"),
    ("Bald_uakari", "Cacajao calvus"),
    ("Japanese_macaque", "Macaca fuscata"),
    ("Pygmy_marmoset", "Cebuella pygmaea"),
    ("White_headed_capuchin", "Cebus capucinus"),
    ("Silvery_marmoset", "Mico argentatus"),
    ("Common_squirrel_monkey", "Saimiri sciureus"),
    ("Black_headed_night_monkey", "Aotus nigriceps"),
    ("Nilgiri_langur", "Semnopithecus johnii"),
  ])
});

/// Genera known to the label map; slug normalization only trusts these.
static GENUS_WHITELIST: Lazy<HashSet<String>> = Lazy::new(|| {
  LABEL_TO_BINOMIAL
    .values()
    .filter_map(|binomial| binomial.split(' ').next())
    .map(str::to_lowercase)
    .collect()
});

/// Collapses separators so `bald uakari` and `Bald-uakari` hit the same key.
pub fn normalize_label_key(label: &str) -> String {
  let mut key = label.trim().replace(['-', ' '], "_");
  while key.contains("__") {
    key = key.replace("__", "_");
  }
  key
}

/// Turns `macaca_fuscata` into `Macaca fuscata`, but only when the genus is
/// whitelisted; arbitrary two-word slugs stay unresolved.
pub fn slug_to_binomial(label: &str) -> Option<SubjectName> {
  let spaced = label.replace(['_', '-'], " ");
  let parts: Vec<&str> = spaced.split_whitespace().collect();
  let [genus, epithet] = parts.as_slice() else {
    return None;
  };
  if !genus.chars().all(|c| c.is_ascii_alphabetic())
    || !epithet.chars().all(|c| c.is_ascii_alphabetic())
  {
    return None;
  }
  if !GENUS_WHITELIST.contains(&genus.to_lowercase()) {
    return None;
  }
  let mut binomial = String::new();
  let mut chars = genus.chars();
  if let Some(first) = chars.next() {
    binomial.push(first.to_ascii_uppercase());
  }
  binomial.push_str(&chars.as_str().to_lowercase());
  binomial.push(' ');
  binomial.push_str(&epithet.to_lowercase());
  SubjectName::parse(&binomial, NameSource::Normalized)
}

/// Resolves the predicted label to a subject name. Map hits carry source
/// `map`; whitelisted-slug normalizations carry `normalized`. Resolution is
/// idempotent: feeding an already-resolved binomial back in resolves to the
/// same name.
pub fn resolve_label(label: &str) -> Option<SubjectName> {
  let direct = LABEL_TO_BINOMIAL
    .get(label)
    .or_else(|| LABEL_TO_BINOMIAL.get(normalize_label_key(label).as_str()));
  if let Some(binomial) = direct {
    return SubjectName::parse(binomial, NameSource::Map);
  }
  slug_to_binomial(label).or_else(|| slug_to_binomial(&normalize_label_key(label)))
}

pub struct ResolveNameNode;

#[async_trait]
impl TurnNode for ResolveNameNode {
  fn owns(&self) -> &'static [Namespace] {
    &[Namespace::Resolution]
  }

  async fn run(&self, state: &ConversationState) -> NodeDelta {
    let mut delta = NodeDelta::default();
    let predicted = state
      .scratch
      .classifier
      .as_ref()
      .and_then(|c| c.predicted.as_deref());
    match predicted.and_then(resolve_label) {
      Some(subject) => {
        info!(binomial = %subject, source = %subject.source(), "label resolved");
        delta.subject = Some(subject);
        delta.scratch.resolution = Some(ResolutionScratch { resolved: true });
      }
      None => {
        info!(label = predicted.unwrap_or("-"), "label resolution missed");
        delta.scratch.resolution = Some(ResolutionScratch { resolved: false });
      }
    }
    delta
  }
}

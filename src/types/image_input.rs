//! Photo input for one turn: raw bytes, a URL, or both.

use bytes::Bytes;
use serde::Serialize;

/// Photo input for one turn. Normalization replaces this with a bytes-only
/// value once the URL (if any) has been downloaded and validated.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ImageInput {
  pub bytes: Option<Bytes>,
  pub url: Option<String>,
}

impl ImageInput {
  pub fn from_bytes(bytes: impl Into<Bytes>) -> Self {
    Self {
      bytes: Some(bytes.into()),
      url: None,
    }
  }

  pub fn from_url(url: impl Into<String>) -> Self {
    Self {
      bytes: None,
      url: Some(url.into()),
    }
  }

  /// True if there is anything to work with at all.
  pub fn has_data(&self) -> bool {
    self.bytes.as_ref().is_some_and(|b| !b.is_empty()) || self.url.as_ref().is_some_and(|u| !u.is_empty())
  }
}

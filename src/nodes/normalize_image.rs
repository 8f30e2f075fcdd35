//! Image normalization: every downstream consumer sees validated bytes.

use std::time::Duration;

use async_trait::async_trait;
use bytes::Bytes;
use tracing::warn;

use crate::graph::TurnNode;
use crate::types::{ConversationState, ImageInput, ImageScratch, Namespace, NodeDelta};

/// Supported on-disk image formats, detected by magic number.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageFormat {
  Jpeg,
  Png,
  Webp,
}

/// Sniffs the image format from the leading bytes. `None` for anything that
/// is not JPEG, PNG, or WEBP.
pub fn sniff_format(bytes: &[u8]) -> Option<ImageFormat> {
  if bytes.starts_with(&[0xFF, 0xD8, 0xFF]) {
    return Some(ImageFormat::Jpeg);
  }
  if bytes.starts_with(&[0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A]) {
    return Some(ImageFormat::Png);
  }
  if bytes.len() >= 12 && &bytes[0..4] == b"RIFF" && &bytes[8..12] == b"WEBP" {
    return Some(ImageFormat::Webp);
  }
  None
}

/// Normalizes the turn's image input to validated bytes. Inline bytes are
/// checked as-is; a URL is downloaded first. Failure codes land in the image
/// scratch namespace and routing sends the turn to clarification.
pub struct NormalizeImageNode {
  client: reqwest::Client,
  download_timeout: Duration,
}

impl NormalizeImageNode {
  pub fn new(download_timeout: Duration) -> Self {
    Self {
      client: reqwest::Client::new(),
      download_timeout,
    }
  }

  fn validate(bytes: Bytes) -> NodeDelta {
    let mut delta = NodeDelta::default();
    if bytes.is_empty() {
      delta.scratch.image = Some(ImageScratch::rejected("empty_bytes"));
      return delta;
    }
    if sniff_format(&bytes).is_none() {
      delta.scratch.image = Some(ImageScratch::rejected("unsupported_format"));
      return delta;
    }
    delta.image = Some(ImageInput::from_bytes(bytes));
    delta.scratch.image = Some(ImageScratch::accepted());
    delta
  }

  async fn download(&self, url: &str) -> NodeDelta {
    let response = self
      .client
      .get(url)
      .timeout(self.download_timeout)
      .send()
      .await;
    let mut delta = NodeDelta::default();
    let response = match response {
      Ok(r) if r.status().is_success() => r,
      Ok(r) => {
        warn!(url, status = %r.status(), "image download rejected");
        delta.scratch.image = Some(ImageScratch::rejected("download_failed"));
        return delta;
      }
      Err(e) => {
        warn!(url, error = %e, "image download failed");
        delta.scratch.image = Some(ImageScratch::rejected("download_failed"));
        return delta;
      }
    };
    match response.bytes().await {
      Ok(bytes) if !bytes.is_empty() => Self::validate(bytes),
      Ok(_) => {
        delta.scratch.image = Some(ImageScratch::rejected("download_empty"));
        delta
      }
      Err(e) => {
        warn!(url, error = %e, "image body read failed");
        delta.scratch.image = Some(ImageScratch::rejected("download_failed"));
        delta
      }
    }
  }
}

#[async_trait]
impl TurnNode for NormalizeImageNode {
  fn owns(&self) -> &'static [Namespace] {
    &[Namespace::Image]
  }

  async fn run(&self, state: &ConversationState) -> NodeDelta {
    let input = state.image.clone().unwrap_or_default();
    if let Some(bytes) = input.bytes {
      if !bytes.is_empty() {
        return Self::validate(bytes);
      }
    }
    if let Some(url) = input.url.as_deref().filter(|u| !u.is_empty()) {
      return self.download(url).await;
    }
    let mut delta = NodeDelta::default();
    delta.scratch.image = Some(ImageScratch::rejected("empty_bytes"));
    delta
  }
}

use std::time::Duration;

use bytes::Bytes;

use crate::graph::TurnNode;
use crate::types::{ConversationState, ImageInput};

use super::normalize_image::{ImageFormat, NormalizeImageNode, sniff_format};

const JPEG: &[u8] = &[0xFF, 0xD8, 0xFF, 0xE0, 0x00, 0x10];
const PNG: &[u8] = &[0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A, 0x00];
const WEBP: &[u8] = b"RIFF\x24\x00\x00\x00WEBPVP8 ";

fn node() -> NormalizeImageNode {
  NormalizeImageNode::new(Duration::from_secs(5))
}

#[test]
fn sniffs_the_supported_formats() {
  assert_eq!(sniff_format(JPEG), Some(ImageFormat::Jpeg));
  assert_eq!(sniff_format(PNG), Some(ImageFormat::Png));
  assert_eq!(sniff_format(WEBP), Some(ImageFormat::Webp));
  assert_eq!(sniff_format(b"GIF89a"), None);
  assert_eq!(sniff_format(b""), None);
}

#[tokio::test]
async fn valid_bytes_are_accepted() {
  let state = ConversationState::new().with_image(ImageInput::from_bytes(Bytes::from_static(JPEG)));
  let delta = node().run(&state).await;
  let image = delta.scratch.image.expect("image scratch");
  assert!(image.ok);
  assert!(delta.image.is_some_and(|i| i.bytes.is_some()));
}

#[tokio::test]
async fn unsupported_format_is_rejected() {
  let state =
    ConversationState::new().with_image(ImageInput::from_bytes(Bytes::from_static(b"GIF89a....")));
  let delta = node().run(&state).await;
  let image = delta.scratch.image.expect("image scratch");
  assert!(!image.ok);
  assert_eq!(image.error.as_deref(), Some("unsupported_format"));
}

#[tokio::test]
async fn missing_input_reports_empty_bytes() {
  let delta = node().run(&ConversationState::new()).await;
  let image = delta.scratch.image.expect("image scratch");
  assert!(!image.ok);
  assert_eq!(image.error.as_deref(), Some("empty_bytes"));
}

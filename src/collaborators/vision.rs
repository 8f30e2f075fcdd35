//! External vision verifier: asks a vision LLM for the binomial name.

use std::time::Duration;

use async_trait::async_trait;
use base64::Engine as _;
use base64::engine::general_purpose::STANDARD as BASE64;
use bytes::Bytes;
use serde_json::json;
use tracing::warn;

use crate::prompts;
use crate::types::{CallStatus, NameSource, SubjectName};

/// Result of one vision-verification call.
#[derive(Debug, Clone, PartialEq)]
pub struct VisionReport {
  pub status: CallStatus,
  /// Validated binomial, present only when `status` is ok.
  pub binomial: Option<SubjectName>,
  pub error: Option<String>,
}

impl VisionReport {
  pub fn ok(binomial: SubjectName) -> Self {
    Self {
      status: CallStatus::Ok,
      binomial: Some(binomial),
      error: None,
    }
  }

  pub fn invalid() -> Self {
    Self {
      status: CallStatus::Invalid,
      binomial: None,
      error: None,
    }
  }

  pub fn error(detail: impl Into<String>) -> Self {
    Self {
      status: CallStatus::Error,
      binomial: None,
      error: Some(detail.into()),
    }
  }
}

/// Resolves a subject name from an image via an external vision model.
#[async_trait]
pub trait VisionVerifier: Send + Sync {
  async fn resolve(&self, image: &Bytes) -> VisionReport;
}

/// Vision verifier speaking the OpenAI chat-completions wire format with an
/// inline base64 image. The client is shared and safe for concurrent use.
pub struct OpenAiVisionVerifier {
  client: reqwest::Client,
  endpoint: String,
  api_key: String,
  model: String,
  max_output_tokens: u32,
  timeout: Duration,
}

impl OpenAiVisionVerifier {
  pub fn new(api_key: impl Into<String>) -> Self {
    Self {
      client: reqwest::Client::new(),
      endpoint: "https://api.openai.com/v1/chat/completions".to_string(),
      api_key: api_key.into(),
      model: "gpt-4.1-mini".to_string(),
      max_output_tokens: 16,
      timeout: Duration::from_secs(12),
    }
  }

  pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
    self.endpoint = endpoint.into();
    self
  }

  pub fn with_model(mut self, model: impl Into<String>) -> Self {
    self.model = model.into();
    self
  }

  pub fn with_timeout(mut self, timeout: Duration) -> Self {
    self.timeout = timeout;
    self
  }
}

#[async_trait]
impl VisionVerifier for OpenAiVisionVerifier {
  async fn resolve(&self, image: &Bytes) -> VisionReport {
    let data_url = format!("data:image/jpeg;base64,{}", BASE64.encode(image));
    let payload = json!({
      "model": self.model,
      "max_tokens": self.max_output_tokens,
      "messages": [{
        "role": "user",
        "content": [
          { "type": "text", "text": prompts::BINOMIAL_PROMPT },
          { "type": "image_url", "image_url": { "url": data_url } }
        ]
      }]
    });

    let response = self
      .client
      .post(&self.endpoint)
      .bearer_auth(&self.api_key)
      .timeout(self.timeout)
      .json(&payload)
      .send()
      .await;

    let response = match response {
      Ok(r) => r,
      Err(e) => {
        warn!(error = %e, "vision verifier request failed");
        return if e.is_timeout() {
          VisionReport {
            status: CallStatus::Timeout,
            binomial: None,
            error: Some(e.to_string()),
          }
        } else {
          VisionReport::error(e.to_string())
        };
      }
    };
    if !response.status().is_success() {
      return VisionReport::error(format!("http {}", response.status()));
    }

    let body: serde_json::Value = match response.json().await {
      Ok(v) => v,
      Err(e) => return VisionReport::error(e.to_string()),
    };
    let text = body["choices"][0]["message"]["content"]
      .as_str()
      .unwrap_or("")
      .trim()
      .trim_matches('"')
      .to_string();
    if text.is_empty() {
      return VisionReport {
        status: CallStatus::Empty,
        binomial: None,
        error: None,
      };
    }
    match SubjectName::parse(&text, NameSource::Vision) {
      Some(name) => VisionReport::ok(name),
      None => VisionReport::invalid(),
    }
  }
}

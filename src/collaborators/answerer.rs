//! Text answerer: turns a grounded prompt into user-facing prose.

use std::time::Duration;

use async_trait::async_trait;
use serde_json::json;
use tracing::warn;

use crate::types::CallStatus;

/// Result of one answering call.
#[derive(Debug, Clone, PartialEq)]
pub struct AnswerReport {
  pub status: CallStatus,
  pub text: String,
  pub error: Option<String>,
}

impl AnswerReport {
  pub fn ok(text: impl Into<String>) -> Self {
    Self {
      status: CallStatus::Ok,
      text: text.into(),
      error: None,
    }
  }

  pub fn error(detail: impl Into<String>) -> Self {
    Self {
      status: CallStatus::Error,
      text: String::new(),
      error: Some(detail.into()),
    }
  }
}

/// Produces a text answer from a fully assembled prompt.
#[async_trait]
pub trait TextAnswerer: Send + Sync {
  async fn answer(&self, prompt: &str) -> AnswerReport;
}

/// Answerer speaking the OpenAI chat-completions wire format.
pub struct OpenAiAnswerer {
  client: reqwest::Client,
  endpoint: String,
  api_key: String,
  model: String,
  max_output_tokens: u32,
  timeout: Duration,
}

impl OpenAiAnswerer {
  pub fn new(api_key: impl Into<String>) -> Self {
    Self {
      client: reqwest::Client::new(),
      endpoint: "https://api.openai.com/v1/chat/completions".to_string(),
      api_key: api_key.into(),
      model: "gpt-4.1-mini".to_string(),
      max_output_tokens: 512,
      timeout: Duration::from_secs(20),
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
impl TextAnswerer for OpenAiAnswerer {
  async fn answer(&self, prompt: &str) -> AnswerReport {
    let payload = json!({
      "model": self.model,
      "max_tokens": self.max_output_tokens,
      "messages": [{ "role": "user", "content": prompt }]
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
        warn!(error = %e, "answerer request failed");
        return if e.is_timeout() {
          AnswerReport {
            status: CallStatus::Timeout,
            text: String::new(),
            error: Some(e.to_string()),
          }
        } else {
          AnswerReport::error(e.to_string())
        };
      }
    };
    if !response.status().is_success() {
      return AnswerReport::error(format!("http {}", response.status()));
    }

    let body: serde_json::Value = match response.json().await {
      Ok(v) => v,
      Err(e) => return AnswerReport::error(e.to_string()),
    };
    let text = body["choices"][0]["message"]["content"]
      .as_str()
      .unwrap_or("")
      .trim()
      .to_string();
    if text.is_empty() {
      AnswerReport {
        status: CallStatus::Empty,
        text,
        error: None,
      }
    } else {
      AnswerReport::ok(text)
    }
  }
}

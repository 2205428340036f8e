//! Gemini upstream client.
//!
//! Forwards role-tagged message turns to the `generateContent` REST
//! endpoint over HTTP via `reqwest` and reduces the response to the first
//! candidate's first text part. The error-to-status mapping here is part
//! of the externally visible contract: callers receive the mapped payload
//! with an HTTP 200, never a protocol-level error.
//!
//! Each call is attempted exactly once with a fixed timeout; there are no
//! retries.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::config::GeminiConfig;

/// One text part of a message turn.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessagePart {
    /// The text content.
    pub text: String,
}

/// A role-tagged message turn forwarded verbatim to the upstream API.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Message {
    /// The speaker role (`user` or `model`).
    pub role: String,
    /// The text parts of this turn.
    pub parts: Vec<MessagePart>,
}

/// Errors from the generation path, each with a pinned status code.
#[derive(Debug, thiserror::Error)]
pub enum GeminiError {
    /// No API key is configured; the call is never attempted.
    #[error("GEMINI_API_KEY is not configured")]
    MissingCredential,

    /// The supplied contents were not valid message turns.
    #[error("invalid contents supplied: {0}")]
    InvalidInput(String),

    /// The upstream call exceeded the fixed timeout.
    #[error("Gemini API call timed out")]
    Timeout,

    /// The upstream call failed at the transport level.
    #[error("Gemini API connection error: {0}")]
    Transport(String),

    /// The upstream returned a non-success HTTP status.
    #[error("Gemini API returned {status}: {body}")]
    Upstream {
        /// The upstream HTTP status code, echoed to the caller.
        status: u16,
        /// The upstream response body.
        body: String,
    },

    /// The upstream response did not contain a candidate text part.
    #[error("unexpected Gemini response shape")]
    BadResponseShape,
}

impl GeminiError {
    /// The status code reported in the error payload.
    ///
    /// This mapping is contractual: configuration, transport and shape
    /// failures are 500, bad input is 400, timeouts are 408, and upstream
    /// HTTP failures echo the upstream status.
    pub const fn status_code(&self) -> u16 {
        match self {
            Self::InvalidInput(_) => 400,
            Self::Timeout => 408,
            Self::Upstream { status, .. } => *status,
            Self::MissingCredential | Self::Transport(_) | Self::BadResponseShape => 500,
        }
    }
}

/// Render a generation error as the boundary JSON payload.
pub fn error_payload(error: &GeminiError) -> Value {
    serde_json::json!({
        "error": error.to_string(),
        "status_code": error.status_code(),
    })
}

/// HTTP client for the Gemini `generateContent` endpoint.
pub struct GeminiClient {
    client: reqwest::Client,
    api_url: String,
    api_key: String,
    model: String,
}

impl GeminiClient {
    /// Create a client with the configured fixed timeout.
    pub fn new(config: &GeminiConfig) -> Result<Self, GeminiError> {
        let client = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| GeminiError::Transport(format!("client build failed: {e}")))?;

        Ok(Self {
            client,
            api_url: config.api_url.clone(),
            api_key: config.api_key.clone(),
            model: config.model.clone(),
        })
    }

    /// Forward message turns to the upstream and return the first
    /// candidate's first text part.
    pub async fn generate(&self, contents: &[Message]) -> Result<String, GeminiError> {
        let url = format!(
            "{}/models/{}:generateContent?key={}",
            self.api_url, self.model, self.api_key
        );

        let body = serde_json::json!({ "contents": contents });

        let response = self
            .client
            .post(&url)
            .header("Content-Type", "application/json")
            .json(&body)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    GeminiError::Timeout
                } else {
                    GeminiError::Transport(e.to_string())
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| String::from("unable to read error body"));
            return Err(GeminiError::Upstream {
                status: status.as_u16(),
                body,
            });
        }

        let json: Value = response.json().await.map_err(|e| {
            if e.is_timeout() {
                GeminiError::Timeout
            } else {
                GeminiError::BadResponseShape
            }
        })?;

        extract_candidate_text(&json)
    }
}

/// Extract `candidates[0].content.parts[0].text` from a response body.
fn extract_candidate_text(json: &Value) -> Result<String, GeminiError> {
    json.get("candidates")
        .and_then(|c| c.get(0))
        .and_then(|c| c.get("content"))
        .and_then(|c| c.get("parts"))
        .and_then(|p| p.get(0))
        .and_then(|p| p.get("text"))
        .and_then(Value::as_str)
        .map(ToOwned::to_owned)
        .ok_or(GeminiError::BadResponseShape)
}

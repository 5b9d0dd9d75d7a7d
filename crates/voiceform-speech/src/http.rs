//! HTTP client for a local speech service.
//!
//! The service exposes two endpoints:
//!   - `POST /speak` with `{"text": "..."}`; returns once playback finished.
//!   - `POST /listen` with `{"timeout_secs": N}`; returns `{"text": "..."}`,
//!     or HTTP 422 when audio was captured but not understood.

use std::time::Duration;

use async_trait::async_trait;
use serde::Deserialize;
use serde_json::json;
use tracing::debug;

use voiceform_protocols::{Speech, SpeechError};

/// A recognized utterance from the service.
#[derive(Debug, Deserialize)]
struct ListenResponse {
    text: String,
}

/// Client for a local speech HTTP service.
pub struct HttpSpeech {
    base_url: String,
    client: reqwest::Client,
}

impl HttpSpeech {
    /// Client for the service at `base_url` (e.g. "http://localhost:7071").
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client: reqwest::Client::new(),
        }
    }
}

#[async_trait]
impl Speech for HttpSpeech {
    async fn speak(&self, text: &str) -> Result<(), SpeechError> {
        let url = format!("{}/speak", self.base_url);
        debug!(url = %url, "speak request");

        let response = self
            .client
            .post(&url)
            .json(&json!({"text": text}))
            .send()
            .await
            .map_err(|e| SpeechError::ServiceUnavailable(e.to_string()))?;

        if !response.status().is_success() {
            return Err(SpeechError::Backend(format!(
                "speak returned {}",
                response.status()
            )));
        }
        Ok(())
    }

    async fn listen(&self, timeout: Duration) -> Result<String, SpeechError> {
        let url = format!("{}/listen", self.base_url);
        debug!(url = %url, timeout_secs = timeout.as_secs(), "listen request");

        let response = self
            .client
            .post(&url)
            .json(&json!({"timeout_secs": timeout.as_secs()}))
            .send()
            .await
            .map_err(|e| SpeechError::ServiceUnavailable(e.to_string()))?;

        // 422: audio captured but not transcribable.
        if response.status() == reqwest::StatusCode::UNPROCESSABLE_ENTITY {
            return Err(SpeechError::Unrecognized);
        }
        if !response.status().is_success() {
            return Err(SpeechError::Backend(format!(
                "listen returned {}",
                response.status()
            )));
        }

        let body: ListenResponse = response
            .json()
            .await
            .map_err(|e| SpeechError::Backend(e.to_string()))?;
        Ok(body.text)
    }
}

#[cfg(test)]
#[path = "http_tests.rs"]
mod tests;

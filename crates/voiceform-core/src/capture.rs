//! Voice capture with an explicit re-prompt loop.
//!
//! Recognition misses are retried by looping, never by recursing, and the
//! attempt count is surfaced so retry policy stays observable in tests.

use std::time::Duration;

use tracing::{debug, warn};

use voiceform_protocols::{FormError, Speech, SpeechError};

/// How one capture behaves: how long to listen and how many re-prompts a
/// recognition miss may trigger (`None` = unbounded, the default).
#[derive(Debug, Clone)]
pub struct CapturePolicy {
    pub timeout: Duration,
    pub max_retries: Option<u32>,
}

impl CapturePolicy {
    pub fn new(timeout: Duration) -> Self {
        Self {
            timeout,
            max_retries: None,
        }
    }

    pub fn with_max_retries(mut self, max_retries: u32) -> Self {
        self.max_retries = Some(max_retries);
        self
    }
}

/// Result of one capture, including how many listen attempts it took.
#[derive(Debug, Clone)]
pub struct CaptureOutcome {
    pub text: String,
    pub attempts: u32,
}

/// Capture one utterance under the given policy.
///
/// Recognition misses re-prompt and listen again; a service outage is
/// announced and degrades to an empty response, which downstream strategies
/// treat as "no input". An empty response is never an error.
pub async fn capture_with_policy(
    speech: &dyn Speech,
    policy: &CapturePolicy,
) -> Result<CaptureOutcome, FormError> {
    let mut attempts: u32 = 0;
    loop {
        attempts += 1;
        match speech.listen(policy.timeout).await {
            Ok(text) => {
                debug!(attempts, "captured: {:?}", text);
                return Ok(CaptureOutcome { text, attempts });
            }
            Err(SpeechError::Unrecognized) => {
                if let Some(max) = policy.max_retries {
                    if attempts > max {
                        warn!(attempts, "giving up after repeated recognition misses");
                        return Ok(CaptureOutcome {
                            text: String::new(),
                            attempts,
                        });
                    }
                }
                speech
                    .speak("Sorry, I didn't catch that. Please repeat.")
                    .await?;
            }
            Err(SpeechError::ServiceUnavailable(reason)) => {
                warn!(%reason, "speech service unavailable");
                speech
                    .speak("Speech service unavailable. Continuing without input.")
                    .await?;
                return Ok(CaptureOutcome {
                    text: String::new(),
                    attempts,
                });
            }
            Err(e) => return Err(e.into()),
        }
    }
}

/// Capture and return just the text.
pub async fn capture(speech: &dyn Speech, policy: &CapturePolicy) -> Result<String, FormError> {
    Ok(capture_with_policy(speech, policy).await?.text)
}

#[cfg(test)]
#[path = "capture_tests.rs"]
mod tests;

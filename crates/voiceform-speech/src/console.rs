//! Terminal-backed speech backend.

use std::time::Duration;

use async_trait::async_trait;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::debug;

use voiceform_protocols::{Speech, SpeechError};

/// Speaks by printing and listens by reading one stdin line.
///
/// A listen that exceeds its timeout resolves to an empty utterance, the
/// same way a silent microphone would.
#[derive(Debug, Default)]
pub struct ConsoleSpeech;

impl ConsoleSpeech {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl Speech for ConsoleSpeech {
    async fn speak(&self, text: &str) -> Result<(), SpeechError> {
        println!("[voiceform] {}", text);
        Ok(())
    }

    async fn listen(&self, timeout: Duration) -> Result<String, SpeechError> {
        let mut line = String::new();
        let mut reader = BufReader::new(tokio::io::stdin());

        match tokio::time::timeout(timeout, reader.read_line(&mut line)).await {
            Ok(Ok(_)) => Ok(line.trim().to_string()),
            Ok(Err(e)) => Err(SpeechError::Backend(e.to_string())),
            Err(_) => {
                debug!("listen timed out after {:?}", timeout);
                Ok(String::new())
            }
        }
    }
}

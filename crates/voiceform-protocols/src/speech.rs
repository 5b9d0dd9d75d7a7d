//! Speech synthesis and recognition collaborator trait.

use std::time::Duration;

use async_trait::async_trait;

use crate::error::SpeechError;

/// Speech engine seam.
///
/// Both operations block the single logical actor: `speak` returns once the
/// audio has been played, `listen` once speech was captured or the timeout
/// elapsed. A timeout with no recognized text is an empty `Ok` response, not
/// an error; recognition misses and service outages are distinct
/// [`SpeechError`] variants so callers can re-prompt or degrade.
#[async_trait]
pub trait Speech: Send + Sync {
    /// Synthesize and play the given text.
    async fn speak(&self, text: &str) -> Result<(), SpeechError>;

    /// Capture one utterance, waiting at most `timeout`.
    async fn listen(&self, timeout: Duration) -> Result<String, SpeechError>;
}

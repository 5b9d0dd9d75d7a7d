//! Per-form session loop and timing/retry knobs.

use std::path::PathBuf;
use std::time::Duration;

use tracing::info;

use voiceform_protocols::{FormError, OperatorGate, Page, Speech};

use crate::capture::CapturePolicy;
use crate::extract::extract_fields;
use crate::policy::process_field;

/// Timing and retry configuration for one form-fill session.
#[derive(Debug, Clone)]
pub struct SessionConfig {
    /// Capture timeout for name fields.
    pub name_timeout: Duration,
    /// Capture timeout for ordinary text fields.
    pub standard_timeout: Duration,
    /// Capture timeout for textareas (longer-form answers).
    pub textarea_timeout: Duration,
    /// Capture timeout for yes/no and choice prompts.
    pub confirm_timeout: Duration,
    /// Re-prompt cap on recognition misses. `None` = unbounded.
    pub max_capture_retries: Option<u32>,
    /// Pause between fields.
    pub field_pause: Duration,
    /// Pause after clicking an upload trigger, waiting for a menu to render.
    pub menu_pause: Duration,
    /// Pause after clicking an upload-option menu entry.
    pub post_click_pause: Duration,
    /// Filesystem search roots. `None` = the default user directories.
    pub search_roots: Option<Vec<PathBuf>>,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            name_timeout: Duration::from_secs(8),
            standard_timeout: Duration::from_secs(10),
            textarea_timeout: Duration::from_secs(15),
            confirm_timeout: Duration::from_secs(8),
            max_capture_retries: None,
            field_pause: Duration::from_secs(1),
            menu_pause: Duration::from_secs(1),
            post_click_pause: Duration::from_secs(2),
            search_roots: None,
        }
    }
}

impl SessionConfig {
    /// All pauses zeroed; used by tests.
    pub fn immediate() -> Self {
        Self {
            field_pause: Duration::ZERO,
            menu_pause: Duration::ZERO,
            post_click_pause: Duration::ZERO,
            ..Self::default()
        }
    }

    pub(crate) fn policy(&self, timeout: Duration) -> CapturePolicy {
        CapturePolicy {
            timeout,
            max_retries: self.max_capture_retries,
        }
    }

    pub(crate) fn confirm_policy(&self) -> CapturePolicy {
        self.policy(self.confirm_timeout)
    }
}

/// Fill one form: extract fields, then process each in document order.
///
/// All interaction state lives for the duration of this call; the
/// descriptors it builds are discarded on return.
pub async fn run_session(
    page: &dyn Page,
    speech: &dyn Speech,
    gate: &dyn OperatorGate,
    config: &SessionConfig,
) -> Result<(), FormError> {
    speech.speak("Analyzing form fields.").await?;
    let fields = extract_fields(page).await?;

    if fields.is_empty() {
        speech.speak("No form fields found on this page.").await?;
        return Ok(());
    }

    info!(count = fields.len(), "starting form fill");
    speech
        .speak(&format!(
            "Found {} form fields. Starting voice form filling.",
            fields.len()
        ))
        .await?;

    for field in &fields {
        speech.speak(&format!("Processing {}", field.label)).await?;
        process_field(page, speech, gate, field, config).await?;
        tokio::time::sleep(config.field_pause).await;
    }

    speech.speak("Form filling completed.").await?;
    Ok(())
}

#[cfg(test)]
#[path = "session_tests.rs"]
mod tests;

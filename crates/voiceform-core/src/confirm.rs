//! The shared ask → read-back → yes/no → commit loop.

use tracing::{debug, warn};

use voiceform_protocols::{FieldDescriptor, FormError, Page, Speech};

use crate::capture::{capture, CapturePolicy};
use crate::render::ReadbackMode;

/// A response confirms iff it contains "yes", case-insensitive.
pub fn is_affirmative(text: &str) -> bool {
    text.to_lowercase().contains("yes")
}

/// Read a captured value back and ask for confirmation.
pub async fn confirm_entry(
    speech: &dyn Speech,
    confirm_policy: &CapturePolicy,
    label: &str,
    value: &str,
    mode: ReadbackMode,
) -> Result<bool, FormError> {
    speech
        .speak(&format!("You entered for {}:", label))
        .await?;
    speech.speak(&mode.render(value)).await?;
    speech
        .speak("Do you want to confirm? Say Yes or No.")
        .await?;
    let response = capture(speech, confirm_policy).await?;
    Ok(is_affirmative(&response))
}

/// Full confirmation protocol for text-like fields: prompt, capture, read
/// back, confirm, commit. Loops back to the prompt on rejection with no
/// iteration cap. A commit failure is announced and the field skipped.
pub async fn fill_with_confirmation(
    page: &dyn Page,
    speech: &dyn Speech,
    field: &FieldDescriptor,
    prompt: &str,
    mode: ReadbackMode,
    capture_policy: &CapturePolicy,
    confirm_policy: &CapturePolicy,
) -> Result<(), FormError> {
    loop {
        speech.speak(prompt).await?;
        let response = capture(speech, capture_policy).await?;

        if confirm_entry(speech, confirm_policy, &field.label, &response, mode).await? {
            match page.fill(&field.handle, &response).await {
                Ok(()) => debug!(label = %field.label, "field committed"),
                Err(e) => {
                    warn!(label = %field.label, error = %e, "commit failed");
                    speech
                        .speak(&format!("Could not fill {}. Skipping.", field.label))
                        .await?;
                }
            }
            return Ok(());
        }

        speech.speak("Let's try again.").await?;
    }
}

#[cfg(test)]
#[path = "confirm_tests.rs"]
mod tests;

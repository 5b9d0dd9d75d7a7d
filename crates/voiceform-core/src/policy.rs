//! Interaction policy dispatch: one strategy per (structural, purpose).

use tracing::{debug, warn};

use voiceform_protocols::{
    FieldDescriptor, FormError, OperatorGate, Page, Purpose, Speech, StructuralType,
};

use crate::capture::capture;
use crate::confirm::{fill_with_confirmation, is_affirmative};
use crate::render::ReadbackMode;
use crate::session::SessionConfig;
use crate::upload::resolve_file_upload;

/// Process one field: guard accessibility, then dispatch to its strategy.
pub async fn process_field(
    page: &dyn Page,
    speech: &dyn Speech,
    gate: &dyn OperatorGate,
    field: &FieldDescriptor,
    config: &SessionConfig,
) -> Result<(), FormError> {
    let accessible = page.is_visible(&field.handle).await.unwrap_or(false)
        && page.is_enabled(&field.handle).await.unwrap_or(false);
    if !accessible {
        speech
            .speak(&format!("Skipping {} - field not accessible", field.label))
            .await?;
        return Ok(());
    }

    match field.structural {
        StructuralType::Text => match field.purpose {
            Purpose::FirstName | Purpose::LastName => {
                text_strategy(page, speech, field, ReadbackMode::Letters, config, true).await
            }
            Purpose::Phone | Purpose::Zip => {
                text_strategy(page, speech, field, ReadbackMode::Digits, config, false).await
            }
            Purpose::FileUpload => resolve_file_upload(page, speech, gate, field, config).await,
            // Email, AgeDate and everything else: verbatim read-back.
            _ => text_strategy(page, speech, field, ReadbackMode::Verbatim, config, false).await,
        },
        StructuralType::Dropdown => dropdown_strategy(page, speech, field, config).await,
        StructuralType::Checkbox => checkbox_strategy(page, speech, field, config).await,
        StructuralType::Textarea => textarea_strategy(page, speech, field, config).await,
        // Radio, Email and Tel structural kinds have no dispatch row; only
        // an explicit file-upload purpose gives them a strategy.
        _ => {
            if field.purpose == Purpose::FileUpload {
                resolve_file_upload(page, speech, gate, field, config).await
            } else {
                debug!(label = %field.label, structural = ?field.structural, "no strategy, passing over");
                Ok(())
            }
        }
    }
}

async fn text_strategy(
    page: &dyn Page,
    speech: &dyn Speech,
    field: &FieldDescriptor,
    mode: ReadbackMode,
    config: &SessionConfig,
    name_timeout: bool,
) -> Result<(), FormError> {
    let timeout = if name_timeout {
        config.name_timeout
    } else {
        config.standard_timeout
    };
    fill_with_confirmation(
        page,
        speech,
        field,
        &format!("Please say your {}", field.label),
        mode,
        &config.policy(timeout),
        &config.confirm_policy(),
    )
    .await
}

async fn textarea_strategy(
    page: &dyn Page,
    speech: &dyn Speech,
    field: &FieldDescriptor,
    config: &SessionConfig,
) -> Result<(), FormError> {
    fill_with_confirmation(
        page,
        speech,
        field,
        &format!("Please provide your {}", field.label),
        ReadbackMode::Verbatim,
        &config.policy(config.textarea_timeout),
        &config.confirm_policy(),
    )
    .await
}

/// Enumerate options aloud and select the first whose text contains the
/// spoken choice. The containment direction matters: the spoken text must
/// appear within the option text. No confirmation step.
async fn dropdown_strategy(
    page: &dyn Page,
    speech: &dyn Speech,
    field: &FieldDescriptor,
    config: &SessionConfig,
) -> Result<(), FormError> {
    speech
        .speak(&format!("Available options for {} are:", field.label))
        .await?;
    for option in &field.options {
        speech.speak(&option.text).await?;
    }
    speech.speak("Please say your choice.").await?;

    let choice = capture(speech, &config.confirm_policy()).await?;
    let choice = choice.trim().to_lowercase();

    // An empty choice would be a substring of every option; treat it as
    // no match instead of silently picking the first one.
    if !choice.is_empty() {
        if let Some(option) = field
            .options
            .iter()
            .find(|o| o.text.to_lowercase().contains(&choice))
        {
            match page.select_option(&field.handle, &option.value).await {
                Ok(()) => {
                    speech
                        .speak(&format!("{} selected for {}", option.text, field.label))
                        .await?;
                }
                Err(e) => {
                    warn!(label = %field.label, error = %e, "select failed");
                    speech
                        .speak(&format!("Could not select {}. Skipping.", option.text))
                        .await?;
                }
            }
            return Ok(());
        }
    }

    speech.speak("Option not found. Skipping.").await?;
    Ok(())
}

/// Ask yes/no and check the control iff the response contains "yes" or
/// "check". No confirmation step.
async fn checkbox_strategy(
    page: &dyn Page,
    speech: &dyn Speech,
    field: &FieldDescriptor,
    config: &SessionConfig,
) -> Result<(), FormError> {
    speech
        .speak(&format!(
            "This is a checkbox for: {}. Do you want to check it?",
            field.label
        ))
        .await?;

    let response = capture(speech, &config.confirm_policy()).await?.to_lowercase();
    if is_affirmative(&response) || response.contains("check") {
        match page.check(&field.handle).await {
            Ok(()) => {
                speech
                    .speak(&format!("Checkbox for {} has been checked.", field.label))
                    .await?;
            }
            Err(e) => {
                warn!(label = %field.label, error = %e, "check failed");
                speech
                    .speak(&format!("Could not check {}. Skipping.", field.label))
                    .await?;
            }
        }
    } else {
        speech
            .speak(&format!("Checkbox for {} left unchecked.", field.label))
            .await?;
    }
    Ok(())
}

#[cfg(test)]
#[path = "policy_tests.rs"]
mod tests;

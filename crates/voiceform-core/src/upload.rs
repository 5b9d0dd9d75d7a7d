//! File upload resolution: the most involved strategy.
//!
//! Some pages wire a bare `<input type="file">`, others hide it behind a
//! custom "upload from …" menu. The resolver clicks the trigger, probes
//! for a live file input, walks the user through any menu it finds, asks
//! for a filename, searches the local filesystem, and commits the chosen
//! file to whichever file-accepting control actually works.

use std::path::{Path, PathBuf};

use tracing::{debug, warn};

use voiceform_protocols::{
    ControlHandle, FieldDescriptor, FormError, OperatorGate, Page, PageError, Speech,
};

use crate::capture::capture;
use crate::confirm::is_affirmative;
use crate::fs_search::{default_search_roots, search_files};
use crate::ordinal::parse_ordinal;
use crate::session::SessionConfig;

/// Terms that make an element a plausible upload trigger at all.
const TRIGGER_TERMS: &[&str] = &["upload", "choose", "browse", "select"];
/// Terms that tie the trigger to a file source.
const SOURCE_TERMS: &[&str] = &["computer", "device", "pc", "local", "file", "system"];
/// Terms that point at the local machine; these get priority 1.
const LOCAL_TERMS: &[&str] = &["computer", "device", "pc", "local", "browse"];

/// A clickable on-page upload option.
#[derive(Debug, Clone)]
pub(crate) struct UploadOption {
    pub handle: ControlHandle,
    pub text: String,
    pub priority: u8,
}

/// Run the upload procedure for one field.
///
/// Any unexpected page failure is caught here, announced, and resolved by
/// waiting for the operator; the session always continues to the next field.
pub async fn resolve_file_upload(
    page: &dyn Page,
    speech: &dyn Speech,
    gate: &dyn OperatorGate,
    field: &FieldDescriptor,
    config: &SessionConfig,
) -> Result<(), FormError> {
    match run_upload(page, speech, gate, field, config).await {
        Ok(()) => Ok(()),
        Err(FormError::Page(e)) => {
            warn!(label = %field.label, error = %e, "upload procedure failed");
            speech
                .speak(&format!("Error with file upload: {}", e))
                .await?;
            speech
                .speak("Please handle the file upload manually, then continue.")
                .await?;
            gate.wait().await;
            Ok(())
        }
        Err(e) => Err(e),
    }
}

async fn run_upload(
    page: &dyn Page,
    speech: &dyn Speech,
    gate: &dyn OperatorGate,
    field: &FieldDescriptor,
    config: &SessionConfig,
) -> Result<(), FormError> {
    speech
        .speak(&format!("This is a file upload field for: {}", field.label))
        .await?;
    speech.speak("Clicking the upload control.").await?;
    page.click(&field.handle).await?;
    tokio::time::sleep(config.menu_pause).await;

    // Probe for a live file input: a no-op set-files succeeds only when the
    // control itself accepts files.
    if page.set_files(&field.handle, &[]).await.is_ok() {
        speech
            .speak("File chooser is ready. Please tell me the name of the file you want to upload.")
            .await?;
    } else {
        speech.speak("Looking for upload options.").await?;
        tokio::time::sleep(config.menu_pause).await;
        offer_upload_options(page, speech, config).await?;
        speech
            .speak("Please tell me the name of the file you want to upload.")
            .await?;
    }

    loop {
        let filename = capture(speech, &config.policy(config.standard_timeout)).await?;
        let filename = filename.trim().to_string();
        if filename.is_empty() {
            speech
                .speak("No filename provided. Skipping this field.")
                .await?;
            return Ok(());
        }

        speech
            .speak(&format!("Searching for file: {}", filename))
            .await?;
        let roots = config
            .search_roots
            .clone()
            .unwrap_or_else(default_search_roots);
        let matches = search_files(&roots, &filename);

        if matches.is_empty() {
            speech
                .speak(&format!(
                    "No files found named {}. Would you like to try a different name?",
                    filename
                ))
                .await?;
            if is_affirmative(&capture(speech, &config.confirm_policy()).await?) {
                continue;
            }
            speech.speak("Skipping file upload.").await?;
            return Ok(());
        }

        let Some(selected) = pick_match(speech, &matches, config).await? else {
            return Ok(());
        };

        speech
            .speak(&format!("Selected file: {}", basename(&selected)))
            .await?;
        speech
            .speak("Do you want to upload this file? Say Yes or No.")
            .await?;

        if is_affirmative(&capture(speech, &config.confirm_policy()).await?) {
            match commit_file(page, &field.handle, &selected).await {
                Ok(()) => {
                    speech
                        .speak(&format!(
                            "File {} uploaded successfully.",
                            basename(&selected)
                        ))
                        .await?;
                }
                Err(e) => {
                    warn!(error = %e, "all file-accepting controls rejected the file");
                    speech
                        .speak(&format!("Error uploading file: {}", e))
                        .await?;
                    speech
                        .speak(
                            "The file chooser should be open. Please select the file \
                             manually and I will continue with the next field.",
                        )
                        .await?;
                    gate.wait().await;
                }
            }
            return Ok(());
        }

        speech
            .speak("Would you like to try a different file?")
            .await?;
        if !is_affirmative(&capture(speech, &config.confirm_policy()).await?) {
            return Ok(());
        }
    }
}

/// Present custom upload-menu options and click the chosen one. An invalid
/// or absent choice is announced and the procedure continues anyway.
async fn offer_upload_options(
    page: &dyn Page,
    speech: &dyn Speech,
    config: &SessionConfig,
) -> Result<(), FormError> {
    let options = collect_upload_options(page).await?;
    if options.is_empty() {
        speech
            .speak("No specific upload options found. Proceeding with file selection.")
            .await?;
        return Ok(());
    }

    let presented = options.len().min(3);
    speech
        .speak("I found upload options. Available choices are:")
        .await?;
    for (i, option) in options.iter().take(presented).enumerate() {
        speech
            .speak(&format!("Option {}: {}", i + 1, option.text))
            .await?;
    }
    speech
        .speak("Please say the number of your choice, or say first for option one.")
        .await?;

    let choice = capture(speech, &config.confirm_policy()).await?;
    match parse_ordinal(&choice) {
        Some(n) if (1..=presented).contains(&n) => {
            let option = &options[n - 1];
            speech
                .speak(&format!("Selecting: {}", option.text))
                .await?;
            page.click(&option.handle).await?;
            tokio::time::sleep(config.post_click_pause).await;
        }
        _ => {
            speech
                .speak("Invalid choice. Trying the default file upload.")
                .await?;
        }
    }
    Ok(())
}

/// Scan clickable elements for plausible upload triggers, priority-sorted.
async fn collect_upload_options(page: &dyn Page) -> Result<Vec<UploadOption>, FormError> {
    let mut options = Vec::new();
    for handle in page.query_all("button, div, span, a").await? {
        if !page.is_visible(&handle).await.unwrap_or(false) {
            continue;
        }
        let text = match page.inner_text(&handle).await {
            Ok(t) => t.trim().to_lowercase(),
            Err(_) => continue,
        };
        if let Some(priority) = classify_upload_option(&text) {
            options.push(UploadOption {
                handle,
                text,
                priority,
            });
        }
    }
    // Stable: ties keep discovery order.
    options.sort_by_key(|o| o.priority);
    debug!(count = options.len(), "upload options collected");
    Ok(options)
}

/// Priority of an upload-option text, `None` when it is not one.
pub(crate) fn classify_upload_option(text: &str) -> Option<u8> {
    // Long text blocks are prose, not menu entries.
    if text.is_empty() || text.chars().count() >= 100 {
        return None;
    }
    let has = |terms: &[&str]| terms.iter().any(|t| text.contains(t));
    if !has(TRIGGER_TERMS) || !has(SOURCE_TERMS) {
        return None;
    }
    Some(if has(LOCAL_TERMS) { 1 } else { 2 })
}

/// Let the user pick among multiple matches. `None` means the field was
/// abandoned (announced here).
async fn pick_match(
    speech: &dyn Speech,
    matches: &[PathBuf],
    config: &SessionConfig,
) -> Result<Option<PathBuf>, FormError> {
    if matches.len() == 1 {
        speech
            .speak(&format!("Found file: {}", basename(&matches[0])))
            .await?;
        return Ok(Some(matches[0].clone()));
    }

    speech
        .speak(&format!(
            "Found {} files. Here are the options:",
            matches.len()
        ))
        .await?;
    for (i, path) in matches.iter().enumerate() {
        speech
            .speak(&format!("Option {}: {}", i + 1, basename(path)))
            .await?;
    }
    speech
        .speak("Please say the number of the file you want to upload, or say first for option one.")
        .await?;

    let choice = capture(speech, &config.confirm_policy()).await?;
    match parse_ordinal(&choice) {
        Some(n) if (1..=matches.len()).contains(&n) => Ok(Some(matches[n - 1].clone())),
        _ => {
            speech.speak("Invalid choice. Skipping file upload.").await?;
            Ok(None)
        }
    }
}

/// Set the file on the target control, falling back to any visible
/// file-accepting control on the page.
async fn commit_file(
    page: &dyn Page,
    target: &ControlHandle,
    path: &Path,
) -> Result<(), PageError> {
    let primary = page.set_files(target, &[path]).await;
    let Err(primary_err) = primary else {
        return Ok(());
    };
    debug!(error = %primary_err, "primary control rejected file, scanning fallbacks");

    for handle in page.query_all("input[type='file']").await? {
        if handle == *target || !page.is_visible(&handle).await.unwrap_or(false) {
            continue;
        }
        if page.set_files(&handle, &[path]).await.is_ok() {
            return Ok(());
        }
    }
    Err(primary_err)
}

fn basename(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_else(|| path.display().to_string())
}

#[cfg(test)]
#[path = "upload_tests.rs"]
mod tests;

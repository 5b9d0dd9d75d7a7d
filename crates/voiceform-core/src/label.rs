//! Label resolution for form controls.

use voiceform_protocols::{ControlHandle, Page, PageError};

/// Resolve the human-readable label of a control.
///
/// Fixed fallback chain, first non-empty trimmed candidate wins:
/// `<label for=id>` → ancestor `<label>` → `placeholder` → `name`
/// (underscores/hyphens to spaces, title-cased) → nearby text → the
/// literal "Unknown Field". Total: always returns a non-empty string.
pub async fn resolve_label(page: &dyn Page, handle: &ControlHandle) -> Result<String, PageError> {
    if let Some(id) = page.attribute(handle, "id").await? {
        if !id.trim().is_empty() {
            if let Some(label_el) = page.query(&format!("label[for='{}']", id)).await? {
                let text = page.inner_text(&label_el).await?;
                if !text.trim().is_empty() {
                    return Ok(text.trim().to_string());
                }
            }
        }
    }

    if let Some(text) = page.ancestor_label_text(handle).await? {
        if !text.trim().is_empty() {
            return Ok(text.trim().to_string());
        }
    }

    if let Some(placeholder) = page.attribute(handle, "placeholder").await? {
        if !placeholder.trim().is_empty() {
            return Ok(placeholder.trim().to_string());
        }
    }

    if let Some(name) = page.attribute(handle, "name").await? {
        if !name.trim().is_empty() {
            let spaced = name.replace(['_', '-'], " ");
            return Ok(title_case(spaced.trim()));
        }
    }

    if let Some(text) = page.adjacent_text(handle).await? {
        if !text.trim().is_empty() {
            return Ok(text.trim().to_string());
        }
    }

    Ok("Unknown Field".to_string())
}

/// Title-case each whitespace-separated word ("user_name" already spaced
/// to "user name" becomes "User Name").
fn title_case(text: &str) -> String {
    text.split_whitespace()
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => {
                    first.to_uppercase().collect::<String>() + &chars.as_str().to_lowercase()
                }
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
#[path = "label_tests.rs"]
mod tests;

//! Field extraction: scan a page for form controls and normalize them.

use tracing::debug;

use voiceform_protocols::{
    FieldDescriptor, FormError, Page, SelectOption, StructuralType,
};

use crate::label::resolve_label;
use crate::purpose::classify_purpose;

/// Input types that are never materialized into descriptors.
const SKIPPED_TYPES: &[&str] = &["hidden", "submit", "button", "reset"];

/// Dropdown placeholder texts excluded from the option list.
const OPTION_STOPLIST: &[&str] = &["select", "choose", "pick"];

/// Scan the page for form controls and build descriptors in document order.
///
/// Side-effect free: nothing on the page is mutated. Descriptors borrow
/// their handles from the page and are invalidated by navigation.
pub async fn extract_fields(page: &dyn Page) -> Result<Vec<FieldDescriptor>, FormError> {
    let mut fields = Vec::new();

    for handle in page.query_all("input, select, textarea").await? {
        let tag = page.tag_name(&handle).await?;
        let input_type = page
            .attribute(&handle, "type")
            .await?
            .unwrap_or_else(|| "text".to_string())
            .to_lowercase();

        if SKIPPED_TYPES.contains(&input_type.as_str()) {
            continue;
        }

        let label = resolve_label(page, &handle).await?;
        if label.is_empty() {
            // The resolver is total, so this guard never fires in practice.
            continue;
        }

        let structural = StructuralType::from_control(&tag, &input_type);

        let options = if structural == StructuralType::Dropdown {
            let options = usable_options(page.option_items(&handle).await?);
            if options.is_empty() {
                debug!(%label, "dropdown has no usable options, skipping");
                continue;
            }
            options
        } else {
            Vec::new()
        };

        let required = page.attribute(&handle, "required").await?.is_some();
        let name = page.attribute(&handle, "name").await?.unwrap_or_default();
        let id = page.attribute(&handle, "id").await?.unwrap_or_default();
        let purpose = classify_purpose(&label, &name, &id, &input_type);

        debug!(%label, ?structural, ?purpose, required, "detected field");
        fields.push(FieldDescriptor {
            label,
            structural,
            purpose,
            required,
            options,
            handle,
        });
    }

    Ok(fields)
}

/// Drop placeholder and empty options.
fn usable_options(items: Vec<(String, String)>) -> Vec<SelectOption> {
    items
        .into_iter()
        .filter_map(|(text, value)| {
            let text = text.trim().to_string();
            if text.is_empty() || OPTION_STOPLIST.contains(&text.to_lowercase().as_str()) {
                None
            } else {
                Some(SelectOption { text, value })
            }
        })
        .collect()
}

#[cfg(test)]
#[path = "extract_tests.rs"]
mod tests;

//! Normalized form-field descriptors.

use serde::{Deserialize, Serialize};

use crate::page::ControlHandle;

/// UI category of a control, independent of its semantic purpose.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StructuralType {
    Text,
    Dropdown,
    Checkbox,
    Radio,
    Textarea,
    Email,
    Tel,
}

impl StructuralType {
    /// Map a tag name and input type onto a structural type.
    ///
    /// `input_type` is the `type` attribute, already defaulted to "text"
    /// when absent.
    pub fn from_control(tag: &str, input_type: &str) -> Self {
        match tag {
            "select" => StructuralType::Dropdown,
            "textarea" => StructuralType::Textarea,
            _ => match input_type {
                "checkbox" => StructuralType::Checkbox,
                "radio" => StructuralType::Radio,
                "email" => StructuralType::Email,
                "tel" | "phone" => StructuralType::Tel,
                _ => StructuralType::Text,
            },
        }
    }
}

/// Inferred semantic role of a field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Purpose {
    FirstName,
    LastName,
    Email,
    Phone,
    Address,
    City,
    State,
    Zip,
    Country,
    AgeDate,
    Gender,
    Company,
    Message,
    FileUpload,
    Other,
}

/// One `<option>` of a dropdown control.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectOption {
    pub text: String,
    pub value: String,
}

/// Normalized record describing one detected form control.
///
/// The `handle` is borrowed from the page: descriptors are only valid for
/// the form-fill session that produced them and must be discarded once the
/// page navigates or the session ends.
#[derive(Debug, Clone)]
pub struct FieldDescriptor {
    /// Resolved display name. Never empty ("Unknown Field" at worst).
    pub label: String,
    /// UI category derived from tag and input type.
    pub structural: StructuralType,
    /// Semantic role derived from label/name/id/type.
    pub purpose: Purpose,
    /// Whether the control carries a `required` attribute.
    pub required: bool,
    /// Dropdown options; non-empty iff `structural` is `Dropdown`.
    pub options: Vec<SelectOption>,
    /// Locator for the live control on the page.
    pub handle: ControlHandle,
}

#[cfg(test)]
#[path = "field_tests.rs"]
mod tests;

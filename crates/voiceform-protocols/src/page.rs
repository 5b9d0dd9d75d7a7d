//! Browser page collaborator trait.

use std::path::Path;

use async_trait::async_trait;

use crate::error::PageError;

/// Opaque locator for a live control on a page.
///
/// The CDP backend stores a Runtime remote object id; test doubles store a
/// scripted index. Handles are only valid until the page navigates or the
/// session that produced them ends.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ControlHandle(String);

impl ControlHandle {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn id(&self) -> &str {
        &self.0
    }
}

/// Narrow interface onto the browser-automation engine.
///
/// The interaction engine only ever enumerates matching elements, reads
/// attributes/text, probes visibility, and commits values. Everything else
/// the underlying engine can do stays behind this seam.
#[async_trait]
pub trait Page: Send + Sync {
    /// All elements matching a CSS selector, in document order.
    async fn query_all(&self, selector: &str) -> Result<Vec<ControlHandle>, PageError>;

    /// First element matching a CSS selector, if any.
    async fn query(&self, selector: &str) -> Result<Option<ControlHandle>, PageError>;

    /// Lower-cased tag name of the element.
    async fn tag_name(&self, handle: &ControlHandle) -> Result<String, PageError>;

    /// Attribute value, `None` when absent.
    async fn attribute(
        &self,
        handle: &ControlHandle,
        name: &str,
    ) -> Result<Option<String>, PageError>;

    /// Rendered inner text of the element.
    async fn inner_text(&self, handle: &ControlHandle) -> Result<String, PageError>;

    /// Inner text of the closest ancestor `<label>`, if one exists.
    async fn ancestor_label_text(
        &self,
        handle: &ControlHandle,
    ) -> Result<Option<String>, PageError>;

    /// Nearby-text heuristic: the preceding sibling's text if non-empty,
    /// else the parent's text with the control's own value subtracted.
    async fn adjacent_text(&self, handle: &ControlHandle) -> Result<Option<String>, PageError>;

    /// `(text, value)` pairs of the `<option>` children of a `<select>`.
    async fn option_items(
        &self,
        handle: &ControlHandle,
    ) -> Result<Vec<(String, String)>, PageError>;

    async fn is_visible(&self, handle: &ControlHandle) -> Result<bool, PageError>;

    async fn is_enabled(&self, handle: &ControlHandle) -> Result<bool, PageError>;

    /// Commit a text value into an input or textarea.
    async fn fill(&self, handle: &ControlHandle, value: &str) -> Result<(), PageError>;

    /// Check a checkbox.
    async fn check(&self, handle: &ControlHandle) -> Result<(), PageError>;

    /// Select the dropdown option with the given value.
    async fn select_option(&self, handle: &ControlHandle, value: &str) -> Result<(), PageError>;

    /// Set the files of a file input. An empty list doubles as a probe for
    /// whether the control accepts file input at all.
    async fn set_files(&self, handle: &ControlHandle, paths: &[&Path]) -> Result<(), PageError>;

    async fn click(&self, handle: &ControlHandle) -> Result<(), PageError>;

    /// Navigate the page, invalidating all outstanding handles.
    async fn navigate(&self, url: &str) -> Result<(), PageError>;
}

//! [`Page`] implementation over a CDP target session.
//!
//! Element handles are Runtime remote-object ids: `query_all` materializes a
//! `NodeList` without serializing it, then walks its indexed properties to
//! get one object id per element. All reads and commits run as
//! `Runtime.callFunctionOn` against those ids, so they survive DOM mutations
//! that would invalidate node ids.

use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;
use std::sync::atomic::AtomicU64;

use async_trait::async_trait;
use parking_lot::Mutex;
use serde_json::{Value, json};
use tracing::debug;

use voiceform_protocols::{ControlHandle, Page, PageError};

use crate::client::{CdpClient, PendingRequest, WsSink};
use crate::error::CdpError;
use crate::protocol::{PropertyDescriptor, RemoteObject};

/// A session attached to a single page/target.
pub struct CdpPage {
    /// Target ID.
    target_id: String,
    /// Session ID for this target.
    session_id: String,
    /// WebSocket sender (shared with client).
    ws_tx: Arc<tokio::sync::Mutex<WsSink>>,
    /// Pending requests (shared with client).
    pending: Arc<Mutex<HashMap<u64, PendingRequest>>>,
    /// Request ID counter (shared with client).
    request_id: Arc<AtomicU64>,
}

impl CdpPage {
    pub(crate) fn new(
        target_id: String,
        session_id: String,
        ws_tx: Arc<tokio::sync::Mutex<WsSink>>,
        pending: Arc<Mutex<HashMap<u64, PendingRequest>>>,
        request_id: Arc<AtomicU64>,
    ) -> Self {
        Self {
            target_id,
            session_id,
            ws_tx,
            pending,
            request_id,
        }
    }

    /// Get target ID.
    pub fn target_id(&self) -> &str {
        &self.target_id
    }

    /// Send a CDP command to this page session.
    pub async fn call(&self, method: &str, params: Option<Value>) -> Result<Value, CdpError> {
        CdpClient::dispatch(
            &self.ws_tx,
            &self.pending,
            &self.request_id,
            method,
            params,
            Some(&self.session_id),
        )
        .await
    }

    /// Enable required CDP domains.
    pub(crate) async fn enable_domains(&self) -> Result<(), CdpError> {
        self.call("Page.enable", None).await?;
        self.call("DOM.enable", None).await?;
        self.call("Runtime.enable", None).await?;
        debug!("Enabled CDP domains for session {}", self.session_id);
        Ok(())
    }

    /// Evaluate a JavaScript expression, returning its value.
    pub async fn evaluate(&self, expression: &str) -> Result<Value, CdpError> {
        let result = self
            .call(
                "Runtime.evaluate",
                Some(json!({
                    "expression": expression,
                    "returnByValue": true,
                    "awaitPromise": true,
                })),
            )
            .await?;

        if let Some(exception) = result.get("exceptionDetails") {
            let text = exception["text"].as_str().unwrap_or("Unknown error");
            return Err(CdpError::JavaScript(text.to_string()));
        }

        Ok(result["result"]["value"].clone())
    }

    /// Evaluate a JavaScript expression, returning a remote object.
    async fn evaluate_handle(&self, expression: &str) -> Result<RemoteObject, CdpError> {
        let result = self
            .call(
                "Runtime.evaluate",
                Some(json!({
                    "expression": expression,
                    "returnByValue": false,
                })),
            )
            .await?;

        if let Some(exception) = result.get("exceptionDetails") {
            let text = exception["text"].as_str().unwrap_or("Unknown error");
            return Err(CdpError::JavaScript(text.to_string()));
        }

        let remote_obj: RemoteObject = serde_json::from_value(result["result"].clone())?;
        Ok(remote_obj)
    }

    /// Call a function with the element behind `handle` as `this`.
    async fn call_on(
        &self,
        handle: &ControlHandle,
        function: &str,
        args: Vec<Value>,
    ) -> Result<Value, CdpError> {
        let arguments: Vec<Value> = args.into_iter().map(|v| json!({"value": v})).collect();
        let result = self
            .call(
                "Runtime.callFunctionOn",
                Some(json!({
                    "objectId": handle.id(),
                    "functionDeclaration": function,
                    "arguments": arguments,
                    "returnByValue": true,
                    "awaitPromise": true,
                })),
            )
            .await?;

        if let Some(exception) = result.get("exceptionDetails") {
            let text = exception["text"].as_str().unwrap_or("Unknown error");
            return Err(CdpError::JavaScript(text.to_string()));
        }

        Ok(result["result"]["value"].clone())
    }

    /// Wait for the document to reach an interactive state.
    async fn wait_for_load(&self) -> Result<(), CdpError> {
        let start = std::time::Instant::now();
        let timeout = std::time::Duration::from_secs(30);

        loop {
            let result = self.evaluate("document.readyState").await?;

            if let Some(state) = result.as_str() {
                if state == "complete" || state == "interactive" {
                    return Ok(());
                }
            }

            if start.elapsed() > timeout {
                return Err(CdpError::Timeout("Page load timeout".to_string()));
            }

            tokio::time::sleep(std::time::Duration::from_millis(100)).await;
        }
    }
}

/// Quote a Rust string as a JavaScript string literal.
fn js_string(s: &str) -> String {
    // JSON string syntax is valid JavaScript.
    serde_json::to_string(s).unwrap_or_else(|_| "\"\"".to_string())
}

/// Object ids of the indexed properties of an array-like remote object,
/// in index order.
fn indexed_object_ids(props: Vec<PropertyDescriptor>) -> Vec<String> {
    let mut indexed: Vec<(usize, String)> = props
        .into_iter()
        .filter_map(|p| {
            let index: usize = p.name.parse().ok()?;
            let object_id = p.value?.object_id?;
            Some((index, object_id))
        })
        .collect();
    indexed.sort_by_key(|(index, _)| *index);
    indexed.into_iter().map(|(_, id)| id).collect()
}

#[async_trait]
impl Page for CdpPage {
    async fn query_all(&self, selector: &str) -> Result<Vec<ControlHandle>, PageError> {
        let list = self
            .evaluate_handle(&format!(
                "document.querySelectorAll({})",
                js_string(selector)
            ))
            .await?;
        let Some(list_id) = list.object_id else {
            return Ok(Vec::new());
        };

        let result = self
            .call(
                "Runtime.getProperties",
                Some(json!({
                    "objectId": list_id,
                    "ownProperties": true,
                })),
            )
            .await
            .map_err(PageError::from)?;

        let props: Vec<PropertyDescriptor> =
            serde_json::from_value(result["result"].clone()).map_err(CdpError::from)?;

        Ok(indexed_object_ids(props)
            .into_iter()
            .map(ControlHandle::new)
            .collect())
    }

    async fn query(&self, selector: &str) -> Result<Option<ControlHandle>, PageError> {
        let obj = self
            .evaluate_handle(&format!("document.querySelector({})", js_string(selector)))
            .await?;
        if obj.subtype.as_deref() == Some("null") {
            return Ok(None);
        }
        Ok(obj.object_id.map(ControlHandle::new))
    }

    async fn tag_name(&self, handle: &ControlHandle) -> Result<String, PageError> {
        let value = self
            .call_on(handle, "function() { return this.tagName.toLowerCase(); }", vec![])
            .await?;
        Ok(value.as_str().unwrap_or_default().to_string())
    }

    async fn attribute(
        &self,
        handle: &ControlHandle,
        name: &str,
    ) -> Result<Option<String>, PageError> {
        let value = self
            .call_on(
                handle,
                "function(name) { return this.getAttribute(name); }",
                vec![json!(name)],
            )
            .await?;
        Ok(value.as_str().map(|s| s.to_string()))
    }

    async fn inner_text(&self, handle: &ControlHandle) -> Result<String, PageError> {
        let value = self
            .call_on(
                handle,
                "function() { return this.innerText ?? this.textContent ?? ''; }",
                vec![],
            )
            .await?;
        Ok(value.as_str().unwrap_or_default().to_string())
    }

    async fn ancestor_label_text(
        &self,
        handle: &ControlHandle,
    ) -> Result<Option<String>, PageError> {
        let value = self
            .call_on(
                handle,
                "function() { \
                     const label = this.closest('label'); \
                     return label ? label.innerText : null; \
                 }",
                vec![],
            )
            .await?;
        Ok(value.as_str().map(|s| s.to_string()))
    }

    async fn adjacent_text(&self, handle: &ControlHandle) -> Result<Option<String>, PageError> {
        let value = self
            .call_on(
                handle,
                "function() { \
                     const sib = this.previousElementSibling; \
                     if (sib && sib.innerText && sib.innerText.trim()) { \
                         return sib.innerText.trim(); \
                     } \
                     const parent = this.parentElement; \
                     if (!parent) { return null; } \
                     const own = this.value || ''; \
                     let text = parent.innerText || ''; \
                     if (own) { text = text.replace(own, ''); } \
                     const trimmed = text.trim(); \
                     return trimmed ? trimmed : null; \
                 }",
                vec![],
            )
            .await?;
        Ok(value.as_str().map(|s| s.to_string()))
    }

    async fn option_items(
        &self,
        handle: &ControlHandle,
    ) -> Result<Vec<(String, String)>, PageError> {
        let value = self
            .call_on(
                handle,
                "function() { \
                     return Array.from(this.options || []).map(o => [o.text, o.value]); \
                 }",
                vec![],
            )
            .await?;
        let items: Vec<(String, String)> =
            serde_json::from_value(value).map_err(CdpError::from)?;
        Ok(items)
    }

    async fn is_visible(&self, handle: &ControlHandle) -> Result<bool, PageError> {
        let value = self
            .call_on(
                handle,
                "function() { \
                     const rect = this.getBoundingClientRect(); \
                     const style = window.getComputedStyle(this); \
                     return rect.width > 0 && rect.height > 0 \
                         && style.visibility !== 'hidden' \
                         && style.display !== 'none'; \
                 }",
                vec![],
            )
            .await?;
        Ok(value.as_bool().unwrap_or(false))
    }

    async fn is_enabled(&self, handle: &ControlHandle) -> Result<bool, PageError> {
        let value = self
            .call_on(handle, "function() { return !this.disabled; }", vec![])
            .await?;
        Ok(value.as_bool().unwrap_or(false))
    }

    async fn fill(&self, handle: &ControlHandle, value: &str) -> Result<(), PageError> {
        self.call_on(
            handle,
            "function(value) { \
                 this.focus(); \
                 this.value = value; \
                 this.dispatchEvent(new Event('input', { bubbles: true })); \
                 this.dispatchEvent(new Event('change', { bubbles: true })); \
             }",
            vec![json!(value)],
        )
        .await?;
        Ok(())
    }

    async fn check(&self, handle: &ControlHandle) -> Result<(), PageError> {
        self.call_on(
            handle,
            "function() { if (!this.checked) { this.click(); } }",
            vec![],
        )
        .await?;
        Ok(())
    }

    async fn select_option(&self, handle: &ControlHandle, value: &str) -> Result<(), PageError> {
        self.call_on(
            handle,
            "function(value) { \
                 this.value = value; \
                 this.dispatchEvent(new Event('change', { bubbles: true })); \
             }",
            vec![json!(value)],
        )
        .await?;
        Ok(())
    }

    async fn set_files(&self, handle: &ControlHandle, paths: &[&Path]) -> Result<(), PageError> {
        // Chrome rejects this on anything but a file input, which is what
        // makes the empty-list probe work.
        let files: Vec<String> = paths.iter().map(|p| p.display().to_string()).collect();
        self.call(
            "DOM.setFileInputFiles",
            Some(json!({
                "files": files,
                "objectId": handle.id(),
            })),
        )
        .await?;
        Ok(())
    }

    async fn click(&self, handle: &ControlHandle) -> Result<(), PageError> {
        self.call_on(
            handle,
            "function() { \
                 this.scrollIntoView({ block: 'center' }); \
                 this.click(); \
             }",
            vec![],
        )
        .await?;
        Ok(())
    }

    async fn navigate(&self, url: &str) -> Result<(), PageError> {
        let result = self
            .call("Page.navigate", Some(json!({"url": url})))
            .await?;

        if let Some(error) = result.get("errorText") {
            return Err(PageError::NavigationFailed(
                error.as_str().unwrap_or("Unknown error").to_string(),
            ));
        }

        self.wait_for_load().await?;
        debug!("Navigated to {}", url);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_js_string_quotes_and_escapes() {
        assert_eq!(js_string("input, select"), "\"input, select\"");
        assert_eq!(js_string("a\"b"), "\"a\\\"b\"");
    }

    #[test]
    fn test_indexed_object_ids_sorted_and_filtered() {
        let props: Vec<PropertyDescriptor> = serde_json::from_value(json!([
            {"name": "1", "value": {"type": "object", "objectId": "obj-b"}},
            {"name": "length", "value": {"type": "number", "value": 2}},
            {"name": "0", "value": {"type": "object", "objectId": "obj-a"}},
        ]))
        .unwrap();
        assert_eq!(indexed_object_ids(props), vec!["obj-a", "obj-b"]);
    }

    #[test]
    fn test_indexed_object_ids_empty() {
        assert!(indexed_object_ids(Vec::new()).is_empty());
    }
}

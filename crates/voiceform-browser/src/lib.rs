//! Chrome DevTools Protocol (CDP) backend for the [`voiceform_protocols::Page`]
//! seam.
//!
//! This is a pure Rust CDP client: it connects to Chrome/Chromium via
//! WebSocket and speaks the CDP JSON-RPC protocol directly.
//!
//! ## Usage
//!
//! 1. Start Chrome with remote debugging:
//!    ```bash
//!    chrome --remote-debugging-port=9222
//!    ```
//!
//! 2. Connect and open a page:
//!    ```rust,ignore
//!    let client = CdpClient::connect("http://localhost:9222").await?;
//!    let page = client.new_page().await?;
//!    page.navigate("https://example.com/apply").await?;
//!    ```

mod client;
mod error;
mod page;
mod protocol;

pub use client::CdpClient;
pub use error::CdpError;
pub use page::CdpPage;
pub use protocol::{BrowserVersion, CdpRequest, CdpResponse, PageInfo, RemoteObject};

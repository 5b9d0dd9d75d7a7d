//! Speech backends for the [`voiceform_protocols::Speech`] seam.
//!
//! `ConsoleSpeech` is the development backend: prompts go to stdout and one
//! stdin line stands in for an utterance. `HttpSpeech` talks to a local
//! speech service that fronts real synthesis and recognition hardware.

mod console;
mod http;

pub use console::ConsoleSpeech;
pub use http::HttpSpeech;

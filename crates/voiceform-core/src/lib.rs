//! # Voiceform Core
//!
//! The form-field classification and interaction-policy engine.
//!
//! Works against the trait seams in `voiceform-protocols`: a [`Page`] for
//! DOM access, a [`Speech`] engine for voice I/O, and an [`OperatorGate`]
//! for manual continuation. Everything here is backend-agnostic and is
//! exercised in tests through the scripted doubles in [`testing`].
//!
//! Pipeline: [`extract::extract_fields`] scans the page and produces
//! [`FieldDescriptor`]s (labels resolved by [`label`], purposes classified
//! by [`purpose`]) → [`session::run_session`] iterates them →
//! [`policy::process_field`] dispatches each field to its strategy →
//! text-like strategies run the confirmation loop in [`confirm`], file
//! uploads run the resolver in [`upload`].
//!
//! [`Page`]: voiceform_protocols::Page
//! [`Speech`]: voiceform_protocols::Speech
//! [`OperatorGate`]: voiceform_protocols::OperatorGate
//! [`FieldDescriptor`]: voiceform_protocols::FieldDescriptor

pub mod capture;
pub mod confirm;
pub mod extract;
pub mod fs_search;
pub mod label;
pub mod ordinal;
pub mod policy;
pub mod purpose;
pub mod render;
pub mod session;
pub mod testing;
pub mod upload;

pub use capture::{capture, capture_with_policy, CaptureOutcome, CapturePolicy};
pub use confirm::{confirm_entry, fill_with_confirmation, is_affirmative};
pub use extract::extract_fields;
pub use fs_search::{default_search_roots, search_files};
pub use label::resolve_label;
pub use ordinal::parse_ordinal;
pub use policy::process_field;
pub use purpose::classify_purpose;
pub use render::ReadbackMode;
pub use session::{run_session, SessionConfig};

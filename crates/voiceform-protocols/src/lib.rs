//! # Voiceform Protocols
//!
//! Trait seams and shared types for the voiceform assistant.
//! Contains only interface definitions and data types - no implementations.
//!
//! ## Core Traits
//!
//! - [`Page`] - Browser page collaborator (DOM queries, value commits)
//! - [`Speech`] - Speech synthesis and recognition collaborator
//! - [`OperatorGate`] - Manual-continuation signal for human intervention

pub mod error;
pub mod field;
pub mod operator;
pub mod page;
pub mod speech;

pub use error::{FormError, PageError, SpeechError};
pub use field::{FieldDescriptor, Purpose, SelectOption, StructuralType};
pub use operator::OperatorGate;
pub use page::{ControlHandle, Page};
pub use speech::Speech;

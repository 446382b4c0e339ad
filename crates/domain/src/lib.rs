//! Vantage Domain - Core types
//!
//! This crate defines the domain model for the Vantage HTTP test toolkit:
//! request and response descriptions, dotted-path JSON extraction,
//! test outcome reporting and actor settings.
//! All types here are pure Rust with no I/O dependencies.

pub mod error;
pub mod json_path;
pub mod request;
pub mod response;
pub mod settings;
pub mod testing;

pub use error::{DomainError, DomainResult};
pub use json_path::{Document, FromLeaf, LeafKind, extract_by_path, extract_into};
pub use request::{Header, Headers, HttpMethod, RequestBody, RequestSpec};
pub use response::ResponseSpec;
pub use settings::ActorSettings;
pub use testing::{CaseOutcome, CaseStatus, RunReport};

// crates/switchboard-core/src/lib.rs
// ============================================================================
// Module: Switchboard Core
// Description: Action registry, dispatch pipeline, and error taxonomy.
// Purpose: Provide the transport-agnostic core shared by CLI and web fronts.
// Dependencies: jsonschema, serde, serde_json, thiserror
// ============================================================================

//! ## Overview
//! Switchboard exposes a fixed set of named actions through a command-line
//! path and an HTTP path. This crate holds everything both transports share:
//! the immutable action registry, the validate → invoke → serialize dispatch
//! pipeline, the schema capability used to type-check untrusted parameters,
//! the tagged error taxonomy, the response envelopes, and the guaranteed
//! post-action cleanup guard.
//!
//! Security posture: raw request maps are untrusted input; nothing reaches a
//! handler until its schema has validated the complete request.

// ============================================================================
// SECTION: Modules
// ============================================================================

pub mod cleanup;
pub mod dispatch;
pub mod envelope;
pub mod error;
pub mod registry;
pub mod schema;
pub mod transport;

// ============================================================================
// SECTION: Re-exports
// ============================================================================

pub use cleanup::CleanupGuard;
pub use cleanup::CleanupHook;
pub use cleanup::NoopCleanup;
pub use dispatch::Action;
pub use envelope::ErrorEnvelope;
pub use envelope::SuccessEnvelope;
pub use error::ActionError;
pub use error::DispatchError;
pub use error::ErrorKind;
pub use error::FailureEntry;
pub use error::SerializeError;
pub use error::ValidationError;
pub use registry::ActionName;
pub use registry::ActionNameError;
pub use registry::ActionRegistry;
pub use registry::ActionRegistryBuilder;
pub use registry::RegistryError;
pub use schema::ActionSchema;
pub use schema::DocumentSchema;
pub use schema::RawRequest;
pub use schema::SchemaCompileError;
pub use schema::TypedSchema;
pub use transport::Transport;

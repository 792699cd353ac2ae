// crates/switchboard-cli/src/lib.rs
// ============================================================================
// Module: Switchboard CLI Transport
// Description: Command-line front end for the Switchboard action dispatcher.
// Purpose: Expose one subcommand per action with pretty or JSON-IPC output
//          and a guaranteed post-action cleanup hook.
// Dependencies: clap, serde, serde_json, switchboard-core, thiserror, tracing
// ============================================================================

//! ## Overview
//! The CLI transport drives the shared dispatch pipeline from a terminal. The
//! embedding binary supplies the action registry and an optional cleanup
//! hook; this crate derives one subcommand per registered action, merges the
//! request object with keyword overrides, invokes the pipeline, and renders
//! the outcome either as human-readable text or as a JSON-IPC envelope
//! carrying a monotonic request id and the elapsed duration. The cleanup hook
//! fires exactly once per invocation, success or failure.
//!
//! Security posture: command-line arguments are untrusted input; they pass
//! through the same schema validation as any other transport's requests.

// ============================================================================
// SECTION: Modules
// ============================================================================

pub mod command;
pub mod emitter;
pub mod transport;

// ============================================================================
// SECTION: Re-exports
// ============================================================================

pub use command::ActionInvocation;
pub use command::CliError;
pub use command::build_command;
pub use command::parse_invocation;
pub use command::run;
pub use emitter::IpcEnvelope;
pub use emitter::OutputMode;
pub use emitter::render;
pub use emitter::render_failure;
pub use transport::CliOutcome;
pub use transport::CliTransport;
pub use transport::merge_overrides;

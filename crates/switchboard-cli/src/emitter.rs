// crates/switchboard-cli/src/emitter.rs
// ============================================================================
// Module: Output Emitter
// Description: Pretty-text and JSON-IPC rendering of invocation outcomes.
// Purpose: Format results and failures for terminals and machine callers.
// Dependencies: serde, serde_json, switchboard-core
// ============================================================================

//! ## Overview
//! Two rendering modes: `Pretty` produces indented JSON for a terminal, and
//! `JsonIpc` produces a single-line envelope `{result, version, id,
//! duration_ms}` for machine callers. Failures render as a terse message in
//! pretty mode and as the standard error envelope in IPC mode.

// ============================================================================
// SECTION: Imports
// ============================================================================

use serde::Serialize;
use serde_json::Value;
use switchboard_core::DispatchError;
use switchboard_core::ErrorEnvelope;

use crate::transport::CliOutcome;

// ============================================================================
// SECTION: Output Modes
// ============================================================================

/// Rendering mode selected at transport construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputMode {
    /// Indented JSON for human readers.
    #[default]
    Pretty,
    /// Single-line JSON-IPC envelope for machine callers.
    JsonIpc,
}

// ============================================================================
// SECTION: IPC Envelope
// ============================================================================

/// Machine-readable envelope for one successful invocation.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct IpcEnvelope {
    /// Serialized action result.
    pub result: Value,
    /// Server version string.
    pub version: &'static str,
    /// Monotonically assigned request id.
    pub id: u64,
    /// Elapsed invocation time in milliseconds.
    pub duration_ms: u64,
}

impl IpcEnvelope {
    /// Builds an envelope from an invocation outcome, stamping the version.
    #[must_use]
    pub fn from_outcome(outcome: CliOutcome) -> Self {
        Self {
            result: outcome.result,
            version: env!("CARGO_PKG_VERSION"),
            id: outcome.id,
            duration_ms: u64::try_from(outcome.duration.as_millis()).unwrap_or(u64::MAX),
        }
    }
}

// ============================================================================
// SECTION: Rendering
// ============================================================================

/// Renders a successful invocation in the selected mode.
#[must_use]
pub fn render(outcome: CliOutcome, mode: OutputMode) -> String {
    match mode {
        OutputMode::Pretty => pretty_value(&outcome.result),
        OutputMode::JsonIpc => {
            let envelope = IpcEnvelope::from_outcome(outcome);
            serde_json::to_string(&envelope).unwrap_or_else(|_| String::from("{}"))
        }
    }
}

/// Renders a dispatch failure in the selected mode.
#[must_use]
pub fn render_failure(err: &DispatchError, mode: OutputMode) -> String {
    match mode {
        OutputMode::Pretty => {
            let mut text = format!("error: {err}");
            if let Some(failures) = err.failures() {
                for entry in failures {
                    text.push_str(&format!("\n  {}: {}", entry.value, entry.error));
                }
            }
            text
        }
        OutputMode::JsonIpc => ErrorEnvelope::from_error(err).into_value().to_string(),
    }
}

/// Renders a JSON value with indentation, falling back to compact form.
fn pretty_value(value: &Value) -> String {
    serde_json::to_string_pretty(value).unwrap_or_else(|_| value.to_string())
}

// ============================================================================
// SECTION: Tests
// ============================================================================

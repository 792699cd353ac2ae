// crates/switchboard-core/src/envelope.rs
// ============================================================================
// Module: Response Envelopes
// Description: Success and error envelopes shared by both transports.
// Purpose: Give callers one structured JSON shape per outcome class.
// Dependencies: serde, serde_json
// ============================================================================

//! ## Overview
//! Every response leaves the dispatcher wrapped: successes carry the
//! serialized result plus the package version, failures carry a message and,
//! for aggregated partial failures only, the ordered per-input failure list.
//!
//! Security posture: envelopes are the only payloads callers ever see; stack
//! traces and server internals must never leak into them.

// ============================================================================
// SECTION: Imports
// ============================================================================

use serde::Deserialize;
use serde::Serialize;
use serde_json::Value;
use serde_json::json;

use crate::error::DispatchError;
use crate::error::FailureEntry;

// ============================================================================
// SECTION: Success Envelope
// ============================================================================

/// Envelope wrapping a serialized domain result.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SuccessEnvelope {
    /// Serialized domain result.
    pub result: Value,
    /// Dispatcher package version stamped into every success response.
    pub version: String,
}

impl SuccessEnvelope {
    /// Wraps a serialized result with the current package version.
    #[must_use]
    pub fn new(result: Value) -> Self {
        Self {
            result,
            version: env!("CARGO_PKG_VERSION").to_string(),
        }
    }

    /// Renders the envelope as a JSON value.
    #[must_use]
    pub fn into_value(self) -> Value {
        json!({
            "result": self.result,
            "version": self.version,
        })
    }
}

// ============================================================================
// SECTION: Error Envelope
// ============================================================================

/// Envelope describing a dispatch failure.
///
/// # Invariants
/// - `failures` is present only for aggregated partial failures and keeps
///   the implementer-reported order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorEnvelope {
    /// Human-readable failure summary.
    pub failure_message: String,
    /// Ordered per-input failures for aggregated errors.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub failures: Option<Vec<FailureEntry>>,
}

impl ErrorEnvelope {
    /// Builds the envelope for a dispatch error.
    #[must_use]
    pub fn from_error(err: &DispatchError) -> Self {
        Self {
            failure_message: err.to_string(),
            failures: err.failures().map(<[FailureEntry]>::to_vec),
        }
    }

    /// Renders the envelope as a JSON value.
    #[must_use]
    pub fn into_value(self) -> Value {
        let mut map = serde_json::Map::new();
        map.insert("failure_message".to_string(), Value::String(self.failure_message));
        if let Some(failures) = self.failures {
            let entries = failures
                .into_iter()
                .map(|entry| json!({"value": entry.value, "error": entry.error}))
                .collect();
            map.insert("failures".to_string(), Value::Array(entries));
        }
        Value::Object(map)
    }
}

// ============================================================================
// SECTION: Tests
// ============================================================================

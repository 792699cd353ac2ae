// crates/switchboard-core/src/error.rs
// ============================================================================
// Module: Dispatch Error Taxonomy
// Description: Tagged error kinds for the validate → invoke → serialize flow.
// Purpose: Give transports one exhaustive error surface to map onto.
// Dependencies: serde, thiserror
// ============================================================================

//! ## Overview
//! Every failure the dispatch pipeline can produce is represented here as a
//! variant of [`DispatchError`], classified by [`ErrorKind`] so a transport
//! maps kinds to its native convention (HTTP status codes, exit codes) with a
//! single exhaustive match instead of catching concrete types across module
//! boundaries.
//!
//! Security posture: error messages are returned to callers; they must never
//! embed stack traces or server-internal detail beyond the failing input.

// ============================================================================
// SECTION: Imports
// ============================================================================

use serde::Deserialize;
use serde::Serialize;
use thiserror::Error;

// ============================================================================
// SECTION: Leaf Errors
// ============================================================================

/// Schema validation failure for a raw request map.
///
/// # Invariants
/// - `detail` describes the failing field or coercion, not server state.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid request parameters: {detail}")]
pub struct ValidationError {
    /// Human-readable validation failure detail.
    detail: String,
}

impl ValidationError {
    /// Constructs a validation error from a failure detail.
    pub fn new(detail: impl Into<String>) -> Self {
        Self {
            detail: detail.into(),
        }
    }

    /// Returns the failure detail.
    #[must_use]
    pub fn detail(&self) -> &str {
        &self.detail
    }
}

/// Response serialization failure on the success path.
///
/// Serialization runs after the handler succeeded, so this is a server fault
/// rather than a caller mistake.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("response serialization failed: {detail}")]
pub struct SerializeError {
    /// Human-readable serialization failure detail.
    detail: String,
}

impl SerializeError {
    /// Constructs a serialization error from a failure detail.
    pub fn new(detail: impl Into<String>) -> Self {
        Self {
            detail: detail.into(),
        }
    }
}

// ============================================================================
// SECTION: Partial Failures
// ============================================================================

/// One failed sub-operation inside an aggregated partial failure.
///
/// # Invariants
/// - `value` identifies the input the implementer was processing.
/// - Entry order matches the order reported by the implementer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FailureEntry {
    /// Input value the failed sub-operation was processing.
    pub value: String,
    /// Rendered error encountered for that value.
    pub error: String,
}

impl FailureEntry {
    /// Constructs a failure entry from an input value and its error.
    pub fn new(value: impl Into<String>, error: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            error: error.into(),
        }
    }
}

// ============================================================================
// SECTION: Handler Errors
// ============================================================================

/// Error raised by an action handler during invocation.
///
/// Handlers distinguish partial failures across independent sub-operations
/// from plain failures; the pipeline folds both into [`DispatchError`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ActionError {
    /// Multiple independent sub-operations failed, each tied to an input.
    #[error("{message}")]
    Aggregated {
        /// Summary of the partial failure.
        message: String,
        /// Per-input failures in implementer-reported order.
        failures: Vec<FailureEntry>,
    },
    /// The action failed as a whole.
    #[error("{detail}")]
    Failed {
        /// Human-readable failure detail.
        detail: String,
    },
}

impl ActionError {
    /// Constructs an aggregated partial failure from ordered entries.
    pub fn aggregated(
        message: impl Into<String>,
        failures: impl IntoIterator<Item = FailureEntry>,
    ) -> Self {
        Self::Aggregated {
            message: message.into(),
            failures: failures.into_iter().collect(),
        }
    }

    /// Constructs a whole-action failure from a detail message.
    pub fn failed(detail: impl Into<String>) -> Self {
        Self::Failed {
            detail: detail.into(),
        }
    }
}

// ============================================================================
// SECTION: Error Kinds
// ============================================================================

/// Classification of a dispatch failure for transport mapping.
///
/// # Invariants
/// - Variants are stable for telemetry labeling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ErrorKind {
    /// Caller mistake: malformed payload, failed validation, unknown action.
    Input,
    /// Aggregated partial failure reported by the implementer.
    Aggregated,
    /// Any other handler or serialization fault.
    Unhandled,
}

impl ErrorKind {
    /// Returns a stable label for the kind.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Input => "input",
            Self::Aggregated => "aggregated",
            Self::Unhandled => "unhandled",
        }
    }
}

// ============================================================================
// SECTION: Dispatch Error
// ============================================================================

/// Failure produced by action lookup or the dispatch pipeline.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DispatchError {
    /// The requested action name is not in the registry.
    #[error("no action named '{name}'")]
    UnknownAction {
        /// Name the caller requested.
        name: String,
    },
    /// The transport-level request body could not be parsed into a map.
    #[error("malformed request body: {detail}")]
    MalformedBody {
        /// Human-readable parse failure detail.
        detail: String,
    },
    /// Schema validation rejected the merged request map.
    #[error(transparent)]
    Validation(#[from] ValidationError),
    /// The implementer reported an aggregated partial failure.
    #[error("{message}")]
    Aggregated {
        /// Summary of the partial failure.
        message: String,
        /// Per-input failures in implementer-reported order.
        failures: Vec<FailureEntry>,
    },
    /// The handler or response serialization failed for any other reason.
    #[error("action '{action}' failed: {detail}")]
    Unhandled {
        /// Action that was executing.
        action: String,
        /// Human-readable failure detail.
        detail: String,
    },
}

impl DispatchError {
    /// Classifies this error for transport mapping.
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::UnknownAction {
                ..
            }
            | Self::MalformedBody {
                ..
            }
            | Self::Validation(_) => ErrorKind::Input,
            Self::Aggregated {
                ..
            } => ErrorKind::Aggregated,
            Self::Unhandled {
                ..
            } => ErrorKind::Unhandled,
        }
    }

    /// Returns the ordered partial failures when this is an aggregated error.
    #[must_use]
    pub fn failures(&self) -> Option<&[FailureEntry]> {
        match self {
            Self::Aggregated {
                failures, ..
            } => Some(failures),
            _ => None,
        }
    }
}

// ============================================================================
// SECTION: Tests
// ============================================================================

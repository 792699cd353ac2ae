// crates/switchboard-cli/src/transport.rs
// ============================================================================
// Module: CLI Transport
// Description: Single-invocation dispatch with guaranteed cleanup.
// Purpose: Merge request and overrides, run the pipeline, stamp id/duration.
// Dependencies: switchboard-core, tracing
// ============================================================================

//! ## Overview
//! One CLI invocation resolves an action, merges the explicit request object
//! with keyword overrides (overrides win), and runs the dispatch pipeline
//! inside a cleanup guard so the implementer's release hook fires exactly
//! once whether the pipeline succeeds or fails. Each invocation receives a
//! monotonically assigned request id and its elapsed duration for the
//! JSON-IPC envelope.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::sync::Arc;
use std::sync::atomic::AtomicU64;
use std::sync::atomic::Ordering;
use std::time::Duration;
use std::time::Instant;

use serde_json::Value;
use switchboard_core::ActionRegistry;
use switchboard_core::CleanupGuard;
use switchboard_core::CleanupHook;
use switchboard_core::DispatchError;
use switchboard_core::RawRequest;
use switchboard_core::Transport;

use crate::emitter::OutputMode;

// ============================================================================
// SECTION: Outcome
// ============================================================================

/// Result of one CLI invocation before rendering.
#[derive(Debug, Clone, PartialEq)]
pub struct CliOutcome {
    /// Serialized action result.
    pub result: Value,
    /// Monotonically assigned request id.
    pub id: u64,
    /// Elapsed wall-clock time for the invocation.
    pub duration: Duration,
}

// ============================================================================
// SECTION: Transport
// ============================================================================

/// Command-line front end over the shared action registry.
///
/// # Invariants
/// - The cleanup hook, when present, fires exactly once per invocation,
///   regardless of outcome.
/// - Request ids are assigned monotonically within one transport instance.
pub struct CliTransport {
    /// Immutable action table.
    registry: Arc<ActionRegistry>,
    /// Implementer release hook fired after every invocation.
    cleanup: Option<Arc<dyn CleanupHook>>,
    /// Propagate dispatch errors instead of rendering them.
    crash_on_error: bool,
    /// Rendering mode selected at construction.
    output_mode: OutputMode,
    /// Next request id to assign.
    next_id: AtomicU64,
}

impl CliTransport {
    /// Constructs a transport over a registry with pretty output.
    #[must_use]
    pub fn new(registry: Arc<ActionRegistry>) -> Self {
        Self {
            registry,
            cleanup: None,
            crash_on_error: false,
            output_mode: OutputMode::Pretty,
            next_id: AtomicU64::new(0),
        }
    }

    /// Installs the implementer's post-action cleanup hook.
    #[must_use]
    pub fn with_cleanup(mut self, cleanup: Arc<dyn CleanupHook>) -> Self {
        self.cleanup = Some(cleanup);
        self
    }

    /// Selects whether dispatch errors propagate instead of rendering.
    #[must_use]
    pub const fn with_crash_on_error(mut self, crash_on_error: bool) -> Self {
        self.crash_on_error = crash_on_error;
        self
    }

    /// Selects the rendering mode.
    #[must_use]
    pub const fn with_output_mode(mut self, output_mode: OutputMode) -> Self {
        self.output_mode = output_mode;
        self
    }

    /// Returns whether error propagation is enabled.
    #[must_use]
    pub const fn crash_on_error(&self) -> bool {
        self.crash_on_error
    }

    /// Returns the rendering mode selected at construction.
    #[must_use]
    pub const fn output_mode(&self) -> OutputMode {
        self.output_mode
    }

    /// Returns the action registry behind this transport.
    #[must_use]
    pub fn registry(&self) -> &ActionRegistry {
        &self.registry
    }

    /// Invokes the named action with a request and keyword overrides.
    ///
    /// Overrides replace same-named request fields before validation. The
    /// cleanup hook fires exactly once before this returns, success or
    /// failure.
    ///
    /// # Errors
    /// Returns the underlying [`DispatchError`] for unknown actions,
    /// validation failures, and handler errors.
    pub fn invoke(
        &self,
        action_name: &str,
        request: &RawRequest,
        overrides: &RawRequest,
    ) -> Result<CliOutcome, DispatchError> {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        let started = Instant::now();
        let raw = merge_overrides(request, overrides);
        let outcome = {
            let _guard = self.cleanup.as_deref().map(CleanupGuard::new);
            self.registry.dispatch(action_name, &raw)
        };
        let duration = started.elapsed();
        match outcome {
            Ok(result) => {
                tracing::debug!(action = action_name, id, "action dispatched");
                Ok(CliOutcome {
                    result,
                    id,
                    duration,
                })
            }
            Err(err) => {
                tracing::debug!(action = action_name, id, error = %err, "action failed");
                Err(err)
            }
        }
    }
}

impl Transport for CliTransport {
    type Request = RawRequest;
    type Response = CliOutcome;

    fn registry(&self) -> &ActionRegistry {
        &self.registry
    }

    fn handle_request(
        &self,
        action_name: &str,
        request: &Self::Request,
    ) -> Result<Self::Response, DispatchError> {
        self.invoke(action_name, request, &RawRequest::new())
    }
}

// ============================================================================
// SECTION: Merging
// ============================================================================

/// Merges keyword overrides into a request; overrides win.
#[must_use]
pub fn merge_overrides(request: &RawRequest, overrides: &RawRequest) -> RawRequest {
    let mut merged = request.clone();
    for (key, value) in overrides {
        merged.insert(key.clone(), value.clone());
    }
    merged
}

// ============================================================================
// SECTION: Tests
// ============================================================================

#[cfg(test)]
mod tests;
